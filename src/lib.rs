//! # jwtio - Issue and Validate Signed JSON Web Tokens
//!
//! > One call to sign, one call to validate, five algorithm families.
//!
//! **jwtio** produces and checks compact JSON Web Tokens signed with HMAC, Ed25519, ECDSA, RSA
//! or RSA-PSS. The caller names the algorithm *family* it trusts; a token is only accepted when
//! the algorithm in its header belongs to that family.
//!
//! ## Overview
//!
//! JWTs (JSON Web Tokens) encode claims as JSON objects secured by digital signatures or message
//! authentication codes. The classic mistake when verifying them is letting the token's own `alg`
//! header decide how it is verified: an attacker signs a token with HMAC, using the server's RSA
//! public key as the secret, and a careless verifier accepts it.
//!
//! **jwtio** never asks the token which algorithm to use. Parsing splits the token, decodes the
//! header, and checks the declared algorithm against the expected [`AlgorithmFamily`] through an
//! immutable dispatch table *before* any key material is used. Only then is the signature
//! verified and, optionally, the claims checked.
//!
//! ## Quick Start
//!
//! ```
//! use jwtio::{AlgorithmFamily, Claims};
//!
//! let claims = Claims::new().with("sub", "alice").with("role", "admin");
//!
//! let token = jwtio::generate(AlgorithmFamily::Hmac, b"s3cr3t", Some(&claims))?;
//! let validated = jwtio::validate(AlgorithmFamily::Hmac, &token, b"s3cr3t")?;
//!
//! assert_eq!(validated.subject(), Some("alice"));
//! # Ok::<(), jwtio::Error>(())
//! ```
//!
//! ## Operations
//!
//! ```text
//! generate(family, key, claims)       -> token
//! parse(family, token, key, claims?)  -> ParsedToken (valid flag + claims)
//! validate(family, token, key)        -> Claims, or InvalidToken if not currently valid
//! ```
//!
//! The free functions use a default [`TokenCodec`]. Build a codec with
//! [`TokenCodec::with_config`] to change how claims are checked.
//!
//! ## Algorithm Support
//!
//! All algorithms implement a common `Algorithm` trait:
//!
//! - **HMAC**: HS256, HS384, HS512 (default HS256)
//! - **Ed25519**: EdDSA
//! - **ECDSA**: ES256, ES384 (default ES256)
//! - **RSA**: RS256, RS384, RS512 (default RS256)
//! - **RSA-PSS**: PS256, PS384, PS512 (default PS256)
//!
//! `generate` signs with the family default; [`TokenCodec::generate_with`] picks a specific
//! algorithm.
//!
//! ## Key Material
//!
//! Keys are plain byte slices, borrowed for a single call:
//!
//! - **HMAC**: the shared secret
//! - **Signing** (asymmetric): PEM `PRIVATE KEY` (PKCS#8), PEM `RSA PRIVATE KEY` (PKCS#1), or
//!   the DER of either
//! - **Verification** (asymmetric): PEM `PUBLIC KEY`, PEM `RSA PUBLIC KEY`, SPKI DER, the bare
//!   public key, or a private key whose public half is used
//!
//! ## Claims Validation
//!
//! Configure temporal and claim-specific checks:
//!
//! ```
//! use jwtio::{TokenCodec, ValidationConfig};
//!
//! let codec = TokenCodec::with_config(
//!     ValidationConfig::default()
//!         .require_audience("my-api")           // Validate `aud` claim
//!         .max_age(3600)                         // Token must be < 1 hour old
//!         .clock_skew(60),                       // Allow 60s clock skew
//! );
//! # let _ = codec;
//! ```
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! The expected family is a required argument. A token declaring `HS256` is rejected with
//! [`Error::AlgorithmMismatch`] by a verifier expecting [`AlgorithmFamily::Rsa`], whatever its
//! signature.
//!
//! ### "none" Algorithm Rejection
//!
//! The `"none"` algorithm (unsigned tokens) belongs to no family and is always rejected per
//! [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725).
//!
//! ### Timing Attack Protection
//!
//! HMAC signature verification uses constant-time comparison via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate, preventing timing-based key recovery attacks.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518): JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725): JSON Web Signature Best Practices

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Claims and validation
pub mod claims;

// Token types
pub mod token;

// Codec (main public API)
mod codec;

// ============================================================================
// PUBLIC API
// ============================================================================

// Main operations
pub use codec::{generate, parse, validate, TokenCodec};

// Configuration types
pub use claims::ValidationConfig;

// Supporting types
pub use algorithm::{AlgorithmFamily, AlgorithmId};
pub use claims::Claims;
pub use error::{ClaimError, Error, Result};
pub use token::{ParsedToken, TokenHeader};

// Claim values are plain JSON
pub use serde_json::Value;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const NOW: i64 = 1_700_000_000;

    /// Sign a hand-written header and payload with HS256
    fn hs256_token(header: &str, payload: &str, secret: &[u8]) -> String {
        let header_b64 = utils::base64url::encode(header);
        let payload_b64 = utils::base64url::encode(payload);
        let signing_input = format!("{header_b64}.{payload_b64}");

        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(signing_input.as_bytes());
        let signature_bytes = mac.finalize().into_bytes();
        let signature_b64 = utils::base64url::encode_bytes(&signature_bytes);

        format!("{signing_input}.{signature_b64}")
    }

    #[test]
    fn test_full_flow_hmac() {
        let payload = format!(
            r#"{{"iss":"https://example.com","sub":"user123","exp":{},"iat":{}}}"#,
            NOW + 3600,
            NOW
        );
        let token_str = hs256_token(r#"{"alg":"HS256","typ":"JWT"}"#, &payload, b"my-secret-key");

        let codec = TokenCodec::with_config(ValidationConfig::default().at(NOW));
        let claims = codec
            .validate(AlgorithmFamily::Hmac, &token_str, b"my-secret-key")
            .expect("Validation failed");

        assert_eq!(claims.issuer(), Some("https://example.com"));
        assert_eq!(claims.subject(), Some("user123"));
    }

    #[test]
    fn test_generated_token_matches_reference_hmac() {
        let claims = Claims::new().with("sub", "alice");
        let token = generate(AlgorithmFamily::Hmac, b"secret", Some(&claims)).unwrap();

        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let expected = hs256_token(header, r#"{"sub":"alice"}"#, b"secret");
        assert_eq!(token, expected);
    }

    #[test]
    fn test_signature_verification_fails() {
        let token_str = format!(
            "{}.{}.{}",
            utils::base64url::encode(r#"{"alg":"HS256"}"#),
            utils::base64url::encode(r#"{"iss":"https://example.com","sub":"user"}"#),
            utils::base64url::encode("wrong_signature")
        );

        let result = validate(AlgorithmFamily::Hmac, &token_str, b"secret");
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_claims_validation_fails() {
        let payload = format!(r#"{{"iss":"https://example.com","exp":{}}}"#, NOW - 3600);
        let token_str = hs256_token(r#"{"alg":"HS256"}"#, &payload, b"secret");

        let codec = TokenCodec::with_config(ValidationConfig::default().at(NOW));
        let result = codec.validate(AlgorithmFamily::Hmac, &token_str, b"secret");

        assert!(matches!(
            result,
            Err(Error::InvalidToken(ClaimError::Expired { .. }))
        ));
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let token_str = format!(
            "{}.{}.",
            utils::base64url::encode(r#"{"alg":"none"}"#),
            utils::base64url::encode(r#"{"iss":"test"}"#),
        );

        for family in AlgorithmFamily::ALL {
            let result = parse(family, &token_str, b"secret", true);
            assert!(
                matches!(result, Err(Error::AlgorithmMismatch { ref found, .. }) if found == "none"),
                "{family} accepted an unsigned token"
            );
        }
    }
}
