//! Token generation, parsing and validation
//!
//! [`TokenCodec`] is the whole public workflow: `generate` signs claims into a
//! compact token, `parse` checks a token's algorithm family and signature, and
//! `validate` additionally insists that the claims are currently valid.
//!
//! The order of checks in `parse` matters. The header algorithm is matched
//! against the caller's family before the key is used for anything, so a
//! token can never choose how its own signature is verified.

use crate::algorithm::{AlgorithmFamily, AlgorithmId, FamilyEntry};
use crate::claims::{Claims, ClaimsValidator, ValidationConfig};
use crate::error::{Error, Result};
use crate::token::{self, CompactToken, ParsedToken, TokenHeader};

use serde_json::Value;
use tracing::instrument;

/// Empty payload used when generating without claims
const EMPTY_PAYLOAD: &[u8] = b"{}";

/// Issues and validates tokens
///
/// The codec holds only an immutable [`ValidationConfig`]; it is cheap to
/// clone and safe to share between threads. Key material is borrowed per call
/// and never retained.
///
/// # Examples
///
/// ```
/// use jwtio::{AlgorithmFamily, Claims, TokenCodec};
///
/// let codec = TokenCodec::new();
/// let claims = Claims::new().with("sub", "alice").with("role", "admin");
///
/// let token = codec.generate(AlgorithmFamily::Hmac, b"s3cr3t", Some(&claims))?;
/// let validated = codec.validate(AlgorithmFamily::Hmac, &token, b"s3cr3t")?;
/// assert_eq!(validated, claims);
/// # Ok::<(), jwtio::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenCodec {
    config: ValidationConfig,
}

impl TokenCodec {
    /// Create a codec with the default validation config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom validation config
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validation config applied to claims
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Sign a token with the family's default algorithm
    ///
    /// Without claims the payload is an empty JSON object.
    ///
    /// # Errors
    /// `Error::Signing` if the key is not usable with the family or encoding fails.
    #[instrument(level = "trace", skip_all, fields(family = %family))]
    pub fn generate(
        &self,
        family: AlgorithmFamily,
        key: &[u8],
        claims: Option<&Claims>,
    ) -> Result<String> {
        self.generate_with(family.default_algorithm(), key, claims)
    }

    /// Sign a token with a specific algorithm
    ///
    /// # Errors
    /// `Error::Signing` if the key is not usable with the algorithm or encoding fails.
    #[instrument(level = "trace", skip_all, fields(algorithm = %algorithm))]
    pub fn generate_with(
        &self,
        algorithm: AlgorithmId,
        key: &[u8],
        claims: Option<&Claims>,
    ) -> Result<String> {
        let primitive = algorithm.primitive()?;

        let header = TokenHeader::new(algorithm).to_json()?;
        let payload = match claims {
            Some(claims) => serde_json::to_vec(claims)
                .map_err(|e| Error::Signing(format!("Failed to encode claims: {e}")))?,
            None => EMPTY_PAYLOAD.to_vec(),
        };

        let signing_input = token::signing_input(&header, &payload);
        let signature = primitive.sign(signing_input.as_bytes(), key)?;

        Ok(token::finish(signing_input, &signature))
    }

    /// Decode a token and verify its algorithm family and signature
    ///
    /// With `want_claims` the payload is decoded and the temporal claims are
    /// checked; a failed check is reported through [`ParsedToken::is_valid`]
    /// rather than as an error.
    ///
    /// # Errors
    /// - `Error::MalformedToken` for anything that is not a well-formed token
    /// - `Error::AlgorithmMismatch` if the header algorithm is not in `family`
    /// - `Error::SignatureInvalid` if the signature does not decode or verify
    /// - `Error::InvalidKey` if `key` cannot be decoded for the family
    #[instrument(
        level = "trace",
        skip_all,
        fields(family = %family, algorithm = tracing::field::Empty)
    )]
    pub fn parse(
        &self,
        family: AlgorithmFamily,
        token: &str,
        key: &[u8],
        want_claims: bool,
    ) -> Result<ParsedToken> {
        let compact = CompactToken::split(token)?;
        let header = compact.header()?;
        let payload = compact.payload()?;

        let primitive = FamilyEntry::lookup(family).resolve(header.algorithm_str())?;
        let algorithm = primitive.id();
        tracing::Span::current().record("algorithm", algorithm.as_str());

        let signature = compact.signature()?;
        primitive.verify(compact.signing_input().as_bytes(), &signature, key)?;

        if !want_claims {
            return Ok(ParsedToken::new(header, algorithm, None, None));
        }

        let claims = decode_claims(&payload)?;
        let invalid_reason = ClaimsValidator::validate(&claims, &self.config).err();

        Ok(ParsedToken::new(header, algorithm, Some(claims), invalid_reason))
    }

    /// Parse a token and return its claims only if it is fully valid
    ///
    /// # Errors
    /// Everything [`TokenCodec::parse`] returns, plus `Error::InvalidToken`
    /// when the signature verified but a claim check failed.
    #[instrument(level = "trace", skip_all, fields(family = %family))]
    pub fn validate(&self, family: AlgorithmFamily, token: &str, key: &[u8]) -> Result<Claims> {
        let (claims, invalid_reason) = self.parse(family, token, key, true)?.into_parts();

        if let Some(reason) = invalid_reason {
            return Err(Error::InvalidToken(reason));
        }

        claims.ok_or_else(|| Error::MalformedToken("Token carries no claims".to_string()))
    }
}

fn decode_claims(payload: &[u8]) -> Result<Claims> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| Error::MalformedToken(format!("Failed to parse payload: {e}")))?;

    Claims::try_from(value)
        .map_err(|_| Error::MalformedToken("Payload is not a JSON object".to_string()))
}

/// Sign a token with the default codec
///
/// See [`TokenCodec::generate`].
pub fn generate(family: AlgorithmFamily, key: &[u8], claims: Option<&Claims>) -> Result<String> {
    TokenCodec::default().generate(family, key, claims)
}

/// Parse a token with the default codec
///
/// See [`TokenCodec::parse`].
pub fn parse(
    family: AlgorithmFamily,
    token: &str,
    key: &[u8],
    want_claims: bool,
) -> Result<ParsedToken> {
    TokenCodec::default().parse(family, token, key, want_claims)
}

/// Validate a token with the default codec
///
/// See [`TokenCodec::validate`].
pub fn validate(family: AlgorithmFamily, token: &str, key: &[u8]) -> Result<Claims> {
    TokenCodec::default().validate(family, token, key)
}
