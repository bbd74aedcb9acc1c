//! ECDSA over P-256 (ES256) and P-384 (ES384)
//!
//! Signatures use the fixed-length `r || s` encoding from RFC 7518, not ASN.1.

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::error::{Error, Result};
use crate::keys::{self, KeyError, KeyKind, PrivateKeyDer, PrivateKeyFormat, VerifyingKey};

use ring::rand::SystemRandom;
use ring::signature::{
    self, EcdsaKeyPair, EcdsaSigningAlgorithm, EcdsaVerificationAlgorithm, KeyPair,
    UnparsedPublicKey,
};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
pub struct ES384;

impl Algorithm for ES256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::ES256
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_ecdsa(
            signing_input,
            key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_ecdsa(
            signing_input,
            signature,
            key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
            &signature::ECDSA_P256_SHA256_FIXED,
        )
    }
}

impl Algorithm for ES384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::ES384
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_ecdsa(
            signing_input,
            key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_ecdsa(
            signing_input,
            signature,
            key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
            &signature::ECDSA_P384_SHA384_FIXED,
        )
    }
}

/// Load an ECDSA key pair; the curve must match the signing algorithm
fn load_key_pair(
    key: &PrivateKeyDer,
    algorithm: &'static EcdsaSigningAlgorithm,
) -> std::result::Result<EcdsaKeyPair, KeyError> {
    if key.format() == PrivateKeyFormat::Pkcs1 {
        return Err(KeyError::new("PKCS#1 keys are RSA keys, expected an EC key"));
    }

    let rng = SystemRandom::new();
    EcdsaKeyPair::from_pkcs8(algorithm, key.as_der(), &rng)
        .map_err(|e| KeyError::new(format!("invalid EC private key: {e}")))
}

/// Sign and return the fixed-length `r || s` form JWS expects
fn sign_ecdsa(
    signing_input: &[u8],
    key: &[u8],
    algorithm: &'static EcdsaSigningAlgorithm,
) -> Result<Vec<u8>> {
    let private_key = keys::private_key(key).map_err(KeyError::into_signing)?;
    let key_pair = load_key_pair(&private_key, algorithm).map_err(KeyError::into_signing)?;

    let rng = SystemRandom::new();
    let signature = key_pair
        .sign(&rng, signing_input)
        .map_err(|_| Error::Signing("ECDSA signing failed".to_string()))?;

    Ok(signature.as_ref().to_vec())
}

/// Generic ECDSA signature verification
fn verify_ecdsa(
    signing_input: &[u8],
    signature: &[u8],
    key: &[u8],
    signing_algorithm: &'static EcdsaSigningAlgorithm,
    algorithm: &'static EcdsaVerificationAlgorithm,
) -> Result<()> {
    let public_key = match keys::verifying_key(key, KeyKind::Ecdsa)
        .map_err(KeyError::into_verification)?
    {
        VerifyingKey::Public(point) => point,
        VerifyingKey::Private(private_key) => load_key_pair(&private_key, signing_algorithm)
            .map_err(KeyError::into_verification)?
            .public_key()
            .as_ref()
            .to_vec(),
    };

    UnparsedPublicKey::new(algorithm, public_key)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
