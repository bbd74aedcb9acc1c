//! RSA PKCS#1 v1.5 (RS256/384/512) and RSA-PSS (PS256/384/512)
//!
//! Both families share key handling: signing keys are PKCS#8 or PKCS#1 DER,
//! verification keys are anything [`crate::keys::verifying_key`] understands.
//! `ring` accepts moduli from 2048 to 8192 bits.

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::error::{Error, Result};
use crate::keys::{self, KeyError, KeyKind, PrivateKeyDer, PrivateKeyFormat, VerifyingKey};

use ring::rand::SystemRandom;
use ring::signature::{self, RsaEncoding, RsaKeyPair, RsaParameters, UnparsedPublicKey};

/// RS256 algorithm (RSA with SHA-256)
pub struct RS256;

/// RS384 algorithm (RSA with SHA-384)
pub struct RS384;

/// RS512 algorithm (RSA with SHA-512)
pub struct RS512;

/// PS256 algorithm (RSA-PSS with SHA-256 and MGF1 with SHA-256)
pub struct PS256;

/// PS384 algorithm (RSA-PSS with SHA-384 and MGF1 with SHA-384)
pub struct PS384;

/// PS512 algorithm (RSA-PSS with SHA-512 and MGF1 with SHA-512)
pub struct PS512;

impl Algorithm for RS256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::RS256
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PKCS1_SHA256)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PKCS1_2048_8192_SHA256,
        )
    }
}

impl Algorithm for RS384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::RS384
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PKCS1_SHA384)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PKCS1_2048_8192_SHA384,
        )
    }
}

impl Algorithm for RS512 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::RS512
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PKCS1_SHA512)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PKCS1_2048_8192_SHA512,
        )
    }
}

impl Algorithm for PS256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::PS256
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PSS_SHA256)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PSS_2048_8192_SHA256,
        )
    }
}

impl Algorithm for PS384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::PS384
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PSS_SHA384)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PSS_2048_8192_SHA384,
        )
    }
}

impl Algorithm for PS512 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::PS512
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key, &signature::RSA_PSS_SHA512)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_rsa(
            signing_input,
            signature,
            key,
            &signature::RSA_PSS_2048_8192_SHA512,
        )
    }
}

/// Load an RSA key pair from PKCS#8 or PKCS#1 DER
fn load_key_pair(key: &PrivateKeyDer) -> std::result::Result<RsaKeyPair, KeyError> {
    let loaded = match key.format() {
        PrivateKeyFormat::Pkcs8 => RsaKeyPair::from_pkcs8(key.as_der()),
        PrivateKeyFormat::Pkcs1 => RsaKeyPair::from_der(key.as_der()),
        // Unlabelled DER: PKCS#8 first, then PKCS#1
        PrivateKeyFormat::Der => RsaKeyPair::from_pkcs8(key.as_der())
            .or_else(|_| RsaKeyPair::from_der(key.as_der())),
    };

    loaded.map_err(|e| KeyError::new(format!("invalid RSA private key: {e}")))
}

/// Generic RSA signing; the padding selects PKCS#1 v1.5 or PSS
fn sign_rsa(
    signing_input: &[u8],
    key: &[u8],
    padding: &'static dyn RsaEncoding,
) -> Result<Vec<u8>> {
    let private_key = keys::private_key(key).map_err(KeyError::into_signing)?;
    let key_pair = load_key_pair(&private_key).map_err(KeyError::into_signing)?;

    let rng = SystemRandom::new();
    let mut signature = vec![0u8; key_pair.public().modulus_len()];
    key_pair
        .sign(padding, &rng, signing_input, &mut signature)
        .map_err(|_| Error::Signing("RSA signing failed".to_string()))?;

    Ok(signature)
}

/// Generic RSA signature verification
fn verify_rsa(
    signing_input: &[u8],
    signature: &[u8],
    key: &[u8],
    parameters: &'static RsaParameters,
) -> Result<()> {
    let public_key_der = match keys::verifying_key(key, KeyKind::Rsa)
        .map_err(KeyError::into_verification)?
    {
        VerifyingKey::Public(der) => der,
        VerifyingKey::Private(private_key) => load_key_pair(&private_key)
            .map_err(KeyError::into_verification)?
            .public()
            .as_ref()
            .to_vec(),
    };

    UnparsedPublicKey::new(parameters, public_key_der)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
