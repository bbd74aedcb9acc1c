//! HMAC with SHA-2 (HS256/384/512)
//!
//! The key is the shared secret as given. Verification recomputes the tag and
//! compares it in constant time.

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

impl Algorithm for HS256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS256
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let secret = signing_secret(key)?;
        compute_mac::<Hmac<Sha256>>(signing_input, secret).map_err(Error::Signing)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_mac::<Hmac<Sha256>>(signing_input, signature, verification_secret(key)?)
    }
}

impl Algorithm for HS384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS384
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let secret = signing_secret(key)?;
        compute_mac::<Hmac<Sha384>>(signing_input, secret).map_err(Error::Signing)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_mac::<Hmac<Sha384>>(signing_input, signature, verification_secret(key)?)
    }
}

impl Algorithm for HS512 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS512
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let secret = signing_secret(key)?;
        compute_mac::<Hmac<Sha512>>(signing_input, secret).map_err(Error::Signing)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        verify_mac::<Hmac<Sha512>>(signing_input, signature, verification_secret(key)?)
    }
}

fn signing_secret(key: &[u8]) -> Result<&[u8]> {
    if key.is_empty() {
        return Err(Error::Signing("HMAC secret is empty".to_string()));
    }
    Ok(key)
}

fn verification_secret(key: &[u8]) -> Result<&[u8]> {
    if key.is_empty() {
        return Err(Error::InvalidKey("HMAC secret is empty".to_string()));
    }
    Ok(key)
}

fn compute_mac<M: Mac + KeyInit>(
    signing_input: &[u8],
    secret: &[u8],
) -> std::result::Result<Vec<u8>, String> {
    let mut mac = <M as KeyInit>::new_from_slice(secret).map_err(|e| e.to_string())?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify an HMAC signature with constant-time comparison
fn verify_mac<M: Mac + KeyInit>(
    signing_input: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> Result<()> {
    let expected_signature =
        compute_mac::<M>(signing_input, secret).map_err(|_| Error::SignatureInvalid)?;

    if signature.len() != expected_signature.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(signature, &expected_signature) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}
