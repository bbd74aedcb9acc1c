//! Ed25519 (EdDSA)

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::error::{Error, Result};
use crate::keys::{self, KeyError, KeyKind, PrivateKeyDer, PrivateKeyFormat, VerifyingKey};

use ring::signature::{self, Ed25519KeyPair, KeyPair, UnparsedPublicKey};

/// EdDSA algorithm (Ed25519)
pub struct EdDSA;

impl Algorithm for EdDSA {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::EdDSA
    }

    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let private_key = keys::private_key(key).map_err(KeyError::into_signing)?;
        let key_pair = load_key_pair(&private_key).map_err(KeyError::into_signing)?;
        Ok(key_pair.sign(signing_input).as_ref().to_vec())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()> {
        let public_key = match keys::verifying_key(key, KeyKind::Ed25519)
            .map_err(KeyError::into_verification)?
        {
            VerifyingKey::Public(bytes) => bytes,
            VerifyingKey::Private(private_key) => load_key_pair(&private_key)
                .map_err(KeyError::into_verification)?
                .public_key()
                .as_ref()
                .to_vec(),
        };

        UnparsedPublicKey::new(&signature::ED25519, public_key)
            .verify(signing_input, signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

/// Load an Ed25519 key pair from PKCS#8 v1 or v2
fn load_key_pair(key: &PrivateKeyDer) -> std::result::Result<Ed25519KeyPair, KeyError> {
    if key.format() == PrivateKeyFormat::Pkcs1 {
        return Err(KeyError::new(
            "PKCS#1 keys are RSA keys, expected an Ed25519 key",
        ));
    }

    // OpenSSL writes v1 documents without the embedded public key
    Ed25519KeyPair::from_pkcs8_maybe_unchecked(key.as_der())
        .map_err(|e| KeyError::new(format!("invalid Ed25519 private key: {e}")))
}
