use crate::algorithm::AlgorithmId;
use crate::error::Result;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// Each algorithm family (HMAC, Ed25519, ECDSA, RSA, RSA-PSS) provides one
/// implementation per concrete `alg` value. Implementations are stateless unit
/// types; key material is borrowed per call and decoded on the spot.
pub trait Algorithm: Send + Sync {
    /// The algorithm identifier written to the `alg` header
    fn id(&self) -> AlgorithmId;

    /// Sign the signing input (`header.payload`)
    ///
    /// # Errors
    /// Returns `Error::Signing` if the key does not fit the algorithm or the
    /// primitive fails.
    fn sign(&self, signing_input: &[u8], key: &[u8]) -> Result<Vec<u8>>;

    /// Verify a decoded signature over the signing input
    ///
    /// # Errors
    /// Returns `Error::SignatureInvalid` if the signature does not verify and
    /// `Error::InvalidKey` if the key cannot be decoded for the algorithm.
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &[u8]) -> Result<()>;
}
