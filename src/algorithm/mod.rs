mod family;
mod traits;

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod rsa;

pub(crate) use family::FamilyEntry;
pub use traits::Algorithm;

use crate::error::{Error, Result};
use std::str::FromStr;

/// Signing algorithm family selected by the caller
///
/// A token is only accepted when the algorithm in its header belongs to the
/// family the caller declared. Comparing families instead of trusting the
/// header is what stops algorithm-confusion attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Symmetric HMAC (HS256, HS384, HS512)
    Hmac,

    /// Edwards-curve signatures over Curve25519 (EdDSA)
    Ed25519,

    /// ECDSA over NIST curves (ES256, ES384)
    Ecdsa,

    /// RSASSA-PKCS1-v1_5 (RS256, RS384, RS512)
    Rsa,

    /// RSASSA-PSS (PS256, PS384, PS512)
    RsaPss,
}

impl AlgorithmFamily {
    /// All families, in discriminant order
    pub const ALL: [AlgorithmFamily; 5] = [
        AlgorithmFamily::Hmac,
        AlgorithmFamily::Ed25519,
        AlgorithmFamily::Ecdsa,
        AlgorithmFamily::Rsa,
        AlgorithmFamily::RsaPss,
    ];

    /// Display name
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmFamily::Hmac => "HMAC",
            AlgorithmFamily::Ed25519 => "Ed25519",
            AlgorithmFamily::Ecdsa => "ECDSA",
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::RsaPss => "RSA-PSS",
        }
    }

    /// Algorithm written to the header when generating with this family
    pub fn default_algorithm(&self) -> AlgorithmId {
        FamilyEntry::lookup(*self).default_algorithm()
    }

    /// Concrete algorithms that belong to this family
    pub fn algorithms(&self) -> Vec<AlgorithmId> {
        FamilyEntry::lookup(*self).algorithms().collect()
    }

    /// Check whether an algorithm belongs to this family
    pub fn contains(&self, algorithm: AlgorithmId) -> bool {
        FamilyEntry::lookup(*self).accepts(algorithm)
    }

    /// Check if the family is symmetric (HMAC)
    pub fn is_symmetric(&self) -> bool {
        matches!(self, AlgorithmFamily::Hmac)
    }
}

impl std::fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for AlgorithmFamily {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        AlgorithmFamily::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| Error::UnknownAlgorithm(format!("family #{value}")))
    }
}

impl FromStr for AlgorithmFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hmac" | "hs" => Ok(AlgorithmFamily::Hmac),
            "ed25519" | "eddsa" => Ok(AlgorithmFamily::Ed25519),
            "ecdsa" | "es" => Ok(AlgorithmFamily::Ecdsa),
            "rsa" | "rs" => Ok(AlgorithmFamily::Rsa),
            "rsa-pss" | "rsapss" | "ps" => Ok(AlgorithmFamily::RsaPss),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Algorithm identifier carried in the JWT `alg` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// Ed25519
    EdDSA,

    /// ECDSA with P-256 and SHA-256
    ES256,

    /// ECDSA with P-384 and SHA-384
    ES384,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,

    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// RSASSA-PSS with SHA-256
    PS256,

    /// RSASSA-PSS with SHA-384
    PS384,

    /// RSASSA-PSS with SHA-512
    PS512,
}

impl AlgorithmId {
    /// Convert to the header string
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::EdDSA => "EdDSA",
            AlgorithmId::ES256 => "ES256",
            AlgorithmId::ES384 => "ES384",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",
        }
    }

    /// Family this algorithm belongs to
    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512 => AlgorithmFamily::Hmac,
            AlgorithmId::EdDSA => AlgorithmFamily::Ed25519,
            AlgorithmId::ES256 | AlgorithmId::ES384 => AlgorithmFamily::Ecdsa,
            AlgorithmId::RS256 | AlgorithmId::RS384 | AlgorithmId::RS512 => AlgorithmFamily::Rsa,
            AlgorithmId::PS256 | AlgorithmId::PS384 | AlgorithmId::PS512 => {
                AlgorithmFamily::RsaPss
            }
        }
    }

    /// Signing and verification primitive for this algorithm
    pub fn primitive(&self) -> Result<&'static dyn Algorithm> {
        FamilyEntry::lookup(self.family())
            .primitive(*self)
            .ok_or_else(|| Error::UnknownAlgorithm(self.to_string()))
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    /// Parse the `alg` header value; names are case-sensitive per RFC 7515
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "EdDSA" => Ok(AlgorithmId::EdDSA),
            "ES256" => Ok(AlgorithmId::ES256),
            "ES384" => Ok(AlgorithmId::ES384),
            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),
            "PS256" => Ok(AlgorithmId::PS256),
            "PS384" => Ok(AlgorithmId::PS384),
            "PS512" => Ok(AlgorithmId::PS512),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert!(matches!(
            AlgorithmId::from_str("none"),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            AlgorithmId::from_str("hs256"),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            AlgorithmId::from_str("ES512"),
            Err(Error::UnknownAlgorithm(_))
        ));

        assert_eq!(AlgorithmId::from_str("HS256").unwrap(), AlgorithmId::HS256);
        assert_eq!(AlgorithmId::from_str("EdDSA").unwrap(), AlgorithmId::EdDSA);
        assert_eq!(AlgorithmId::from_str("PS512").unwrap(), AlgorithmId::PS512);
    }

    #[test]
    fn test_algorithm_string_round_trip() {
        for family in AlgorithmFamily::ALL {
            for algorithm in family.algorithms() {
                assert_eq!(AlgorithmId::from_str(algorithm.as_str()).unwrap(), algorithm);
            }
        }
    }

    #[test]
    fn test_family_from_u8() {
        assert_eq!(AlgorithmFamily::try_from(0u8).unwrap(), AlgorithmFamily::Hmac);
        assert_eq!(AlgorithmFamily::try_from(1u8).unwrap(), AlgorithmFamily::Ed25519);
        assert_eq!(AlgorithmFamily::try_from(2u8).unwrap(), AlgorithmFamily::Ecdsa);
        assert_eq!(AlgorithmFamily::try_from(3u8).unwrap(), AlgorithmFamily::Rsa);
        assert_eq!(AlgorithmFamily::try_from(4u8).unwrap(), AlgorithmFamily::RsaPss);
        assert!(matches!(
            AlgorithmFamily::try_from(5u8),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("HMAC".parse::<AlgorithmFamily>().unwrap(), AlgorithmFamily::Hmac);
        assert_eq!("rsa-pss".parse::<AlgorithmFamily>().unwrap(), AlgorithmFamily::RsaPss);
        assert_eq!("EdDSA".parse::<AlgorithmFamily>().unwrap(), AlgorithmFamily::Ed25519);
        assert!(matches!(
            "none".parse::<AlgorithmFamily>(),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_default_algorithms() {
        assert_eq!(AlgorithmFamily::Hmac.default_algorithm(), AlgorithmId::HS256);
        assert_eq!(AlgorithmFamily::Ed25519.default_algorithm(), AlgorithmId::EdDSA);
        assert_eq!(AlgorithmFamily::Ecdsa.default_algorithm(), AlgorithmId::ES256);
        assert_eq!(AlgorithmFamily::Rsa.default_algorithm(), AlgorithmId::RS256);
        assert_eq!(AlgorithmFamily::RsaPss.default_algorithm(), AlgorithmId::PS256);
    }

    #[test]
    fn test_family_membership() {
        assert!(AlgorithmFamily::Rsa.contains(AlgorithmId::RS384));
        assert!(!AlgorithmFamily::Rsa.contains(AlgorithmId::PS384));
        assert!(!AlgorithmFamily::Hmac.contains(AlgorithmId::RS256));
        assert!(AlgorithmFamily::Hmac.is_symmetric());
        assert!(!AlgorithmFamily::Ed25519.is_symmetric());
    }
}
