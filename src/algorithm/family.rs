//! Family dispatch table
//!
//! One immutable record per [`AlgorithmFamily`]: the algorithm used when
//! generating and the member algorithms with their primitives. Membership is
//! the check that keeps a token's declared algorithm inside the family the
//! caller expects; the primitive lookup is how a signer or verifier is built.

use super::{ecdsa, eddsa, hmac, rsa, Algorithm, AlgorithmFamily, AlgorithmId};
use crate::error::{Error, Result};
use std::str::FromStr;

pub(crate) struct FamilyEntry {
    family: AlgorithmFamily,
    default_algorithm: AlgorithmId,
    primitives: &'static [&'static dyn Algorithm],
}

/// Indexed by `AlgorithmFamily` discriminant
static FAMILY_TABLE: [FamilyEntry; 5] = [
    FamilyEntry {
        family: AlgorithmFamily::Hmac,
        default_algorithm: AlgorithmId::HS256,
        primitives: &[&hmac::HS256, &hmac::HS384, &hmac::HS512],
    },
    FamilyEntry {
        family: AlgorithmFamily::Ed25519,
        default_algorithm: AlgorithmId::EdDSA,
        primitives: &[&eddsa::EdDSA],
    },
    FamilyEntry {
        family: AlgorithmFamily::Ecdsa,
        default_algorithm: AlgorithmId::ES256,
        primitives: &[&ecdsa::ES256, &ecdsa::ES384],
    },
    FamilyEntry {
        family: AlgorithmFamily::Rsa,
        default_algorithm: AlgorithmId::RS256,
        primitives: &[&rsa::RS256, &rsa::RS384, &rsa::RS512],
    },
    FamilyEntry {
        family: AlgorithmFamily::RsaPss,
        default_algorithm: AlgorithmId::PS256,
        primitives: &[&rsa::PS256, &rsa::PS384, &rsa::PS512],
    },
];

impl FamilyEntry {
    pub(crate) fn lookup(family: AlgorithmFamily) -> &'static FamilyEntry {
        &FAMILY_TABLE[family as usize]
    }

    pub(crate) fn default_algorithm(&self) -> AlgorithmId {
        self.default_algorithm
    }

    pub(crate) fn algorithms(&self) -> impl Iterator<Item = AlgorithmId> + '_ {
        self.primitives.iter().map(|primitive| primitive.id())
    }

    pub(crate) fn primitive(&self, algorithm: AlgorithmId) -> Option<&'static dyn Algorithm> {
        self.primitives
            .iter()
            .copied()
            .find(|primitive| primitive.id() == algorithm)
    }

    pub(crate) fn accepts(&self, algorithm: AlgorithmId) -> bool {
        self.primitive(algorithm).is_some()
    }

    /// Resolve the `alg` header of a token against this family
    ///
    /// Unknown names, `"none"`, and algorithms from any other family all fail
    /// the same way: the token does not carry what the caller expects.
    pub(crate) fn resolve(&self, header_alg: &str) -> Result<&'static dyn Algorithm> {
        AlgorithmId::from_str(header_alg)
            .ok()
            .and_then(|algorithm| self.primitive(algorithm))
            .ok_or_else(|| Error::AlgorithmMismatch {
                expected: self.family,
                found: header_alg.to_string(),
            })
    }
}
