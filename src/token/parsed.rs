use crate::algorithm::{AlgorithmFamily, AlgorithmId};
use crate::claims::Claims;
use crate::error::ClaimError;
use crate::token::TokenHeader;

/// A decoded token whose algorithm and signature have been checked
///
/// A `ParsedToken` only exists once the header algorithm has matched the
/// expected family and the signature has verified. The remaining question is
/// whether the claims are currently valid: when claims were requested and a
/// temporal check failed, [`ParsedToken::is_valid`] is `false` and
/// [`ParsedToken::validation_error`] says why.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    header: TokenHeader,
    algorithm: AlgorithmId,
    claims: Option<Claims>,
    invalid_reason: Option<ClaimError>,
}

impl ParsedToken {
    pub(crate) fn new(
        header: TokenHeader,
        algorithm: AlgorithmId,
        claims: Option<Claims>,
        invalid_reason: Option<ClaimError>,
    ) -> Self {
        Self {
            header,
            algorithm,
            claims,
            invalid_reason,
        }
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Concrete algorithm the token was signed with
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Family of the signing algorithm
    pub fn family(&self) -> AlgorithmFamily {
        self.algorithm.family()
    }

    /// Key ID from the header, if present
    pub fn key_id(&self) -> Option<&str> {
        self.header.key_id()
    }

    /// Decoded claims; `None` when parsed without claims
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Take the decoded claims
    pub fn into_claims(self) -> Option<Claims> {
        self.claims
    }

    /// Whether the signature and the temporal claims checked out
    pub fn is_valid(&self) -> bool {
        self.invalid_reason.is_none()
    }

    /// Why the token is not valid, if it is not
    pub fn validation_error(&self) -> Option<&ClaimError> {
        self.invalid_reason.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<Claims>, Option<ClaimError>) {
        (self.claims, self.invalid_reason)
    }
}
