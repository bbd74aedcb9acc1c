//! Error types for token generation, parsing and validation
//!
//! Every failure is returned to the immediate caller. Nothing here is retried
//! or logged: signature checks are deterministic, so the caller decides what a
//! failure means (reject the request, deny access, and so on).

use crate::algorithm::AlgorithmFamily;
use thiserror::Error;

/// Errors produced by the token codec
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("Algorithm mismatch: expected {expected} family, token declares '{found}'")]
    AlgorithmMismatch {
        expected: AlgorithmFamily,
        found: String,
    },

    // ============================================================================
    // Generation Errors
    // ============================================================================
    #[error("Signing failed: {0}")]
    Signing(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    // ============================================================================
    // Verification Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Invalid verification key: {0}")]
    InvalidKey(String),

    #[error("Token is not valid: {0}")]
    InvalidToken(ClaimError),
}

/// Reasons a structurally sound, correctly signed token is still not valid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    Expired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    NotYetValid {
        not_before: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, skew: {skew}s)")]
    IssuedInFuture { issued_at: i64, now: i64, skew: u64 },

    #[error("Token too old: issued at {issued_at}, max age {max_age}s (now: {now})")]
    TooOld {
        issued_at: i64,
        now: i64,
        max_age: u64,
    },

    #[error("Audience mismatch: expected '{expected}', found {found:?}")]
    AudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("Required claim '{0}' is missing")]
    MissingClaim(String),

    #[error("Claim '{0}' has an invalid type")]
    InvalidClaim(String),
}

/// Result type alias for jwtio operations
pub type Result<T> = std::result::Result<T, Error>;
