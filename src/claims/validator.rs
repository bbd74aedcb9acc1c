use crate::claims::Claims;
use crate::error::ClaimError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Configuration for claims validation
///
/// The defaults follow common JWT library behavior: `exp`, `nbf` and `iat`
/// are checked when present, with no clock skew and no maximum age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Validate expiration time (exp claim)
    pub validate_exp: bool,

    /// Validate not-before time (nbf claim)
    pub validate_nbf: bool,

    /// Validate issued-at time (iat claim)
    pub validate_iat: bool,

    /// Clock skew tolerance in seconds (default: 0)
    pub clock_skew_seconds: u64,

    /// Maximum age of token in seconds (default: none)
    /// Only applies if validate_iat is true
    pub max_age_seconds: Option<u64>,

    /// Required audience value
    pub required_audience: Option<String>,

    /// Fixed evaluation time; the system clock when `None`
    pub now: Option<i64>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_exp: true,
            validate_nbf: true,
            validate_iat: true,
            clock_skew_seconds: 0,
            max_age_seconds: None,
            required_audience: None,
            now: None,
        }
    }
}

impl ValidationConfig {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Set maximum token age
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age_seconds = Some(seconds);
        self
    }

    /// Require a specific audience
    pub fn require_audience(mut self, audience: impl Into<String>) -> Self {
        self.required_audience = Some(audience.into());
        self
    }

    /// Evaluate time claims at a fixed Unix timestamp
    pub fn at(mut self, timestamp: i64) -> Self {
        self.now = Some(timestamp);
        self
    }

    /// Disable expiration validation
    pub fn no_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }

    /// Disable not-before validation
    pub fn no_nbf_validation(mut self) -> Self {
        self.validate_nbf = false;
        self
    }

    /// Disable issued-at validation
    pub fn no_iat_validation(mut self) -> Self {
        self.validate_iat = false;
        self
    }

    /// Skip all validation (use with extreme caution!)
    ///
    /// This disables all built-in validations (exp, nbf, iat, audience).
    /// The signature is still verified.
    pub fn skip_all(mut self) -> Self {
        self.validate_exp = false;
        self.validate_nbf = false;
        self.validate_iat = false;
        self.required_audience = None;
        self
    }

    fn skew(&self) -> i64 {
        i64::try_from(self.clock_skew_seconds).unwrap_or(i64::MAX)
    }
}

/// Claims validator
pub struct ClaimsValidator;

impl ClaimsValidator {
    /// Validate claims according to configuration
    ///
    /// Returns the first failing check, in the order exp, nbf, iat, aud.
    pub fn validate(claims: &Claims, config: &ValidationConfig) -> Result<(), ClaimError> {
        let now = config.now.unwrap_or_else(Self::current_timestamp);
        let skew = config.skew();

        // Validate expiration
        if config.validate_exp {
            if let Some(exp) = claims.numeric_date("exp")? {
                if now > exp.saturating_add(skew) {
                    return Err(ClaimError::Expired {
                        expired_at: exp,
                        now,
                        skew: config.clock_skew_seconds,
                    });
                }
            }
        }

        // Validate not-before
        if config.validate_nbf {
            if let Some(nbf) = claims.numeric_date("nbf")? {
                if now < nbf.saturating_sub(skew) {
                    return Err(ClaimError::NotYetValid {
                        not_before: nbf,
                        now,
                        skew: config.clock_skew_seconds,
                    });
                }
            }
        }

        // Validate issued-at
        if config.validate_iat {
            if let Some(iat) = claims.numeric_date("iat")? {
                if iat > now.saturating_add(skew) {
                    return Err(ClaimError::IssuedInFuture {
                        issued_at: iat,
                        now,
                        skew: config.clock_skew_seconds,
                    });
                }

                if let Some(max_age) = config.max_age_seconds {
                    let max_age_secs = i64::try_from(max_age).unwrap_or(i64::MAX);
                    if now > iat.saturating_add(max_age_secs) {
                        return Err(ClaimError::TooOld {
                            issued_at: iat,
                            now,
                            max_age,
                        });
                    }
                }
            }
        }

        // Validate audience
        if let Some(required_aud) = &config.required_audience {
            if !claims.contains("aud") {
                return Err(ClaimError::MissingClaim("aud".to_string()));
            }

            let audience = claims
                .audience()
                .ok_or_else(|| ClaimError::InvalidClaim("aud".to_string()))?;

            if !audience.iter().any(|aud| *aud == required_aud.as_str()) {
                return Err(ClaimError::AudienceMismatch {
                    expected: required_aud.clone(),
                    found: audience.iter().map(|aud| aud.to_string()).collect(),
                });
            }
        }

        Ok(())
    }

    /// Get current Unix timestamp
    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
