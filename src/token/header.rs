use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Key ID
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl TokenHeader {
    /// Header written when generating a token: `{"alg":<id>,"typ":"JWT"}`
    pub fn new(algorithm: AlgorithmId) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            token_type: Some("JWT".to_string()),
            key_id: None,
        }
    }

    /// Decode header JSON; it must be an object carrying a string `alg`
    pub(crate) fn from_json(json: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(json)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;

        if !value.is_object() {
            return Err(Error::MalformedToken("Header is not a JSON object".to_string()));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::MalformedToken(format!("Invalid header: {e}")))
    }

    /// Encode header JSON
    pub(crate) fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| Error::Signing(format!("Failed to encode header: {e}")))
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }

    /// Get token type if present
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}
