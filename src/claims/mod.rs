mod validator;

pub use validator::{ClaimsValidator, ValidationConfig};

use crate::error::ClaimError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token claims: the JSON object carried as the payload
///
/// Claims are an unordered mapping from names to arbitrary JSON values. The
/// registered names from [RFC 7519 Section 4.1](https://datatracker.ietf.org/doc/html/rfc7519#section-4.1)
/// (`iss`, `sub`, `aud`, `exp`, `nbf`, `iat`, `jti`) have typed accessors;
/// everything else is reached through [`Claims::get`].
///
/// # Examples
///
/// ```
/// use jwtio::Claims;
///
/// let claims = Claims::new()
///     .with("sub", "alice")
///     .with("role", "admin")
///     .with("exp", 1_900_000_000);
///
/// assert_eq!(claims.subject(), Some("alice"));
/// assert_eq!(claims.expiration(), Some(1_900_000_000));
/// assert_eq!(claims.get("role").and_then(|v| v.as_str()), Some("admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim, returning the previous value for that name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder form of [`Claims::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove a claim by name
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Check whether a claim is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no claims
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over claim names and values
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    // ========================================================================
    // Registered claims
    // ========================================================================

    /// Issuer (`iss`)
    pub fn issuer(&self) -> Option<&str> {
        self.get("iss").and_then(Value::as_str)
    }

    /// Subject (`sub`)
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Audience (`aud`), either a single string or an array of strings
    ///
    /// Returns `None` when the claim is absent or not of either form.
    pub fn audience(&self) -> Option<Vec<&str>> {
        match self.get("aud")? {
            Value::String(aud) => Some(vec![aud.as_str()]),
            Value::Array(values) => values.iter().map(Value::as_str).collect(),
            _ => None,
        }
    }

    /// Expiration time (`exp`), seconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        self.numeric_date("exp").ok().flatten()
    }

    /// Not-before time (`nbf`), seconds since the Unix epoch
    pub fn not_before(&self) -> Option<i64> {
        self.numeric_date("nbf").ok().flatten()
    }

    /// Issued-at time (`iat`), seconds since the Unix epoch
    pub fn issued_at(&self) -> Option<i64> {
        self.numeric_date("iat").ok().flatten()
    }

    /// JWT ID (`jti`)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get("jti").and_then(Value::as_str)
    }

    /// Read a NumericDate claim
    ///
    /// Fractional seconds are truncated. A present claim that is not a number
    /// is an error so that `"exp": "never"` cannot disable expiry.
    pub(crate) fn numeric_date(&self, name: &str) -> Result<Option<i64>, ClaimError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        if let Some(seconds) = value.as_i64() {
            return Ok(Some(seconds));
        }

        match value.as_f64() {
            Some(seconds) if seconds.is_finite() => Ok(Some(seconds as i64)),
            _ => Err(ClaimError::InvalidClaim(name.to_string())),
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}

impl TryFrom<Value> for Claims {
    type Error = Value;

    /// Only JSON objects are claim sets; anything else is handed back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Claims {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registered_claims() {
        let claims = Claims::try_from(json!({
            "iss": "https://issuer.example.com",
            "sub": "user123",
            "aud": "api.example.com",
            "exp": 1_900_000_000,
            "nbf": 1_700_000_000,
            "iat": 1_700_000_000,
            "jti": "token-1"
        }))
        .unwrap();

        assert_eq!(claims.issuer(), Some("https://issuer.example.com"));
        assert_eq!(claims.subject(), Some("user123"));
        assert_eq!(claims.audience(), Some(vec!["api.example.com"]));
        assert_eq!(claims.expiration(), Some(1_900_000_000));
        assert_eq!(claims.not_before(), Some(1_700_000_000));
        assert_eq!(claims.issued_at(), Some(1_700_000_000));
        assert_eq!(claims.jwt_id(), Some("token-1"));
    }

    #[test]
    fn test_audience_array() {
        let claims = Claims::new().with("aud", json!(["a", "b"]));
        assert_eq!(claims.audience(), Some(vec!["a", "b"]));

        let claims = Claims::new().with("aud", json!(["a", 1]));
        assert_eq!(claims.audience(), None);
    }

    #[test]
    fn test_numeric_date_forms() {
        let claims = Claims::new()
            .with("exp", 1_900_000_000.75)
            .with("nbf", "tomorrow");

        assert_eq!(claims.numeric_date("exp"), Ok(Some(1_900_000_000)));
        assert_eq!(
            claims.numeric_date("nbf"),
            Err(ClaimError::InvalidClaim("nbf".to_string()))
        );
        assert_eq!(claims.numeric_date("iat"), Ok(None));
        assert_eq!(claims.not_before(), None);
    }

    #[test]
    fn test_only_objects_convert() {
        assert!(Claims::try_from(json!({})).unwrap().is_empty());
        assert_eq!(Claims::try_from(json!([1, 2])), Err(json!([1, 2])));
        assert_eq!(Claims::try_from(json!("sub")), Err(json!("sub")));
    }

    #[test]
    fn test_map_operations() {
        let mut claims: Claims = [("sub", "alice"), ("role", "admin")].into_iter().collect();
        assert_eq!(claims.len(), 2);
        assert!(claims.contains("role"));

        assert_eq!(claims.insert("role", "user"), Some(json!("admin")));
        assert_eq!(claims.remove("role"), Some(json!("user")));
        assert!(!claims.contains("role"));

        let names: Vec<&String> = claims.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["sub"]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Claims::new().with("sub", "alice").with("role", "admin");
        let b = Claims::new().with("role", "admin").with("sub", "alice");
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_as_object() {
        let claims = Claims::new().with("sub", "alice");
        assert_eq!(serde_json::to_string(&claims).unwrap(), r#"{"sub":"alice"}"#);

        let parsed: Claims = serde_json::from_str(r#"{"n":{"deep":[true,null]}}"#).unwrap();
        assert_eq!(parsed.get("n"), Some(&json!({"deep": [true, null]})));
    }
}
