//! JWS compact serialization: `header.payload.signature`

use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::TokenHeader;
use crate::utils::base64url;

/// A token split into its three segments, still Base64URL-encoded
pub(crate) struct CompactToken<'a> {
    signing_input: &'a str,
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> CompactToken<'a> {
    /// Split a token, enforcing the length limit and the three-part shape
    pub(crate) fn split(token: &'a str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::MalformedToken(format!(
                "Token too long: {} bytes (max: {MAX_TOKEN_LENGTH})",
                token.len()
            )));
        }

        let (signing_input, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| Error::MalformedToken("Expected 3 segments".to_string()))?;
        let (header, payload) = signing_input
            .split_once('.')
            .ok_or_else(|| Error::MalformedToken("Expected 3 segments".to_string()))?;

        if payload.contains('.') {
            return Err(Error::MalformedToken("Expected 3 segments".to_string()));
        }
        if header.is_empty() {
            return Err(Error::MalformedToken("Header segment is empty".to_string()));
        }

        Ok(Self {
            signing_input,
            header,
            payload,
            signature,
        })
    }

    /// `header.payload`, the bytes covered by the signature
    pub(crate) fn signing_input(&self) -> &'a str {
        self.signing_input
    }

    pub(crate) fn header(&self) -> Result<TokenHeader> {
        let json = base64url::decode_bytes(self.header, MAX_DECODED_HEADER_SIZE)?;
        TokenHeader::from_json(&json)
    }

    pub(crate) fn payload(&self) -> Result<Vec<u8>> {
        base64url::decode_bytes(self.payload, MAX_DECODED_PAYLOAD_SIZE)
    }

    /// Decoded signature bytes
    ///
    /// A signature segment that does not decode cannot match any key, so it
    /// fails the same way as a wrong signature.
    pub(crate) fn signature(&self) -> Result<Vec<u8>> {
        base64url::decode_bytes(self.signature, MAX_DECODED_SIGNATURE_SIZE)
            .map_err(|_| Error::SignatureInvalid)
    }
}

/// Join the encoded header and payload into a signing input
pub(crate) fn signing_input(header_json: &[u8], payload_json: &[u8]) -> String {
    let mut input = base64url::encode_bytes(header_json);
    input.push('.');
    input.push_str(&base64url::encode_bytes(payload_json));
    input
}

/// Append the encoded signature to a signing input
pub(crate) fn finish(mut signing_input: String, signature: &[u8]) -> String {
    signing_input.push('.');
    signing_input.push_str(&base64url::encode_bytes(signature));
    signing_input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_valid_token() {
        let header_b64 = base64url::encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload_b64 = base64url::encode(r#"{"iss":"test","sub":"user"}"#);
        let signature_b64 = base64url::encode("signature");
        let token_str = format!("{header_b64}.{payload_b64}.{signature_b64}");

        let token = CompactToken::split(&token_str).unwrap();
        assert_eq!(token.signing_input(), format!("{header_b64}.{payload_b64}"));
        assert_eq!(token.header().unwrap().algorithm_str(), "HS256");
        assert_eq!(token.payload().unwrap(), br#"{"iss":"test","sub":"user"}"#);
        assert_eq!(token.signature().unwrap(), b"signature");
    }

    #[test]
    fn test_split_invalid_format() {
        let tokens = ["", "not.enough", "too.many.parts.here", "nodots", ".payload.sig"];
        for token in tokens {
            assert!(
                matches!(CompactToken::split(token), Err(Error::MalformedToken(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_payload_and_signature_segments_split() {
        let token = CompactToken::split("eyJhbGciOiJIUzI1NiJ9..").unwrap();
        assert_eq!(token.payload().unwrap(), b"");
        assert_eq!(token.signature().unwrap(), b"");
    }

    #[test]
    fn test_oversized_token() {
        let token = "a".repeat(MAX_TOKEN_LENGTH + 1);
        let result = CompactToken::split(&token);
        assert!(matches!(result, Err(Error::MalformedToken(msg)) if msg.contains("too long")));
    }

    #[test]
    fn test_oversized_signature() {
        let signature = base64url::encode_bytes(&[0u8; MAX_DECODED_SIGNATURE_SIZE + 1]);
        let token_str = format!("eyJhbGciOiJIUzI1NiJ9.e30.{signature}");
        let token = CompactToken::split(&token_str).unwrap();
        assert!(matches!(token.signature(), Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_undecodable_signature() {
        for signature in ["!!!", "c2ln=", "a", "c2ln\n"] {
            let token_str = format!("eyJhbGciOiJIUzI1NiJ9.e30.{signature}");
            let token = CompactToken::split(&token_str).unwrap();
            assert!(
                matches!(token.signature(), Err(Error::SignatureInvalid)),
                "signature {signature:?}"
            );
        }
    }

    #[test]
    fn test_encode_layout() {
        let input = signing_input(br#"{"alg":"HS256"}"#, b"{}");
        assert_eq!(input, "eyJhbGciOiJIUzI1NiJ9.e30");
        assert_eq!(finish(input, b"sig"), "eyJhbGciOiJIUzI1NiJ9.e30.c2ln");
    }
}
