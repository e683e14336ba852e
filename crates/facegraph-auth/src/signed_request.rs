//! Decoding of Facebook `signed_request` payloads
//!
//! The format is `base64url(signature) "." base64url(json)`, where the
//! signature is the HMAC-SHA256 of the encoded payload keyed with the app
//! secret. Both halves are unpadded base64url.

use crate::{AuthError, AuthResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Decoded contents of a signed request
#[derive(Debug, Clone, Deserialize)]
pub struct SignedRequest {
    pub algorithm: String,
    pub user_id: Option<String>,
    pub code: Option<String>,
    pub oauth_token: Option<String>,
    pub issued_at: Option<i64>,
    pub expires: Option<i64>,
}

/// Decode and verify a signed request against the app secret.
///
/// The signature is checked before the payload is parsed; verification is
/// constant-time.
pub fn decode_signed_request(signed_request: &str, app_secret: &str) -> AuthResult<SignedRequest> {
    let (encoded_signature, encoded_payload) = signed_request
        .split_once('.')
        .ok_or_else(|| AuthError::BadSignedRequest("Missing signature separator".to_string()))?;

    let signature = URL_SAFE_NO_PAD
        .decode(encoded_signature)
        .map_err(|e| AuthError::BadSignedRequest(format!("Invalid signature encoding: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| AuthError::BadSignedRequest(format!("Invalid app secret: {}", e)))?;
    mac.update(encoded_payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| AuthError::BadSignedRequest("Signature mismatch".to_string()))?;

    let payload = URL_SAFE_NO_PAD
        .decode(encoded_payload)
        .map_err(|e| AuthError::BadSignedRequest(format!("Invalid payload encoding: {}", e)))?;

    let request: SignedRequest = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::BadSignedRequest(format!("Invalid payload: {}", e)))?;

    if !request.algorithm.eq_ignore_ascii_case("HMAC-SHA256") {
        return Err(AuthError::BadSignedRequest(format!(
            "Unsupported algorithm: {}",
            request.algorithm
        )));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "app-secret";

    fn sign(encoded_payload: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(encoded_payload.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    fn make_signed_request(payload: &serde_json::Value, secret: &str) -> String {
        let encoded_payload = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}", sign(&encoded_payload, secret), encoded_payload)
    }

    #[test]
    fn decodes_a_valid_request() {
        let payload = json!({
            "algorithm": "HMAC-SHA256",
            "user_id": "12345",
            "oauth_token": "token-abc",
            "issued_at": 1334415600,
        });

        let decoded = decode_signed_request(&make_signed_request(&payload, SECRET), SECRET).unwrap();
        assert_eq!(decoded.user_id.as_deref(), Some("12345"));
        assert_eq!(decoded.oauth_token.as_deref(), Some("token-abc"));
        assert_eq!(decoded.issued_at, Some(1334415600));
        assert!(decoded.code.is_none());
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = json!({"algorithm": "HMAC-SHA256", "user_id": "1"});
        let request = make_signed_request(&payload, "other-secret");

        let error = decode_signed_request(&request, SECRET).unwrap_err();
        assert!(matches!(error, AuthError::BadSignedRequest(m) if m.contains("Signature")));
    }

    #[test]
    fn rejects_tampered_payload() {
        let payload = json!({"algorithm": "HMAC-SHA256", "user_id": "1"});
        let request = make_signed_request(&payload, SECRET);

        // swap the payload for a different one, keeping the old signature
        let signature = request.split_once('.').unwrap().0;
        let forged_payload = URL_SAFE_NO_PAD.encode(
            json!({"algorithm": "HMAC-SHA256", "user_id": "2"}).to_string(),
        );
        let forged = format!("{}.{}", signature, forged_payload);

        assert!(decode_signed_request(&forged, SECRET).is_err());
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let payload = json!({"algorithm": "MD5", "user_id": "1"});
        let request = make_signed_request(&payload, SECRET);

        let error = decode_signed_request(&request, SECRET).unwrap_err();
        assert!(matches!(error, AuthError::BadSignedRequest(m) if m.contains("algorithm")));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(decode_signed_request("no-separator", SECRET).is_err());
        assert!(decode_signed_request("!!!.!!!", SECRET).is_err());
    }
}
