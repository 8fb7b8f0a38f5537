//! HS256 JWT signing for [`crate::sink::JwtResultSink`].
//!
//! Deliberately minimal: one compact-serialization signer, no verification,
//! no algorithm negotiation. A full JOSE implementation is out of scope for
//! this crate's single signed-delivery use case.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::error::SinkError;

type HmacSha256 = Hmac<Sha256>;

/// Signs `claims` as a compact HS256 JWT, stamping `iss` from `issuer` when
/// `claims` is a JSON object and an issuer is given.
pub fn sign_hs256(claims: &Value, secret: &str, issuer: Option<&str>) -> Result<String, SinkError> {
    let mut payload = claims.clone();
    if let (Some(issuer), Value::Object(map)) = (issuer, &mut payload) {
        map.insert("iss".to_string(), Value::String(issuer.to_string()));
    }

    let header = json!({ "alg": "HS256", "typ": "JWT" });
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
    let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload)?);
    let signing_input = format!("{header_b64}.{payload_b64}");

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SinkError::Signing(e.to_string()))?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_b64}"))
}
