// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
/** Session token generation for authenticated customers
A token is the URL-safe base64 (no padding) encoding of a small JSON
payload naming the subject, the issue instant and a random nonce.
Tokens are not signed; they identify a subject and nothing more. */
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;

/// Nonce size in bytes (16 bytes = 128 bits of entropy)
const NONCE_BYTES: usize = 16;

#[derive(Serialize)]
struct TokenPayload<'a> {
    sub: &'a str,
    iat: i64,
    nonce: String,
}

/** Issue a session token for an authenticated subject
# Arguments
* `subject_id` - Identifier of the authenticated customer
# Returns
A base64 URL-safe encoded string without padding */
pub fn issue_session_token(subject_id: &str) -> String {
    issue_session_token_at(subject_id, chrono::Utc::now().timestamp_millis())
}

fn issue_session_token_at(subject_id: &str, issued_at_millis: i64) -> String {
    let mut nonce = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut nonce);

    let payload = TokenPayload {
        sub: subject_id,
        iat: issued_at_millis,
        nonce: hex::encode(nonce),
    };
    // Serializing a struct of strings and an integer cannot fail.
    let json = serde_json::to_vec(&payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}
