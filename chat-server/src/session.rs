//! Signed session cookies.
//!
//! Cookie value: `<user_id>.<hex(HMAC-SHA256(secret, user_id))>`. The cookie carries no other
//! state; logging out clears it on the client.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chat_core::ChatError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Result<Self, ChatError> {
        if secret.is_empty() {
            return Err(ChatError::Config("session secret is empty".to_string()));
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| ChatError::Config(format!("invalid session secret: {}", e)))?;
        Ok(Self { mac })
    }

    pub fn sign(&self, user_id: i64) -> String {
        let mut mac = self.mac.clone();
        mac.update(user_id.to_string().as_bytes());
        let tag = mac.finalize().into_bytes();
        format!("{}.{}", user_id, hex::encode(tag))
    }

    /// Returns the user id when the signature matches (constant-time comparison).
    pub fn verify(&self, value: &str) -> Option<i64> {
        let (id_part, sig_part) = value.split_once('.')?;
        let user_id: i64 = id_part.parse().ok()?;
        let sig = hex::decode(sig_part).ok()?;

        let mut mac = self.mac.clone();
        mac.update(id_part.as_bytes());
        mac.verify_slice(&sig).ok()?;
        Some(user_id)
    }

    /// Reads and verifies the session cookie from request headers.
    pub fn session_user(&self, headers: &HeaderMap) -> Option<i64> {
        read_cookie(headers, SESSION_COOKIE).and_then(|v| self.verify(&v))
    }

    /// `Set-Cookie` value that establishes a session for `user_id`.
    pub fn set_cookie(&self, user_id: i64) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/",
            SESSION_COOKIE,
            self.sign(user_id)
        )
    }
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}
