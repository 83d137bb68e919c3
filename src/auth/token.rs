use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::TokenConfig;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Issued at login; carries the authenticated identity between requests.
    Session,
    /// Issued by the reset-request flow; authorizes one password change
    /// without a live session.
    Reset,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub iat: usize,
    pub exp: usize,
    pub kind: TokenKind,
}

/// HS256 signer/verifier over the process-wide secret key. Tokens are
/// self-contained; verification is stateless and needs no storage lookup.
#[derive(Clone)]
pub struct TokenKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub session_ttl: Duration,
    pub remember_ttl: Duration,
    pub reset_ttl: Duration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        let TokenConfig {
            secret,
            session_ttl_minutes,
            remember_ttl_minutes,
            reset_ttl_seconds,
        } = state.config.token.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::minutes(session_ttl_minutes),
            remember_ttl: Duration::minutes(remember_ttl_minutes),
            reset_ttl: Duration::seconds(reset_ttl_seconds),
        }
    }
}

impl TokenKeys {
    fn sign_with(&self, user_id: i64, kind: TokenKind, ttl: Duration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + ttl).unix_timestamp() as usize,
            kind,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, "token signed");
        Ok(token)
    }

    pub fn sign_session(&self, user_id: i64, remember: bool) -> anyhow::Result<String> {
        let ttl = if remember {
            self.remember_ttl
        } else {
            self.session_ttl
        };
        self.sign_with(user_id, TokenKind::Session, ttl)
    }

    pub fn sign_reset(&self, user_id: i64) -> anyhow::Result<String> {
        self.sign_with(user_id, TokenKind::Reset, self.reset_ttl)
    }

    /// Signature and expiry are checked in one step. Zero leeway: a token
    /// is rejected from the instant its expiry passes.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "token verified");
        Ok(data.claims)
    }

    /// Malformed, tampered, expired, and wrong-kind tokens all collapse
    /// to `None`; the caller never sees which.
    pub fn verify_reset(&self, token: &str) -> Option<i64> {
        self.verify(token)
            .ok()
            .filter(|c| c.kind == TokenKind::Reset)
            .map(|c| c.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> TokenKeys {
        let state = AppState::fake();
        TokenKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_session_token() {
        let keys = make_keys();
        let token = keys.sign_session(42, false).expect("sign session");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.kind, TokenKind::Session);
    }

    #[tokio::test]
    async fn remember_extends_session_expiry() {
        let keys = make_keys();
        let short = keys.sign_session(1, false).expect("sign");
        let long = keys.sign_session(1, true).expect("sign");
        let short_exp = keys.verify(&short).expect("verify").exp;
        let long_exp = keys.verify(&long).expect("verify").exp;
        assert!(long_exp > short_exp);
    }

    #[tokio::test]
    async fn reset_token_verifies_to_its_user() {
        let keys = make_keys();
        let token = keys.sign_reset(7).expect("sign reset");
        assert_eq!(keys.verify_reset(&token), Some(7));
    }

    #[tokio::test]
    async fn session_token_is_not_a_reset_token() {
        let keys = make_keys();
        let token = keys.sign_session(7, false).expect("sign session");
        assert_eq!(keys.verify_reset(&token), None);
    }

    #[tokio::test]
    async fn tampered_token_fails_verification() {
        let keys = make_keys();
        let token = keys.sign_reset(7).expect("sign reset");
        // Flip one character in the payload segment.
        let mid = token.len() / 2;
        let mut bytes = token.clone().into_bytes();
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).expect("still utf8");
        assert_ne!(token, tampered);
        assert_eq!(keys.verify_reset(&tampered), None);
    }

    #[tokio::test]
    async fn expired_reset_token_fails_verification() {
        let mut keys = make_keys();
        keys.reset_ttl = Duration::seconds(-5);
        let token = keys.sign_reset(7).expect("sign reset");
        assert_eq!(keys.verify_reset(&token), None);
    }

    #[tokio::test]
    async fn garbage_strings_collapse_to_none() {
        let keys = make_keys();
        assert_eq!(keys.verify_reset(""), None);
        assert_eq!(keys.verify_reset("not.a.token"), None);
        assert_eq!(keys.verify_reset("a.b"), None);
    }

    #[tokio::test]
    async fn different_secret_rejects_token() {
        let keys = make_keys();
        let other = TokenKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            session_ttl: keys.session_ttl,
            remember_ttl: keys.remember_ttl,
            reset_ttl: keys.reset_ttl,
        };
        let token = keys.sign_reset(7).expect("sign reset");
        assert_eq!(other.verify_reset(&token), None);
    }
}
