use async_trait::async_trait;
use tracing::info;

/// Outbound mail seam. The core only ever hands off a password-reset
/// message; delivery is fire-and-forget from the caller's perspective.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, reset_url: &str) -> anyhow::Result<()>;
}

/// Default mailer: writes the message to the log instead of a wire.
/// A real SMTP implementation plugs in behind the same trait.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, reset_url: &str) -> anyhow::Result<()> {
        info!(
            to = %to,
            subject = "Password Reset Request",
            body = %format!(
                "To reset your password, visit the link below:\n{}\n\
                 If you did not make this request then simply ignore this email \
                 and no changes will be made.",
                reset_url
            ),
            "password reset mail"
        );
        Ok(())
    }
}

/// Test mailer that drops everything.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_password_reset(&self, _to: &str, _reset_url: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
