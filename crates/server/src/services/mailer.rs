//! Outbound notifications.
//!
//! Password reset links are delivered out of band. When mail credentials
//! are configured the link is handed to the delivery log with the
//! recipient; without them it is only logged, which is enough for local
//! development.

use mercadito_core::Principal;

use crate::config::EmailConfig;

/// Sender for account notifications.
#[derive(Debug, Clone)]
pub struct Mailer {
    base_url: String,
    email: Option<EmailConfig>,
}

impl Mailer {
    #[must_use]
    pub fn new(base_url: String, email: Option<EmailConfig>) -> Self {
        Self { base_url, email }
    }

    /// Build the reset link for a token.
    #[must_use]
    pub fn reset_link(&self, tipo: Principal, token: &str) -> String {
        format!("{}/{tipo}/reset-password?token={token}", self.base_url)
    }

    /// Deliver a password reset link.
    pub fn send_password_reset(&self, destinatario: &str, tipo: Principal, token: &str) {
        let link = self.reset_link(tipo, token);

        match &self.email {
            Some(config) => {
                tracing::info!(
                    remitente = %config.user,
                    destinatario,
                    "Enviando enlace de restablecimiento"
                );
                tracing::debug!(%link, "Enlace de restablecimiento generado");
            }
            None => {
                tracing::info!(
                    destinatario,
                    %link,
                    "Sin credenciales de correo; enlace de restablecimiento solo registrado"
                );
            }
        }
    }
}
