// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound email delivery over SMTP.
//!
//! Failures never propagate past this boundary: every error is logged and
//! reported to the caller as `false`.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::models::EmailSettings;

/// Sends notification emails using the SMTP settings stored by the admin.
///
/// The transport is built per send because the settings can change at
/// runtime. STARTTLS is required; plaintext sessions are never used.
#[derive(Clone, Default)]
pub struct Mailer;

impl Mailer {
    /// Deliver one HTML email to all recipients. Returns whether the
    /// submission succeeded.
    pub async fn send(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
        settings: &EmailSettings,
    ) -> bool {
        match self.try_send(subject, body, recipients, settings).await {
            Ok(()) => {
                tracing::info!(?recipients, subject, "Email sent");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to send email");
                false
            }
        }
    }

    async fn try_send(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
        settings: &EmailSettings,
    ) -> anyhow::Result<()> {
        let from: Mailbox = settings.from_email.parse()?;

        let mut builder = Message::builder()
            .from(from)
            .subject(subject)
            .header(ContentType::TEXT_HTML);
        for recipient in recipients {
            builder = builder.to(recipient.parse()?);
        }
        let message = builder.body(body.to_string())?;

        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_server)?
                .port(settings.smtp_port)
                .credentials(Credentials::new(
                    settings.smtp_username.clone(),
                    sanitize_password(&settings.smtp_password),
                ))
                .build();

        transport.send(message).await?;
        Ok(())
    }
}

/// Strip all whitespace from the SMTP password. Gmail app passwords are
/// often copied with embedded spaces or non-breaking spaces.
fn sanitize_password(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}
