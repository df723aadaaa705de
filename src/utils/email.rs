use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        to_name: &str,
        activation_link: &str,
    ) -> Result<(), AppError> {
        let html_body = self.verification_template(to_name, activation_link);
        let text_body = format!(
            "Hi {},\n\n\
             Welcome to ReadRally!\n\n\
             Click the link below to verify your account:\n\
             {}\n\n\
             If you didn't sign up, please ignore this email.\n\n\
             Best regards,\n\
             ReadRally Team",
            to_name, activation_link
        );

        self.send_email(to_email, "Verify your email", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, code))]
    pub async fn send_otp_email(
        &self,
        to_email: &str,
        to_name: &str,
        code: &str,
    ) -> Result<(), AppError> {
        let html_body = self.otp_template(to_name, code);
        let text_body = format!(
            "Hi {},\n\n\
             You requested to reset your password.\n\n\
             Your one-time code is: {}\n\n\
             This code will expire in 10 minutes.\n\n\
             If you didn't request this, please ignore this email.\n\n\
             Best regards,\n\
             ReadRally Team",
            to_name, code
        );

        self.send_email(to_email, "Password Reset Code", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, body = %text_body, "SMTP disabled, logging email instead");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from.parse().map_err(|e| {
                AppError::internal(anyhow::anyhow!("Invalid from email: {}", e))
            })?)
            .to(to_email.parse().map_err(|e| {
                AppError::internal(anyhow::anyhow!("Invalid to email: {}", e))
            })?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal(anyhow::anyhow!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn verification_template(&self, name: &str, activation_link: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="margin: 0 auto; background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="background-color: #0F766E; padding: 24px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff;">ReadRally</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 32px;">
                <h2 style="color: #333333;">Verify your email</h2>
                <p style="color: #666666;">Hi <strong>{}</strong>,</p>
                <p style="color: #666666;">Click the button below to activate your account:</p>
                <p style="text-align: center; margin: 28px 0;">
                    <a href="{}" style="display: inline-block; padding: 12px 36px; background-color: #0F766E; color: #ffffff; text-decoration: none; border-radius: 6px; font-weight: bold;">Verify Email</a>
                </p>
                <p style="color: #666666; font-size: 14px;">Or copy this link into your browser:</p>
                <p style="color: #0F766E; font-size: 14px; word-break: break-all;">{}</p>
                <p style="color: #666666; font-size: 14px;">If you didn't sign up, you can safely ignore this email.</p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
            name, activation_link, activation_link
        )
    }

    fn otp_template(&self, name: &str, code: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="margin: 0 auto; background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="background-color: #0F766E; padding: 24px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff;">ReadRally</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 32px;">
                <h2 style="color: #333333;">Password Reset Code</h2>
                <p style="color: #666666;">Hi <strong>{}</strong>,</p>
                <p style="color: #666666;">Use this one-time code to reset your password:</p>
                <p style="text-align: center; margin: 28px 0;">
                    <span style="display: inline-block; padding: 12px 36px; background-color: #f1f5f9; color: #0F766E; border-radius: 6px; font-size: 28px; font-weight: bold; letter-spacing: 6px;">{}</span>
                </p>
                <p style="color: #666666; font-size: 14px;"><strong>This code will expire in 10 minutes.</strong></p>
                <p style="color: #666666; font-size: 14px;">If you didn't request this, please ignore this email.</p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
            name, code
        )
    }
}
