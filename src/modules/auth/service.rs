use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::config::otp::OtpConfig;
use crate::config::verification::VerificationConfig;
use crate::modules::users::model::UserRole;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::jwt::issue_token_pair;
use crate::utils::otp::{generate_otp_code, otp_is_expired};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::verification::{
    check_verification_token, decode_uid, encode_uid, make_verification_token,
};

use super::model::{
    LoginRequest, LoginResponse, RegisterRequestDto, ResetPasswordWithOtpDto, VerifyEmailResponse,
};

/// Row selected wherever the password hash or active flag matters.
/// Never serialized.
#[derive(sqlx::FromRow)]
struct UserAuthRow {
    id: Uuid,
    username: String,
    first_name: String,
    email: String,
    password: String,
    role: UserRole,
    is_active: bool,
}

const AUTH_ROW_COLUMNS: &str = "id, username, first_name, email, password, role, is_active";

pub struct AuthService;

impl AuthService {
    /// Creates an inactive user and dispatches the activation link.
    ///
    /// The stricter activation variant: accounts stay inactive until the
    /// emailed link is followed. Mail dispatch is fire-and-forget; a
    /// delivery failure is logged, never surfaced to the registrant.
    #[instrument(skip(db, dto, jwt_config, email_config))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
        email_config: &EmailConfig,
    ) -> Result<(), AppError> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE username = $1 OR email = $2")
                .bind(&dto.username)
                .bind(&dto.email)
                .fetch_optional(db)
                .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A user with this username or email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user_id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (username, email, password, role, is_active, first_name, last_name, father_name, department, faculty)
             VALUES ($1, $2, $3, $4, FALSE, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(UserRole::Student)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.father_name)
        .bind(&dto.department)
        .bind(&dto.faculty)
        .fetch_one(db)
        .await?;

        let uid = encode_uid(user_id);
        let token = make_verification_token(user_id, &hashed_password, false, &jwt_config.secret);
        let activation_link = format!(
            "{}/api/verify-email/{}/{}",
            email_config.base_url, uid, token
        );

        let mailer = EmailService::new(email_config.clone());
        let to_email = dto.email.clone();
        let to_name = dto.first_name.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_verification_email(&to_email, &to_name, &activation_link)
                .await
            {
                warn!(error = %e.error, "Failed to send verification email");
            }
        });

        Ok(())
    }

    /// Authenticates by username and password.
    ///
    /// Missing user, wrong password, and inactive account all fail with the
    /// same 401 so nothing about account state leaks.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let query = format!("SELECT {} FROM users WHERE username = $1", AUTH_ROW_COLUMNS);
        let user = sqlx::query_as::<_, UserAuthRow>(&query)
            .bind(&dto.username)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Invalid username or password"))
            })?;

        let is_valid = verify_password(&dto.password, &user.password)?;
        if !is_valid || !user.is_active {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid username or password"
            )));
        }

        let pair = issue_token_pair(user.id, &user.username, user.role, jwt_config)?;

        Ok(LoginResponse {
            access: pair.access,
            refresh: pair.refresh,
            role: user.role,
        })
    }

    /// Consumes an activation link: `Registered(inactive)` -> `Verified(active)`.
    ///
    /// The token is derived from the account's state fingerprint, so
    /// activation itself invalidates the link. A repeated request lands in
    /// the token check and fails; it can never activate twice.
    #[instrument(skip(db, jwt_config, verification_config))]
    pub async fn verify_email(
        db: &PgPool,
        uid: &str,
        token: &str,
        jwt_config: &JwtConfig,
        verification_config: &VerificationConfig,
    ) -> Result<VerifyEmailResponse, AppError> {
        let user_id = decode_uid(uid)?;

        let query = format!("SELECT {} FROM users WHERE id = $1", AUTH_ROW_COLUMNS);
        let user = sqlx::query_as::<_, UserAuthRow>(&query)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid activation link")))?;

        let token_ok = check_verification_token(
            token,
            user.id,
            &user.password,
            user.is_active,
            &jwt_config.secret,
            verification_config.token_ttl_secs,
        );
        if !token_ok {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Token expired or invalid"
            )));
        }

        sqlx::query("UPDATE users SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(db)
            .await?;

        let pair = issue_token_pair(user.id, &user.username, user.role, jwt_config)?;

        Ok(VerifyEmailResponse {
            message: "Email verified. You are now logged in.".to_string(),
            access: pair.access,
            refresh: pair.refresh,
        })
    }

    /// Request phase of the OTP reset: uniform outcome whether or not the
    /// email exists, so account existence never leaks through this endpoint.
    #[instrument(skip(db, email, email_config))]
    pub async fn request_otp_reset(
        db: &PgPool,
        email: &str,
        email_config: &EmailConfig,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct OtpTarget {
            id: Uuid,
            first_name: String,
            email: String,
        }

        let user = sqlx::query_as::<_, OtpTarget>(
            "SELECT id, first_name, email FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            return Ok(());
        };

        let code = generate_otp_code();

        sqlx::query("INSERT INTO password_reset_otps (user_id, code) VALUES ($1, $2)")
            .bind(user.id)
            .bind(&code)
            .execute(db)
            .await?;

        let mailer = EmailService::new(email_config.clone());
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_otp_email(&user.email, &user.first_name, &code)
                .await
            {
                warn!(error = %e.error, "Failed to send OTP email");
            }
        });

        Ok(())
    }

    /// Reset phase: resolves the user and the latest matching code, enforces
    /// the validity window, then rotates the password and spends the code in
    /// one transaction.
    ///
    /// User-not-found and code-not-found collapse into the same error so the
    /// response never reveals which part was wrong. The `DELETE .. RETURNING`
    /// is the consumption point: of two concurrent resets using the same
    /// code, exactly one sees the row.
    #[instrument(skip(db, dto, otp_config))]
    pub async fn reset_password_with_otp(
        db: &PgPool,
        dto: ResetPasswordWithOtpDto,
        otp_config: &OtpConfig,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct OtpRow {
            id: Uuid,
            created_at: DateTime<Utc>,
        }

        let user_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        let user_id = user_id
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid OTP or email")))?;

        // Only the most recently issued code for this user is authoritative.
        let otp = sqlx::query_as::<_, OtpRow>(
            "SELECT id, created_at FROM password_reset_otps
             WHERE user_id = $1 AND code = $2
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(user_id)
        .bind(&dto.otp)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid OTP or email")))?;

        if otp_is_expired(otp.created_at, Utc::now(), otp_config.ttl_secs) {
            return Err(AppError::bad_request(anyhow::anyhow!("OTP has expired")));
        }

        let hashed_password = hash_password(&dto.new_password)?;

        let mut tx = db.begin().await?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&hashed_password)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let consumed: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM password_reset_otps WHERE id = $1 RETURNING id")
                .bind(otp.id)
                .fetch_optional(&mut *tx)
                .await?;

        if consumed.is_none() {
            // A concurrent reset spent this code first; roll everything back.
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid OTP or email")));
        }

        // Outstanding codes for this user are dead after a successful reset.
        sqlx::query("DELETE FROM password_reset_otps WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
