use sqlx::PgPool;

use crate::modules::users::model::UserRole;
use crate::utils::password::hash_password;

/// Creates an already-active admin account. Admins are bootstrapped from the
/// command line; the registration flow only produces students.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (username, email, password, role, is_active, first_name, last_name)
         VALUES ($1, $2, $3, $4, TRUE, $5, $6)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .bind(first_name)
    .bind(last_name)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
