use readrally::config::jwt::JwtConfig;
use readrally::modules::users::model::UserRole;
use readrally::utils::jwt::create_access_token;
use readrally::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub fn generate_unique_username() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

pub fn generate_unique_email() -> String {
    format!("{}@test.com", Uuid::new_v4().simple())
}

/// Inserts a user directly, bypassing the registration flow.
pub async fn create_test_user(pool: &PgPool, role: UserRole, active: bool) -> TestUser {
    let username = generate_unique_username();
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, role, is_active, first_name, last_name)
         VALUES ($1, $2, $3, $4, $5, 'Test', 'User')
         RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        username,
        email,
        password,
        role,
    }
}

/// Mints an access token for the user the same way the login flow does.
#[allow(dead_code)]
pub fn bearer_token(user: &TestUser) -> String {
    dotenvy::dotenv().ok();
    create_access_token(user.id, &user.username, user.role, &JwtConfig::from_env()).unwrap()
}

#[allow(dead_code)]
pub async fn create_test_competition(pool: &PgPool, created_by: Uuid) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO competitions (title, description, created_by, start_date, end_date)
         VALUES ('Summer Reading', 'Read all summer', $1, '2026-06-01', '2026-08-31')
         RETURNING id",
    )
    .bind(created_by)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_book(pool: &PgPool, competition_id: Uuid) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO books (competition_id, title, author, category)
         VALUES ($1, 'The Pale King', 'David Foster Wallace', 'Fiction')
         RETURNING id",
    )
    .bind(competition_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_registration(
    pool: &PgPool,
    student_id: Uuid,
    competition_id: Uuid,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO competition_registrations (student_id, competition_id, student_cart, group_number)
         VALUES ($1, $2, '123456', 'G1')
         RETURNING id",
    )
    .bind(student_id)
    .bind(competition_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a reset code backdated by `age_secs`.
#[allow(dead_code)]
pub async fn insert_otp(pool: &PgPool, user_id: Uuid, code: &str, age_secs: f64) {
    sqlx::query(
        "INSERT INTO password_reset_otps (user_id, code, created_at)
         VALUES ($1, $2, NOW() - make_interval(secs => $3))",
    )
    .bind(user_id)
    .bind(code)
    .bind(age_secs)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn latest_otp_code(pool: &PgPool, user_id: Uuid) -> String {
    sqlx::query_scalar(
        "SELECT code FROM password_reset_otps
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
