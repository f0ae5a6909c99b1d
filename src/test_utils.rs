pub mod test_helpers {
    use crate::models::Company;
    use crate::repositories::{SqliteReminderRepository, SqliteUserRepository};
    use crate::services::CompanyCatalog;
    use crate::AppState;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    pub const TEST_JWT_SECRET: &[u8] = b"test-secret-with-at-least-32-bytes!!";

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Insert a test user with hashed password, returning its id
    pub async fn insert_test_user(
        pool: &SqlitePool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, sqlx::Error> {
        let password_hash = crate::services::password::hash_password(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

        Ok(id)
    }

    /// Write catalog CSV contents to a temporary file
    pub fn write_catalog_file(contents: &str) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    /// A small fixed catalog: one fixed-window company and one custom one
    pub fn test_companies() -> Vec<Company> {
        vec![
            Company {
                id: "gmail".to_string(),
                name: "Gmail".to_string(),
                days_before_deactivation: 730,
                policy_link: Some("https://support.google.com/accounts/answer/12418290".to_string()),
                activities_to_avoid_deactivation: Some("Sign in".to_string()),
            },
            Company {
                id: "twitter".to_string(),
                name: "Twitter".to_string(),
                days_before_deactivation: 30,
                policy_link: None,
                activities_to_avoid_deactivation: None,
            },
            Company {
                id: "paypal".to_string(),
                name: "PayPal".to_string(),
                days_before_deactivation: 0,
                policy_link: None,
                activities_to_avoid_deactivation: None,
            },
        ]
    }

    /// Application state over a test database and the fixed test catalog
    pub fn create_test_state(pool: &SqlitePool) -> AppState {
        AppState::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteReminderRepository::new(pool.clone())),
            Arc::new(CompanyCatalog::from_companies(test_companies())),
            TEST_JWT_SECRET,
        )
    }
}

// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
