//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionStore, UserDirectory, UserField};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user directory and session store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete sessions older than `max_age`
    pub async fn cleanup_expired(&self, max_age: chrono::Duration) -> AuthResult<u64> {
        let Some(cutoff) = Utc::now().checked_sub_signed(max_age) else {
            return Ok(0);
        };

        let deleted = sqlx::query("DELETE FROM user_sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired user sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Directory Implementation
// ============================================================================

impl UserDirectory for PgAuthRepository {
    async fn find_by_field(&self, field: UserField, value: &str) -> AuthResult<Vec<User>> {
        let rows = match field {
            UserField::Email => {
                let Ok(email) = Email::new(value) else {
                    return Ok(Vec::new());
                };
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        id,
                        email,
                        password_hash,
                        first_name,
                        last_name,
                        created_at,
                        updated_at
                    FROM users
                    WHERE email = $1
                    ORDER BY created_at
                    "#,
                )
                .bind(email.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn create(&self, user_id: &UserId) -> AuthResult<SessionId> {
        loop {
            let session = Session::new(*user_id);
            let inserted = sqlx::query(
                r#"
                INSERT INTO user_sessions (session_id, user_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (session_id) DO NOTHING
                "#,
            )
            .bind(session.session_id.as_uuid())
            .bind(session.user_id.as_uuid())
            .bind(session.created_at)
            .execute(&self.pool)
            .await?
            .rows_affected();

            if inserted == 1 {
                return Ok(session.session_id);
            }
            tracing::warn!("Session id collision, regenerating");
        }
    }

    async fn lookup(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, created_at
            FROM user_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn destroy(&self, session_id: &SessionId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM user_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn len(&self) -> AuthResult<usize> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_sessions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as usize)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        }
    }
}
