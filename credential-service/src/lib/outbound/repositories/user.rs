use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::CredentialRecord;
use crate::domain::user::models::Identity;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct IdentityRow {
    id: i64,
    email: String,
}

impl From<IdentityRow> for Identity {
    fn from(row: IdentityRow) -> Self {
        Identity {
            id: UserId(row.id),
            email: row.email,
        }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        CredentialRecord {
            identity: Identity {
                id: UserId(row.id),
                email: row.email,
            },
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, UserError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map(Identity::from)
        .map_err(|e| UserError::InsertionFailure(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, UserError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(CredentialRecord::from))
    }

    async fn list_all(&self) -> Result<Vec<Identity>, UserError> {
        let rows = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Identity::from).collect())
    }
}
