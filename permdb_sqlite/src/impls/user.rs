use async_trait::async_trait;
use permcore::{
    error::BackendError,
    traits::UserBackend,
    user::User,
};

use crate::{
    SqliteBackend,
    chrono::Utc,
};

type UserRow = (i64, String, String, i64);

fn to_user((id, login, name, created_ts): UserRow) -> User {
    User { id, login, name, created_ts }
}

async fn add_user_sqlite(
    backend: &SqliteBackend,
    login: &str,
    name: &str,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO "user" (
    login,
    name,
    created_ts
)
VALUES ( ?1, ?2, ?3 )
        "#,
    )
    .bind(login)
    .bind(name)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_user_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<User>, BackendError> {
    let rec = sqlx::query_as::<_, UserRow>(
        r#"
SELECT
    id,
    login,
    name,
    created_ts
FROM
    "user"
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_user))
}

async fn get_user_by_login_sqlite(
    backend: &SqliteBackend,
    login: &str,
) -> Result<Option<User>, BackendError> {
    let rec = sqlx::query_as::<_, UserRow>(
        r#"
SELECT
    id,
    login,
    name,
    created_ts
FROM
    "user"
WHERE
    login = ?1
        "#,
    )
    .bind(login)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_user))
}

#[async_trait]
impl UserBackend for SqliteBackend {
    async fn add_user(
        &self,
        login: &str,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_user_sqlite(
            &self,
            login,
            name,
        ).await
    }

    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_id_sqlite(
            &self,
            id,
        ).await
    }

    async fn get_user_by_login(
        &self,
        login: &str,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_login_sqlite(
            &self,
            login,
        ).await
    }
}
