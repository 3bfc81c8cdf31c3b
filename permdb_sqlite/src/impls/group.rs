use async_trait::async_trait;
use permcore::{
    error::BackendError,
    group::Group,
    traits::GroupBackend,
};

use crate::{
    SqliteBackend,
    chrono::Utc,
};

pub(crate) type GroupRow = (i64, String, String, Option<String>, i64);

pub(crate) fn to_group((id, organization, name, description, created_ts): GroupRow) -> Group {
    Group { id, organization, name, description, created_ts }
}

async fn add_group_sqlite(
    backend: &SqliteBackend,
    organization: &str,
    name: &str,
    description: Option<&str>,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO "group" (
    organization,
    name,
    description,
    created_ts
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(organization)
    .bind(name)
    .bind(description)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_group_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Group>, BackendError> {
    let rec = sqlx::query_as::<_, GroupRow>(
        r#"
SELECT
    id,
    organization,
    name,
    description,
    created_ts
FROM
    "group"
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_group))
}

async fn get_group_by_name_sqlite(
    backend: &SqliteBackend,
    organization: &str,
    name: &str,
) -> Result<Option<Group>, BackendError> {
    let rec = sqlx::query_as::<_, GroupRow>(
        r#"
SELECT
    id,
    organization,
    name,
    description,
    created_ts
FROM
    "group"
WHERE
    organization = ?1 AND
    name = ?2
        "#,
    )
    .bind(organization)
    .bind(name)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_group))
}

#[async_trait]
impl GroupBackend for SqliteBackend {
    async fn add_group(
        &self,
        organization: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError> {
        add_group_sqlite(
            &self,
            organization,
            name,
            description,
        ).await
    }

    async fn get_group_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Group>, BackendError> {
        get_group_by_id_sqlite(
            &self,
            id,
        ).await
    }

    async fn get_group_by_name(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Option<Group>, BackendError> {
        get_group_by_name_sqlite(
            &self,
            organization,
            name,
        ).await
    }
}
