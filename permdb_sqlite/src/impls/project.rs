use async_trait::async_trait;
use permcore::{
    error::BackendError,
    project::Project,
    traits::ProjectBackend,
};

use crate::{
    SqliteBackend,
    chrono::Utc,
};

type ProjectRow = (i64, String, String, String, i64, Option<i64>);

fn to_project(
    (id, key, qualifier, name, created_ts, authorization_updated_ts): ProjectRow,
) -> Project {
    Project { id, key, qualifier, name, created_ts, authorization_updated_ts }
}

async fn add_project_sqlite(
    backend: &SqliteBackend,
    key: &str,
    qualifier: &str,
    name: &str,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO project (
    project_key,
    qualifier,
    name,
    created_ts
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(key)
    .bind(qualifier)
    .bind(name)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_project_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Project>, BackendError> {
    let rec = sqlx::query_as::<_, ProjectRow>(
        r#"
SELECT
    id,
    project_key,
    qualifier,
    name,
    created_ts,
    authorization_updated_ts
FROM
    project
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_project))
}

async fn get_project_by_key_sqlite(
    backend: &SqliteBackend,
    key: &str,
) -> Result<Option<Project>, BackendError> {
    let rec = sqlx::query_as::<_, ProjectRow>(
        r#"
SELECT
    id,
    project_key,
    qualifier,
    name,
    created_ts,
    authorization_updated_ts
FROM
    project
WHERE
    project_key = ?1
        "#,
    )
    .bind(key)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec.map(to_project))
}

#[async_trait]
impl ProjectBackend for SqliteBackend {
    async fn add_project(
        &self,
        key: &str,
        qualifier: &str,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_project_sqlite(
            &self,
            key,
            qualifier,
            name,
        ).await
    }

    async fn get_project_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Project>, BackendError> {
        get_project_by_id_sqlite(
            &self,
            id,
        ).await
    }

    async fn get_project_by_key(
        &self,
        key: &str,
    ) -> Result<Option<Project>, BackendError> {
        get_project_by_key_sqlite(
            &self,
            key,
        ).await
    }
}

#[cfg(test)]
mod testing {
    use permcore::{
        project::{
            Project,
            qualifier,
        },
        traits::ProjectBackend,
    };
    use crate::impls::tests::backend;

    #[async_std::test]
    async fn test_basic() -> anyhow::Result<()> {
        let backend = backend().await?;
        let id = backend.add_project("org.example:demo", qualifier::PROJECT, "Demo").await?;
        let project = backend.get_project_by_key("org.example:demo").await?
            .expect("project is missing?");
        assert_eq!(project, Project {
            id,
            key: "org.example:demo".to_string(),
            qualifier: "TRK".to_string(),
            name: "Demo".to_string(),
            created_ts: 1234567890,
            authorization_updated_ts: None,
        });
        assert_eq!(backend.get_project_by_id(id).await?, Some(project));
        assert_eq!(backend.get_project_by_key("org.example:other").await?, None);
        assert!(backend.add_project("org.example:demo", qualifier::VIEW, "Dupe").await.is_err());
        Ok(())
    }
}
