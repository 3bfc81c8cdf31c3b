use async_trait::async_trait;
use permcore::{
    error::BackendError,
    group::Group,
    traits::MembershipBackend,
};

use crate::SqliteBackend;
use super::group::{
    GroupRow,
    to_group,
};

async fn add_user_to_group_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    group_id: i64,
) -> Result<bool, BackendError> {
    Ok(sqlx::query(
        r#"
INSERT INTO user_group (
    user_id,
    group_id
)
VALUES ( ?1, ?2 )
ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected() > 0)
}

async fn remove_user_from_group_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    group_id: i64,
) -> Result<bool, BackendError> {
    Ok(sqlx::query(
        r#"
DELETE FROM
    user_group
WHERE
    user_id = ?1 AND
    group_id = ?2
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected() > 0)
}

async fn get_groups_for_user_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Vec<Group>, BackendError> {
    Ok(sqlx::query_as::<_, GroupRow>(
        r#"
SELECT
    "group".id,
    "group".organization,
    "group".name,
    "group".description,
    "group".created_ts
FROM
    user_group
JOIN
    "group" ON user_group.group_id = "group".id
WHERE
    user_group.user_id = ?1
ORDER BY
    "group".name
        "#,
    )
    .bind(user_id)
    .fetch_all(&*backend.pool)
    .await?
    .into_iter()
    .map(to_group)
    .collect())
}

#[async_trait]
impl MembershipBackend for SqliteBackend {
    async fn add_user_to_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<bool, BackendError> {
        add_user_to_group_sqlite(
            &self,
            user_id,
            group_id,
        ).await
    }

    async fn remove_user_from_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<bool, BackendError> {
        remove_user_from_group_sqlite(
            &self,
            user_id,
            group_id,
        ).await
    }

    async fn get_groups_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Group>, BackendError> {
        get_groups_for_user_sqlite(
            &self,
            user_id,
        ).await
    }
}

#[cfg(test)]
mod testing {
    use permcore::{
        group::DEFAULT_ORGANIZATION,
        traits::{
            GroupBackend,
            MembershipBackend,
            UserBackend,
        },
    };
    use crate::impls::tests::backend;

    #[async_std::test]
    async fn test_basic() -> anyhow::Result<()> {
        let backend = backend().await?;
        let user_id = backend.add_user("marius", "Marius").await?;
        let other_id = backend.add_user("janette", "Janette").await?;
        let devs = backend.add_group(DEFAULT_ORGANIZATION, "devs", None).await?;
        let admins = backend.add_group(DEFAULT_ORGANIZATION, "admins", None).await?;

        assert!(backend.get_groups_for_user(user_id).await?.is_empty());
        assert!(backend.add_user_to_group(user_id, devs).await?);
        // idempotent
        assert!(!backend.add_user_to_group(user_id, devs).await?);
        assert!(backend.add_user_to_group(user_id, admins).await?);
        assert!(backend.add_user_to_group(other_id, admins).await?);

        let names = backend.get_groups_for_user(user_id).await?
            .into_iter()
            .map(|group| group.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["admins", "devs"]);

        assert!(backend.remove_user_from_group(user_id, admins).await?);
        assert!(!backend.remove_user_from_group(user_id, admins).await?);
        let ids = backend.get_groups_for_user(user_id).await?
            .into_iter()
            .map(|group| group.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [devs]);
        assert_eq!(backend.get_groups_for_user(other_id).await?.len(), 1);

        // unknown user or group violates the foreign keys
        assert!(backend.add_user_to_group(user_id, 999).await.is_err());
        Ok(())
    }
}
