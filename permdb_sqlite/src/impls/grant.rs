use async_trait::async_trait;
use permcore::{
    error::BackendError,
    grant::Grant,
    principal::Principal,
    role::Role,
    scope::Scope,
    traits::GrantBackend,
};
use sqlx::SqliteConnection;

use crate::SqliteBackend;
use super::util::{
    group_id,
    group_ref,
    refresh_authorization_ts,
};

async fn insert_grant_conn(
    conn: &mut SqliteConnection,
    grant: &Grant,
) -> Result<bool, BackendError> {
    let project_id = grant.scope.project_id();
    let role = grant.role.as_str();
    let result = match grant.principal {
        Principal::User(user_id) => sqlx::query(
            r#"
INSERT INTO user_grant (
    user_id,
    project_id,
    role
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .bind(role)
        .execute(&mut *conn)
        .await?,
        ref principal => sqlx::query(
            r#"
INSERT INTO group_grant (
    group_id,
    project_id,
    role
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT DO NOTHING
            "#,
        )
        .bind(principal.group_ref().as_ref().and_then(group_id))
        .bind(project_id)
        .bind(role)
        .execute(&mut *conn)
        .await?,
    };
    Ok(result.rows_affected() > 0)
}

async fn delete_grant_conn(
    conn: &mut SqliteConnection,
    grant: &Grant,
) -> Result<bool, BackendError> {
    let project_id = grant.scope.project_id();
    let role = grant.role.as_str();
    let result = match grant.principal {
        Principal::User(user_id) => sqlx::query(
            r#"
DELETE FROM
    user_grant
WHERE
    user_id = ?1 AND
    project_id IS ?2 AND
    role = ?3
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .bind(role)
        .execute(&mut *conn)
        .await?,
        ref principal => sqlx::query(
            r#"
DELETE FROM
    group_grant
WHERE
    group_id IS ?1 AND
    project_id IS ?2 AND
    role = ?3
            "#,
        )
        .bind(principal.group_ref().as_ref().and_then(group_id))
        .bind(project_id)
        .bind(role)
        .execute(&mut *conn)
        .await?,
    };
    Ok(result.rows_affected() > 0)
}

async fn insert_grant_sqlite(
    backend: &SqliteBackend,
    grant: &Grant,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let result = insert_grant_conn(&mut *tx, grant).await?;
    if let Scope::Project(project_id) = grant.scope {
        refresh_authorization_ts(&mut *tx, project_id).await?;
    }
    tx.commit().await?;
    Ok(result)
}

async fn delete_grant_sqlite(
    backend: &SqliteBackend,
    grant: &Grant,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let result = delete_grant_conn(&mut *tx, grant).await?;
    if let Scope::Project(project_id) = grant.scope {
        refresh_authorization_ts(&mut *tx, project_id).await?;
    }
    tx.commit().await?;
    Ok(result)
}

async fn insert_grants_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    grants: &[Grant],
) -> Result<(), BackendError> {
    if let Some(grant) = grants.iter()
        .find(|grant| grant.scope != Scope::Project(project_id))
    {
        return Err(BackendError::AppInvariantViolation(format!(
            "grant {grant} is not scoped to project id {project_id}"
        )));
    }
    let mut tx = backend.pool.begin().await?;
    match insert_batch_conn(&mut *tx, project_id, grants).await {
        Ok(inserted) => {
            tx.commit().await?;
            log::debug!(
                "inserted {inserted} of {} grant(s) for project id {project_id}",
                grants.len(),
            );
            Ok(())
        }
        Err(e) => {
            log::warn!("rolling back grants for project id {project_id}: {e}");
            tx.rollback().await?;
            Err(e)
        }
    }
}

async fn insert_batch_conn(
    conn: &mut SqliteConnection,
    project_id: i64,
    grants: &[Grant],
) -> Result<usize, BackendError> {
    let mut inserted = 0;
    for grant in grants.iter() {
        if insert_grant_conn(&mut *conn, grant).await? {
            inserted += 1;
        }
    }
    refresh_authorization_ts(&mut *conn, project_id).await?;
    Ok(inserted)
}

async fn get_roles_for_principal_sqlite(
    backend: &SqliteBackend,
    principal: &Principal,
    scope: &Scope,
) -> Result<Vec<Role>, BackendError> {
    let project_id = scope.project_id();
    let roles = match principal {
        Principal::User(user_id) => sqlx::query_scalar::<_, String>(
            r#"
SELECT
    role
FROM
    user_grant
WHERE
    user_id = ?1 AND
    project_id IS ?2
ORDER BY
    role
            "#,
        )
        .bind(*user_id)
        .bind(project_id)
        .fetch_all(&*backend.pool)
        .await?,
        principal => sqlx::query_scalar::<_, String>(
            r#"
SELECT
    role
FROM
    group_grant
WHERE
    group_id IS ?1 AND
    project_id IS ?2
ORDER BY
    role
            "#,
        )
        .bind(principal.group_ref().as_ref().and_then(group_id))
        .bind(project_id)
        .fetch_all(&*backend.pool)
        .await?,
    };
    Ok(roles.into_iter()
        .map(Role::from)
        .collect())
}

async fn get_grants_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
) -> Result<Vec<Grant>, BackendError> {
    let scope = Scope::Project(project_id);
    let mut tx = backend.pool.begin().await?;
    let users = sqlx::query_as::<_, (i64, String)>(
        r#"
SELECT
    user_id,
    role
FROM
    user_grant
WHERE
    project_id = ?1
ORDER BY
    id
        "#,
    )
    .bind(project_id)
    .fetch_all(&mut *tx)
    .await?;
    let groups = sqlx::query_as::<_, (Option<i64>, String)>(
        r#"
SELECT
    group_id,
    role
FROM
    group_grant
WHERE
    project_id = ?1
ORDER BY
    id
        "#,
    )
    .bind(project_id)
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(groups.into_iter()
        .map(|(group_id, role)| Grant::new(group_ref(group_id), role, scope))
        .chain(users.into_iter()
            .map(|(user_id, role)| Grant::new(Principal::User(user_id), role, scope))
        )
        .collect())
}

async fn count_grants_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
) -> Result<i64, BackendError> {
    Ok(sqlx::query_scalar::<_, i64>(
        r#"
SELECT
    (SELECT COUNT(*) FROM user_grant WHERE project_id = ?1) +
    (SELECT COUNT(*) FROM group_grant WHERE project_id = ?1)
        "#,
    )
    .bind(project_id)
    .fetch_one(&*backend.pool)
    .await?)
}

#[async_trait]
impl GrantBackend for SqliteBackend {
    async fn insert_grant(
        &self,
        grant: &Grant,
    ) -> Result<bool, BackendError> {
        insert_grant_sqlite(
            &self,
            grant,
        ).await
    }

    async fn delete_grant(
        &self,
        grant: &Grant,
    ) -> Result<bool, BackendError> {
        delete_grant_sqlite(
            &self,
            grant,
        ).await
    }

    async fn insert_grants_for_project(
        &self,
        project_id: i64,
        grants: &[Grant],
    ) -> Result<(), BackendError> {
        insert_grants_for_project_sqlite(
            &self,
            project_id,
            grants,
        ).await
    }

    async fn get_roles_for_principal(
        &self,
        principal: &Principal,
        scope: &Scope,
    ) -> Result<Vec<Role>, BackendError> {
        get_roles_for_principal_sqlite(
            &self,
            principal,
            scope,
        ).await
    }

    async fn get_grants_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<Grant>, BackendError> {
        get_grants_for_project_sqlite(
            &self,
            project_id,
        ).await
    }

    async fn count_grants_for_project(
        &self,
        project_id: i64,
    ) -> Result<i64, BackendError> {
        count_grants_for_project_sqlite(
            &self,
            project_id,
        ).await
    }
}
