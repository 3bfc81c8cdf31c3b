use async_trait::async_trait;
use futures::TryStreamExt;
use permcore::{
    error::BackendError,
    principal::GroupRef,
    role::Role,
    template::{
        GroupEntry,
        PermissionTemplate,
        UserEntry,
    },
    traits::TemplateBackend,
};
use sqlx::SqliteConnection;
use std::collections::BTreeMap;

use crate::{
    SqliteBackend,
    chrono::Utc,
};
use super::util::{
    group_id,
    group_ref,
};

type TemplateRow = (i64, String, String, Option<String>, Option<String>, i64, i64);

const SELECT_TEMPLATE: &str = r#"
SELECT
    id,
    uuid,
    name,
    description,
    key_pattern,
    created_ts,
    updated_ts
FROM
    permission_template
"#;

async fn load_entries(
    conn: &mut SqliteConnection,
    (id, uuid, name, description, key_pattern, created_ts, updated_ts): TemplateRow,
) -> Result<PermissionTemplate, BackendError> {
    let group_entries = sqlx::query_as::<_, (Option<i64>, String)>(
        r#"
SELECT
    group_id,
    role
FROM
    template_group
WHERE
    template_id = ?1
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|(group_id, role)| GroupEntry::new(group_ref(group_id), role))
    .collect();

    let user_entries = sqlx::query_as::<_, (i64, String)>(
        r#"
SELECT
    user_id,
    role
FROM
    template_user
WHERE
    template_id = ?1
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|(user_id, role)| UserEntry::new(user_id, role))
    .collect();

    let mut characteristics = BTreeMap::new();
    let mut rows = sqlx::query_as::<_, (String, bool)>(
        r#"
SELECT
    role,
    with_project_creator
FROM
    template_characteristic
WHERE
    template_id = ?1
        "#,
    )
    .bind(id)
    .fetch(&mut *conn);
    while let Some((role, with_creator)) = rows.try_next().await? {
        characteristics.insert(Role::from(role), with_creator);
    }

    Ok(PermissionTemplate {
        id,
        uuid,
        name,
        description,
        key_pattern,
        created_ts,
        updated_ts,
        group_entries,
        user_entries,
        characteristics,
    })
}

async fn touch_template(
    conn: &mut SqliteConnection,
    template_id: i64,
) -> Result<(), BackendError> {
    let ts = Utc::now().timestamp();
    sqlx::query(
        r#"
UPDATE
    permission_template
SET
    updated_ts = ?1
WHERE
    id = ?2
        "#,
    )
    .bind(ts)
    .bind(template_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn add_template_sqlite(
    backend: &SqliteBackend,
    uuid: &str,
    name: &str,
    description: Option<&str>,
    key_pattern: Option<&str>,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO permission_template (
    uuid,
    name,
    description,
    key_pattern,
    created_ts,
    updated_ts
)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?5 )
        "#,
    )
    .bind(uuid)
    .bind(name)
    .bind(description)
    .bind(key_pattern)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_template_by_column_sqlite(
    backend: &SqliteBackend,
    column: &str,
    value: &str,
) -> Result<Option<PermissionTemplate>, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rec = sqlx::query_as::<_, TemplateRow>(
        &format!("{SELECT_TEMPLATE}WHERE\n    {column} = ?1")
    )
    .bind(value)
    .fetch_optional(&mut *tx)
    .await?;
    let result = match rec {
        Some(row) => Some(load_entries(&mut *tx, row).await?),
        None => None,
    };
    tx.commit().await?;
    Ok(result)
}

async fn list_templates_sqlite(
    backend: &SqliteBackend,
) -> Result<Vec<PermissionTemplate>, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rows = sqlx::query_as::<_, TemplateRow>(
        &format!("{SELECT_TEMPLATE}ORDER BY\n    name")
    )
    .fetch_all(&mut *tx)
    .await?;
    let mut result = Vec::with_capacity(rows.len());
    for row in rows.into_iter() {
        result.push(load_entries(&mut *tx, row).await?);
    }
    tx.commit().await?;
    Ok(result)
}

async fn add_user_to_template_sqlite(
    backend: &SqliteBackend,
    template_id: i64,
    user_id: i64,
    role: &Role,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rows = sqlx::query(
        r#"
INSERT INTO template_user (
    template_id,
    user_id,
    role
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT DO NOTHING
        "#,
    )
    .bind(template_id)
    .bind(user_id)
    .bind(role.as_str())
    .execute(&mut *tx)
    .await?
    .rows_affected();
    touch_template(&mut *tx, template_id).await?;
    tx.commit().await?;
    Ok(rows > 0)
}

async fn remove_user_from_template_sqlite(
    backend: &SqliteBackend,
    template_id: i64,
    user_id: i64,
    role: &Role,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rows = sqlx::query(
        r#"
DELETE FROM
    template_user
WHERE
    template_id = ?1 AND
    user_id = ?2 AND
    role = ?3
        "#,
    )
    .bind(template_id)
    .bind(user_id)
    .bind(role.as_str())
    .execute(&mut *tx)
    .await?
    .rows_affected();
    touch_template(&mut *tx, template_id).await?;
    tx.commit().await?;
    Ok(rows > 0)
}

async fn add_group_to_template_sqlite(
    backend: &SqliteBackend,
    template_id: i64,
    group: &GroupRef,
    role: &Role,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rows = sqlx::query(
        r#"
INSERT INTO template_group (
    template_id,
    group_id,
    role
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT DO NOTHING
        "#,
    )
    .bind(template_id)
    .bind(group_id(group))
    .bind(role.as_str())
    .execute(&mut *tx)
    .await?
    .rows_affected();
    touch_template(&mut *tx, template_id).await?;
    tx.commit().await?;
    Ok(rows > 0)
}

async fn remove_group_from_template_sqlite(
    backend: &SqliteBackend,
    template_id: i64,
    group: &GroupRef,
    role: &Role,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;
    let rows = sqlx::query(
        r#"
DELETE FROM
    template_group
WHERE
    template_id = ?1 AND
    group_id IS ?2 AND
    role = ?3
        "#,
    )
    .bind(template_id)
    .bind(group_id(group))
    .bind(role.as_str())
    .execute(&mut *tx)
    .await?
    .rows_affected();
    touch_template(&mut *tx, template_id).await?;
    tx.commit().await?;
    Ok(rows > 0)
}

async fn set_template_characteristic_sqlite(
    backend: &SqliteBackend,
    template_id: i64,
    role: &Role,
    with_project_creator: bool,
) -> Result<(), BackendError> {
    let ts = Utc::now().timestamp();
    sqlx::query(
        r#"
INSERT INTO template_characteristic (
    template_id,
    role,
    with_project_creator,
    created_ts,
    updated_ts
)
VALUES ( ?1, ?2, ?3, ?4, ?4 )
ON CONFLICT(template_id, role) DO UPDATE SET
    with_project_creator = excluded.with_project_creator,
    updated_ts = excluded.updated_ts
        "#,
    )
    .bind(template_id)
    .bind(role.as_str())
    .bind(with_project_creator)
    .bind(ts)
    .execute(&*backend.pool)
    .await?;
    Ok(())
}

#[async_trait]
impl TemplateBackend for SqliteBackend {
    async fn add_template(
        &self,
        uuid: &str,
        name: &str,
        description: Option<&str>,
        key_pattern: Option<&str>,
    ) -> Result<i64, BackendError> {
        add_template_sqlite(
            &self,
            uuid,
            name,
            description,
            key_pattern,
        ).await
    }

    async fn get_template_by_uuid(
        &self,
        uuid: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError> {
        get_template_by_column_sqlite(
            &self,
            "uuid",
            uuid,
        ).await
    }

    async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError> {
        get_template_by_column_sqlite(
            &self,
            "name",
            name,
        ).await
    }

    async fn list_templates(
        &self,
    ) -> Result<Vec<PermissionTemplate>, BackendError> {
        list_templates_sqlite(&self).await
    }

    async fn add_user_to_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError> {
        add_user_to_template_sqlite(
            &self,
            template_id,
            user_id,
            role,
        ).await
    }

    async fn remove_user_from_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError> {
        remove_user_from_template_sqlite(
            &self,
            template_id,
            user_id,
            role,
        ).await
    }

    async fn add_group_to_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError> {
        add_group_to_template_sqlite(
            &self,
            template_id,
            group,
            role,
        ).await
    }

    async fn remove_group_from_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError> {
        remove_group_from_template_sqlite(
            &self,
            template_id,
            group,
            role,
        ).await
    }

    async fn set_template_characteristic(
        &self,
        template_id: i64,
        role: &Role,
        with_project_creator: bool,
    ) -> Result<(), BackendError> {
        set_template_characteristic_sqlite(
            &self,
            template_id,
            role,
            with_project_creator,
        ).await
    }
}
