use permcore::platform::{ConnectorOption, PlatformUrl};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::SqliteBackend;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        if opts.create_db && !Sqlite::database_exists(&opts.url).await.unwrap_or(false) {
            log::warn!("sqlite database {} does not exist; creating...", &opts.url);
            Sqlite::create_database(&opts.url).await?
        }

        let pool = SqlitePool::connect(&opts.url).await?;
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url: opts.url,
        })
    }

    pub async fn migrate(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("migrations/perm").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect and bring the schema up to date.
    pub async fn perm(opts: ConnectorOption) -> Result<Self, sqlx::Error> {
        Self::connect(opts).await?
            .migrate()
            .await
    }
}

mod grant;
mod group;
mod membership;
mod project;
mod template;
mod user;

mod default_impl {
    use permcore::platform::DefaultPermPlatform;
    use crate::SqliteBackend;

    impl DefaultPermPlatform for SqliteBackend {}
}

// Shared helpers for the submodules.
pub(crate) mod util {
    use permcore::{
        error::BackendError,
        principal::GroupRef,
    };
    use sqlx::SqliteConnection;

    use crate::chrono::Utc;

    /// Storage convention: the virtual group is stored as a null group id.
    pub(crate) fn group_id(group: &GroupRef) -> Option<i64> {
        group.group_id()
    }

    pub(crate) fn group_ref(group_id: Option<i64>) -> GroupRef {
        group_id.map(GroupRef::Group)
            .unwrap_or(GroupRef::Anyone)
    }

    pub(crate) async fn refresh_authorization_ts(
        conn: &mut SqliteConnection,
        project_id: i64,
    ) -> Result<(), BackendError> {
        let ts = Utc::now().timestamp();
        let rows = sqlx::query(
            r#"
UPDATE
    project
SET
    authorization_updated_ts = ?1
WHERE
    id = ?2
            "#,
        )
        .bind(ts)
        .bind(project_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
        if rows == 0 {
            Err(BackendError::AppInvariantViolation(format!(
                "project id {project_id} does not exist"
            )))
        } else {
            Ok(())
        }
    }
}
