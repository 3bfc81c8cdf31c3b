use permac::{
    platform::{
        Builder,
        Platform,
    },
    settings::Settings,
};
use permdb_sqlite::SqliteBackend;

pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::perm("sqlite::memory:".into()).await?)
}

pub async fn create_sqlite_platform(settings: Settings) -> anyhow::Result<Platform> {
    let platform = Builder::new()
        .platform(create_sqlite_backend().await?)
        .settings(settings)
        .build();
    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn smoke_test_create_platform() -> anyhow::Result<()> {
        create_sqlite_platform(Settings::default()).await?;
        create_sqlite_platform(Settings::with_default_template("tpl")).await?;
        Ok(())
    }
}
