use permcore::platform::{
    ConnectorOption,
    PermPlatform,
};
#[cfg(feature = "sqlite")]
use permdb_sqlite::SqliteBackend;
use std::sync::Arc;

pub struct Backend;

#[derive(Debug, PartialEq)]
pub struct Error(String);

#[derive(Debug)]
enum BackendKind {
    Sqlite,
}

mod display {
    use super::Error;
    use std::fmt::{Display, Formatter, Result};

    impl Display for Error {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            self.0.fmt(f)
        }
    }

    impl std::error::Error for Error {}
}

impl TryFrom<&str> for BackendKind {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.split(':').next() {
            Some("sqlite") => Ok(BackendKind::Sqlite),
            _ => Err(Error(format!("The connection string {s:?} is unsupported.")))
        }
    }
}

impl Backend {
    /// Connects to the store named by the url, running any pending
    /// migrations.
    pub async fn perm(
        opts: impl Into<ConnectorOption> + Send,
    ) -> Result<Arc<dyn PermPlatform>, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let opts = opts.into();
        match BackendKind::try_from(opts.url.as_str()) {
            #[cfg(feature = "sqlite")]
            Ok(BackendKind::Sqlite) => {
                log::debug!("connecting to sqlite backend at {}", opts.url);
                Ok(Arc::new(SqliteBackend::perm(opts).await?))
            }
            #[cfg(not(feature = "sqlite"))]
            Ok(BackendKind::Sqlite) => Err(Box::new(Error(format!(
                "The feature \"sqlite\" must be enabled for permdb in order to connect to {:?}",
                opts.url,
            )))),
            Err(e) => Err(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod testing {
    use crate::{
        Backend,
        Error,
    };

    #[async_std::test]
    async fn smoke() {
        assert!(Backend::perm("unsupported").await.is_err());
        assert!(Backend::perm("postgres://localhost/perm").await.is_err());
    }

    #[async_std::test]
    async fn unsupported_url() {
        let err = Backend::perm("postgres://localhost/perm").await
            .err()
            .expect("should be an error");
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error(
                r#"The connection string "postgres://localhost/perm" is unsupported."#
                    .to_string()
            )),
        );
    }

    #[cfg(feature = "sqlite")]
    #[async_std::test]
    async fn smoke_sqlite() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use permcore::{
            platform::PlatformUrl,
            traits::UserBackend,
        };
        let platform = Backend::perm("sqlite::memory:").await?;
        let user_id = platform.add_user("admin", "Administrator").await?;
        assert_eq!(
            platform.get_user_by_login("admin").await?
                .map(|user| user.id),
            Some(user_id),
        );
        assert_eq!(platform.url(), "sqlite::memory:");
        Ok(())
    }
}
