//! Repository construction.
//!
//! The factory turns a [`RepositoryType`] plus optional connection settings
//! into a ready `Arc<dyn FullRepository>`, reading the choice from the
//! environment or from `repository.toml`. [`RepositoryBuilder`] offers the
//! same thing as a fluent API.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::PostgresConfig;

/// Which storage backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres through Diesel and an r2d2 pool.
    Postgres,
    /// In-memory store, used for tests and for running without a database.
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts `"postgres"` (or `"pg"`) and `"local"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Pick a backend from the environment.
    ///
    /// `REPOSITORY_TYPE` wins when set (unparseable values fall back to
    /// Local). Otherwise the presence of `DATABASE_URL` or `PG_DATABASE_URL`
    /// selects Postgres.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Builds repository instances for the selected backend.
///
/// # Example
/// ```ignore
/// // Backend chosen via REPOSITORY_TYPE / DATABASE_URL.
/// let repository = RepositoryFactory::from_env().await?;
/// repository.health_check().await?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Build the given backend.
    ///
    /// `postgres_config` is required for [`RepositoryType::Postgres`] and
    /// ignored for [`RepositoryType::Local`].
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    RepositoryError::configuration("Postgres repository requires PostgresConfig")
                })?;
                let pg = Self::create_postgres(config).await?;
                Ok(pg as Arc<dyn FullRepository>)
            }
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => {
                let _ = postgres_config;
                Err(RepositoryError::configuration(
                    "Postgres repository feature not enabled",
                ))
            }
        }
    }

    /// Build a Postgres repository.
    ///
    /// Connects the pool and runs pending migrations before returning.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Build the in-memory repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Build the backend selected by the environment.
    ///
    /// See [`RepositoryType::from_env`] for the selection rules. Postgres
    /// settings come from `PG_*` variables via [`PostgresConfig::from_env`].
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Local => Ok(Self::create_local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => {
                let config = PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                Self::create(RepositoryType::Postgres, Some(&config)).await
            }
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            )),
        }
    }

    /// Build the backend described by a `repository.toml` file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Build the backend described by `repository.toml` found in the
    /// standard locations.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config).await
    }

    async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type == RepositoryType::Local {
            return Ok(Self::create_local());
        }

        #[cfg(feature = "postgres-repo")]
        {
            let pg_config = config.to_postgres_config()?.ok_or_else(|| {
                RepositoryError::configuration(
                    "Postgres repository requires database configuration",
                )
            })?;
            Self::create(RepositoryType::Postgres, Some(&pg_config)).await
        }
        #[cfg(not(feature = "postgres-repo"))]
        {
            Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ))
        }
    }
}

/// Fluent configuration for repository creation.
///
/// # Example
/// ```ignore
/// // Postgres selection needs the `postgres-repo` feature.
/// let repository = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Postgres)
///     .postgres_config(PostgresConfig::from_env()?)
///     .build()
///     .await?;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    #[cfg(feature = "postgres-repo")]
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Builder preloaded with the environment's backend selection.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            #[cfg(feature = "postgres-repo")]
            postgres_config: None,
        }
    }

    /// Override the backend.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Supply Postgres connection settings.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Re-read backend selection and Postgres settings from the environment.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        if self.repo_type == RepositoryType::Postgres {
            #[cfg(feature = "postgres-repo")]
            {
                self.postgres_config =
                    Some(PostgresConfig::from_env().map_err(RepositoryError::configuration)?);
            }
            #[cfg(not(feature = "postgres-repo"))]
            return Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ));
        }

        Ok(self)
    }

    /// Take backend selection and Postgres settings from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.apply_repository_config(&repo_config)
    }

    /// Take backend selection and Postgres settings from `repository.toml`
    /// found in the standard locations.
    pub fn from_default_config(self) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_default_location()?;
        self.apply_repository_config(&repo_config)
    }

    fn apply_repository_config(
        mut self,
        repo_config: &RepositoryConfig,
    ) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if self.repo_type == RepositoryType::Postgres {
            #[cfg(feature = "postgres-repo")]
            {
                self.postgres_config =
                    Some(repo_config.to_postgres_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires database configuration",
                        )
                    })?);
            }
            #[cfg(not(feature = "postgres-repo"))]
            return Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ));
        }

        Ok(self)
    }

    /// Build the configured repository.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        #[cfg(feature = "postgres-repo")]
        let pg_config = self.postgres_config.as_ref();
        #[cfg(not(feature = "postgres-repo"))]
        let pg_config = None;

        RepositoryFactory::create(self.repo_type, pg_config).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
