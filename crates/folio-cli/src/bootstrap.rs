//! CLI bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together
//! for the CLI adapter: settings from the environment, repositories from
//! either folio-db or folio-rest, and the core services on top.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use folio_core::{
    AdminGate, AdminSession, CatalogAdmin, CatalogEventEmitter, CatalogStore, CoreError,
    NoopEmitter, Repos, Settings, validate_settings,
};
use folio_db::{CoreFactory, setup_database};
use folio_rest::RestClientConfig;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration taken from the global CLI options.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit `SQLite` path; overrides the configured one.
    pub db_path: Option<PathBuf>,
    /// Use the hosted REST backend.
    pub remote: bool,
    /// Admin password attempt.
    pub password: Option<String>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone(),
            remote: cli.remote,
            password: cli.password.clone(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    settings: Settings,
    repos: Repos,
    admin: CatalogAdmin,
    gate: AdminGate,
    password: Option<String>,
}

impl CliContext {
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn admin(&self) -> &CatalogAdmin {
        &self.admin
    }

    /// A fresh catalog store over the configured backend.
    pub fn store(&self) -> CatalogStore {
        CatalogStore::new(self.repos.catalog.clone(), Arc::new(NoopEmitter::new()))
            .with_timeout(self.settings.effective_fetch_timeout())
    }

    /// Unlock the admin console with the password given on the command line.
    pub fn session(&self) -> Result<AdminSession, CoreError> {
        let attempt = self.password.as_deref().ok_or_else(|| {
            CoreError::Unauthorized(
                "admin password required (--password or FOLIO_ADMIN_PASSWORD)".to_string(),
            )
        })?;
        self.gate.unlock(attempt)
    }
}

/// Bootstrap the CLI application.
///
/// Reads settings from the environment, validates them, and builds the
/// repositories for the selected backend.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let settings = Settings::from_env();
    validate_settings(&settings).map_err(CoreError::from)?;

    let repos = if config.remote {
        let rest = RestClientConfig::from_settings(&settings).ok_or_else(|| {
            CliError::Config("--remote requires FOLIO_BACKEND_URL to be set".to_string())
        })?;
        debug!("Using hosted REST backend");
        folio_rest::build_repos(&rest).map_err(|e| CliError::Config(e.to_string()))?
    } else {
        let path = config
            .db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(settings.effective_database_path()));
        debug!(path = %path.display(), "Using SQLite backend");
        let pool = setup_database(&path).await?;
        CoreFactory::build_repos(pool, settings.public_asset_base.as_deref())
    };

    Ok(bootstrap_with(repos, settings, config.password))
}

/// Bootstrap with custom repos and settings (for testing).
pub fn bootstrap_with(repos: Repos, settings: Settings, password: Option<String>) -> CliContext {
    let emitter: Arc<dyn CatalogEventEmitter> = Arc::new(NoopEmitter::new());
    CliContext {
        gate: AdminGate::from_settings(&settings),
        admin: CatalogAdmin::new(repos.clone(), emitter),
        repos,
        settings,
        password,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use folio_db::TestDb;

    pub const PASSWORD: &str = "open sesame";

    /// Context over an in-memory database with the admin password set.
    pub async fn test_context() -> (TestDb, CliContext) {
        let db = TestDb::new().await.unwrap();
        let settings = Settings {
            admin_password: Some(PASSWORD.to_string()),
            ..Settings::with_defaults()
        };
        let ctx = bootstrap_with(db.repos(), settings, Some(PASSWORD.to_string()));
        (db, ctx)
    }

    #[tokio::test]
    async fn test_session_requires_password() {
        let db = TestDb::new().await.unwrap();
        let settings = Settings {
            admin_password: Some(PASSWORD.to_string()),
            ..Settings::with_defaults()
        };

        let ctx = bootstrap_with(db.repos(), settings.clone(), None);
        assert!(matches!(ctx.session(), Err(CoreError::Unauthorized(_))));

        let ctx = bootstrap_with(db.repos(), settings, Some("wrong".to_string()));
        assert!(ctx.session().is_err());
    }

    #[tokio::test]
    async fn test_session_with_password() {
        let (_db, ctx) = test_context().await;
        assert!(ctx.session().is_ok());
    }

    #[tokio::test]
    async fn test_bootstrap_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            db_path: Some(dir.path().join("nested").join("folio.db")),
            ..CliConfig::default()
        };
        let ctx = bootstrap(config).await.unwrap();
        let mut store = ctx.store();
        assert!(store.load(folio_core::Category::Inventory).await.unwrap().is_empty());
    }
}
