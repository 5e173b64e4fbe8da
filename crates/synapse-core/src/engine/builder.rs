//! Builder for creating and configuring Engine instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Engine;
use crate::{
    config::{GeneratorConfig, DEFAULT_LANGUAGE},
    db::Database,
    error::{EngineError, Result},
    generator::{ContentGenerator, TextGenerator},
};

/// Builder for creating and configuring Engine instances.
#[derive(Clone)]
pub struct EngineBuilder {
    database_path: Option<PathBuf>,
    config: GeneratorConfig,
    backend: Option<Arc<dyn TextGenerator>>,
    language: String,
}

impl std::fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("database_path", &self.database_path)
            .field("config", &self.config)
            .field("backend", &self.backend.is_some())
            .field("language", &self.language)
            .finish()
    }
}

impl EngineBuilder {
    /// Creates a builder with an offline generator and the default database
    /// location.
    pub fn new() -> Self {
        Self {
            database_path: None,
            config: GeneratorConfig {
                demo_mode: true,
                ..GeneratorConfig::default()
            },
            backend: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/synapse/synapse.db` or
    /// `~/.local/share/synapse/synapse.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `config` to set up the OpenAI-compatible generator.
    pub fn with_generator_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses an explicit text generator, taking precedence over the config.
    pub fn with_generator(mut self, backend: Arc<dyn TextGenerator>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Language generated content is written in.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.trim().is_empty() {
            self.language = language.trim().to_string();
        }
        self
    }

    /// Builds the configured engine.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::XdgDirectory` if no default path can be found
    /// Returns `EngineError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `EngineError::Database` if database initialization fails
    pub async fn build(self) -> Result<Engine> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), EngineError>(())
        })
        .await
        .map_err(EngineError::join)??;

        let generator = match self.backend {
            Some(backend) => ContentGenerator::new(Some(backend), self.language),
            None => ContentGenerator::from_config(&self.config, self.language),
        };
        log::debug!(
            "Engine ready at {} (generator: {})",
            db_path.display(),
            if generator.has_backend() { "external" } else { "offline" }
        );
        Ok(Engine::new(db_path, generator))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("synapse")
            .place_data_file("synapse.db")
            .map_err(|e| EngineError::XdgDirectory(e.to_string()))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
