//! Generator configuration.

use std::{env, time::Duration};

use crate::error::{EngineError, Result};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default OpenAI-compatible API root.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default HTTP timeout for one generation request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default language generated content is written in.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Settings for the external text generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// API key; no key means fallback synthesis only
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Skip the generator entirely and synthesize locally
    pub demo_mode: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            demo_mode: false,
        }
    }
}

impl GeneratorConfig {
    /// Reads the configuration from the process environment.
    ///
    /// | Variable               | Meaning                           |
    /// |------------------------|-----------------------------------|
    /// | `DEMO_MODE`            | `true`/`1` disables the generator |
    /// | `OPENAI_API_KEY`       | API key                           |
    /// | `SYNAPSE_MODEL`        | model name                        |
    /// | `SYNAPSE_API_BASE`     | API root URL                      |
    /// | `SYNAPSE_TIMEOUT_SECS` | request timeout in seconds        |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(flag) = lookup("DEMO_MODE") {
            config.demo_mode = parse_flag(&flag);
        }
        config.api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        if let Some(model) = lookup("SYNAPSE_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(base) = lookup("SYNAPSE_API_BASE").filter(|b| !b.trim().is_empty()) {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("SYNAPSE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| EngineError::Configuration {
                message: format!("SYNAPSE_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"),
            })?;
            if secs == 0 {
                return Err(EngineError::Configuration {
                    message: "SYNAPSE_TIMEOUT_SECS must be greater than zero".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Whether a real generator should be constructed.
    pub fn generator_enabled(&self) -> bool {
        !self.demo_mode && self.api_key.is_some()
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(!config.generator_enabled());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SYNAPSE_MODEL", "local-model"),
            ("SYNAPSE_API_BASE", "http://localhost:8000/v1/"),
            ("SYNAPSE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "local-model");
        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.generator_enabled());
    }

    #[test]
    fn test_demo_mode_disables_generator() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DEMO_MODE", "TRUE"),
        ]))
        .unwrap();
        assert!(config.demo_mode);
        assert!(!config.generator_enabled());
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[("SYNAPSE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
        assert!(
            GeneratorConfig::from_lookup(lookup_from(&[("SYNAPSE_TIMEOUT_SECS", "0")])).is_err()
        );
    }
}
