//! Inference engine configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// YAML or JSON file with rules to load at startup
    #[serde(default)]
    pub seed_rules_path: Option<PathBuf>,

    /// Rank every seeded category's questions after loading
    #[serde(default = "default_initialize_priorities")]
    pub initialize_priorities: bool,

    /// Consultations untouched for this long are discarded
    #[serde(default = "default_session_idle_timeout")]
    pub session_idle_timeout_secs: u64,

    /// How often idle consultations are swept
    #[serde(default = "default_session_sweep_interval")]
    pub session_sweep_interval_secs: u64,
}

impl EngineConfig {
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.seed_rules_path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired("engine.seed_rules_path"));
            }
        }
        if self.session_idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidSessionLifetime(
                "engine.session_idle_timeout_secs",
            ));
        }
        if self.session_sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSessionLifetime(
                "engine.session_sweep_interval_secs",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_rules_path: None,
            initialize_priorities: default_initialize_priorities(),
            session_idle_timeout_secs: default_session_idle_timeout(),
            session_sweep_interval_secs: default_session_sweep_interval(),
        }
    }
}

fn default_initialize_priorities() -> bool {
    true
}

fn default_session_idle_timeout() -> u64 {
    30 * 60
}

fn default_session_sweep_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_seed_nothing() {
        let config = EngineConfig::default();
        assert!(config.seed_rules_path.is_none());
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(1800));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_seed_path_is_rejected() {
        let config = EngineConfig {
            seed_rules_path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_session_lifetimes_are_rejected() {
        let idle = EngineConfig {
            session_idle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            idle.validate(),
            Err(ValidationError::InvalidSessionLifetime(_))
        ));

        let sweep = EngineConfig {
            session_sweep_interval_secs: 0,
            ..Default::default()
        };
        assert!(sweep.validate().is_err());
    }
}
