use runway_core::{LedgerResult, RandomUserIds};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    #[serde(default = "default_user_id_min")]
    pub user_id_min: u32,
    #[serde(default = "default_user_id_max")]
    pub user_id_max: u32,
}

fn default_user_id_min() -> u32 { RandomUserIds::DEFAULT_MIN }
fn default_user_id_max() -> u32 { RandomUserIds::DEFAULT_MAX }

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            user_id_min: default_user_id_min(),
            user_id_max: default_user_id_max(),
        }
    }
}

impl LedgerConfig {
    pub fn id_generator(&self) -> LedgerResult<RandomUserIds> {
        RandomUserIds::new(self.user_id_min, self.user_id_max)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub default_path: PathBuf,
}

fn default_export_path() -> PathBuf { PathBuf::from("text.txt") }

impl Default for ExportConfig {
    fn default() -> Self {
        Self { default_path: default_export_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "runway_cli=info,runway_core=info,runway_store=info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl Config {
    /// Layers `<dir>/default`, `<dir>/<run_mode>`, `<dir>/local` and
    /// `RUNWAY__*` environment variables. Every layer is optional.
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            // Untracked per-machine overrides
            .add_source(config::File::with_name(&format!("{dir}/local")).required(false))
            // e.g. `RUNWAY__LEDGER__USER_ID_MAX=9999`
            .add_source(
                config::Environment::with_prefix("RUNWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::UserIdGenerator;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().to_str().unwrap(), "test").unwrap();

        assert_eq!(config.ledger.user_id_min, 10);
        assert_eq!(config.ledger.user_id_max, 99);
        assert_eq!(config.export.default_path, PathBuf::from("text.txt"));
    }

    #[test]
    #[serial]
    fn test_layers_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[ledger]\nuser_id_min = 100\nuser_id_max = 999\n\n[export]\ndefault_path = \"tickets.txt\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.toml"), "[ledger]\nuser_id_max = 500\n").unwrap();

        let config = Config::load_from(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.ledger.user_id_min, 100);
        assert_eq!(config.ledger.user_id_max, 500);
        assert_eq!(config.export.default_path, PathBuf::from("tickets.txt"));
        assert_eq!(config.ledger.id_generator().unwrap().id_space(), 401);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[ledger]\nuser_id_min = 100\nuser_id_max = 999\n",
        )
        .unwrap();

        std::env::set_var("RUNWAY__LEDGER__USER_ID_MAX", "250");
        let loaded = Config::load_from(dir.path().to_str().unwrap(), "test");
        std::env::remove_var("RUNWAY__LEDGER__USER_ID_MAX");

        let config = loaded.unwrap();
        assert_eq!(config.ledger.user_id_min, 100);
        assert_eq!(config.ledger.user_id_max, 250);
    }
}
