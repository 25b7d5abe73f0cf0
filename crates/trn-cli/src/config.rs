//! Configuration management for TRN CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trn::prelude::*;

/// Name of the config file searched for in the current and parent directories.
pub const CONFIG_FILE: &str = "trn.toml";

/// TRN run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default = "default_lifetime")]
    pub lifetime: ScheduleConfig,
    #[serde(default = "default_step_size")]
    pub step_size: ScheduleConfig,
    #[serde(default = "default_range")]
    pub range: ScheduleConfig,
    #[serde(default)]
    pub distribution: Distribution,
    #[serde(default)]
    pub dataset: DatasetSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_pointers")]
    pub pointers: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Steps between progress records; 0 turns them off.
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,
}

/// One control parameter: its endpoints and the schedule between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    #[serde(default)]
    pub schedule: ScheduleKind,
}

impl ScheduleConfig {
    pub fn exponential(initial: f64, final_value: f64) -> Self {
        Self {
            initial,
            final_value,
            schedule: ScheduleKind::Exponential,
        }
    }

    pub fn to_parameter(&self) -> ScheduledParameter {
        ScheduledParameter::new(self.initial, self.final_value, self.schedule)
    }
}

// Default value functions. The schedule endpoints scale with the default
// pointer count.
fn default_pointers() -> usize { 200 }
fn default_steps() -> usize { 200 * default_pointers() }
fn default_log_interval() -> usize { 1000 }
fn default_lifetime() -> ScheduleConfig {
    let n = default_pointers() as f64;
    ScheduleConfig::exponential(0.1 * n, 2.0 * n)
}
fn default_step_size() -> ScheduleConfig { ScheduleConfig::exponential(0.3, 0.05) }
fn default_range() -> ScheduleConfig {
    let n = default_pointers() as f64;
    ScheduleConfig::exponential(0.2 * n, 0.01)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            run: RunConfig::default(),
            lifetime: default_lifetime(),
            step_size: default_step_size(),
            range: default_range(),
            distribution: Distribution::default(),
            dataset: DatasetSpec::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            pointers: default_pointers(),
            seed: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            log_interval: default_log_interval(),
        }
    }
}

impl Config {
    /// Load `path`, or trn.toml from the current or parent directories, or
    /// fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(),
        };
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// The engine configuration described by `[run]` and the three schedule
    /// sections.
    pub fn adapt_config(&self) -> AdaptConfig {
        let config = AdaptConfig::new(
            self.run.steps,
            self.lifetime.to_parameter(),
            self.step_size.to_parameter(),
            self.range.to_parameter(),
        );
        match self.run.log_interval {
            0 => config,
            interval => config.with_log_interval(interval),
        }
    }
}

/// Find trn.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_square_run() {
        let config = Config::default();
        assert_eq!(config.network.pointers, 200);
        assert_eq!(config.run.steps, 40_000);
        assert_eq!(config.lifetime, ScheduleConfig::exponential(20.0, 400.0));
        assert_eq!(config.step_size, ScheduleConfig::exponential(0.3, 0.05));
        assert_eq!(config.range, ScheduleConfig::exponential(40.0, 0.01));
        assert_eq!(config.distribution, Distribution::Unconstrained);
        assert_eq!(config.dataset, DatasetSpec::default());
    }

    #[test]
    fn default_config_survives_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn disabled_progress_survives_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.run.log_interval = 0;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.run.log_interval, 0);
        assert_eq!(loaded, config);
        assert_eq!(loaded.adapt_config().log_interval, None);
    }

    #[test]
    fn log_interval_maps_to_engine() {
        let config: Config = toml::from_str("[run]\nsteps = 10\nlog_interval = 5\n").unwrap();
        assert_eq!(config.adapt_config().log_interval, Some(5));

        let config: Config = toml::from_str("[run]\nlog_interval = 0\n").unwrap();
        assert_eq!(config.adapt_config().log_interval, None);
        assert_eq!(config.run.steps, 40_000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [network]
            pointers = 50
            seed = 7

            [range]
            initial = 10.0
            final = 0.5

            [distribution]
            kind = "bounded"
            lows = [0.0, 0.0]
            highs = [4.0, 4.0]

            [dataset]
            kind = "file"
            path = "spiral.txt"
            drop_last_column = true
            "#,
        )
        .unwrap();

        assert_eq!(config.network.pointers, 50);
        assert_eq!(config.network.seed, Some(7));
        assert_eq!(config.range.schedule, ScheduleKind::Constant);
        assert_eq!(config.range.final_value, 0.5);
        assert_eq!(config.step_size, ScheduleConfig::exponential(0.3, 0.05));
        assert_eq!(
            config.distribution,
            Distribution::Bounded {
                lows: vec![0.0, 0.0],
                highs: vec![4.0, 4.0],
            }
        );
        assert_eq!(
            config.dataset,
            DatasetSpec::File {
                path: PathBuf::from("spiral.txt"),
                drop_last_column: true,
            }
        );
        assert_eq!(config.run.steps, 40_000);
    }

    #[test]
    fn adapt_config_uses_sections() {
        let mut config = Config::default();
        config.run.steps = 100;
        config.run.log_interval = 0;
        config.lifetime = ScheduleConfig {
            initial: 5.0,
            final_value: 9.0,
            schedule: ScheduleKind::Constant,
        };

        let adapt = config.adapt_config();
        assert_eq!(adapt.t_max, 100);
        assert_eq!(adapt.log_interval, None);
        assert_eq!(adapt.lifetime.schedule_name(), "constant");
        assert_eq!(adapt.step_size.schedule_name(), "exponential");

        let controls = adapt.controls_at(100).unwrap();
        assert_eq!(controls.lifetime, 5.0);
        assert!((controls.eps - 0.05).abs() < 1e-12);
        assert!((controls.lambda - 0.01).abs() < 1e-12);
    }

    #[test]
    fn unknown_schedule_is_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [lifetime]
            initial = 1.0
            final = 2.0
            schedule = "linear"
            "#,
        );
        assert!(result.is_err());
    }
}
