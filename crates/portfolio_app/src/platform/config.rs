use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use page_logging::{page_info, page_warn};
use portfolio_core::visibility::RegionBounds;
use portfolio_core::{
    ActivationPolicy, CounterSpec, PageSettings, PageState, DEFAULT_DURATION_MS,
    DEFAULT_TICK_INTERVAL, STATS, STATS_REGION,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// How region visibility is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Intersect regions with the scrolled viewport.
    #[default]
    Viewport,
    /// Treat every region as visible as soon as the page mounts.
    Always,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub suffix: String,
    /// Overrides `PageConfig::counter_duration_ms` for this stat.
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub tick_interval_ms: u64,
    pub counter_duration_ms: i64,
    pub activation: ActivationPolicy,
    pub visibility: VisibilityMode,
    pub nav_scroll_threshold: f64,
    pub viewport_height: f64,
    pub stats_region: RegionConfig,
    pub stats: Vec<StatConfig>,
    /// Scroll offset applied right after mount.
    pub scroll_to: f64,
    /// Minimum spacing between rendered frames.
    pub render_interval_ms: u64,
    /// Upper bound on how long the page runs before it is torn down.
    pub run_timeout_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            counter_duration_ms: DEFAULT_DURATION_MS,
            activation: ActivationPolicy::default(),
            visibility: VisibilityMode::default(),
            nav_scroll_threshold: PageSettings::default().nav_scroll_threshold,
            viewport_height: 900.0,
            stats_region: RegionConfig {
                top: 3200.0,
                height: 400.0,
            },
            stats: STATS
                .iter()
                .map(|stat| StatConfig {
                    label: stat.label.to_string(),
                    value: stat.value,
                    suffix: stat.suffix.to_string(),
                    duration_ms: None,
                })
                .collect(),
            scroll_to: 3000.0,
            render_interval_ms: 100,
            run_timeout_ms: 10_000,
        }
    }
}

impl PageConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PageConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Loads `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                page_info!("Loaded page config from {:?}", path);
                config
            }
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                page_info!("No page config at {:?}; using defaults", path);
                Self::default()
            }
            Err(err) => {
                page_warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    /// Replaces values the page cannot run with and warns about the ones it will clamp.
    pub fn normalized(mut self) -> Self {
        if self.tick_interval_ms == 0 {
            page_warn!(
                "tick_interval_ms must be positive; using {:?}",
                DEFAULT_TICK_INTERVAL
            );
            self.tick_interval_ms = DEFAULT_TICK_INTERVAL.as_millis() as u64;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            page_warn!(
                "viewport_height {} is not usable; using default",
                self.viewport_height
            );
            self.viewport_height = Self::default().viewport_height;
        }
        for stat in &self.stats {
            if stat.value < 0 {
                page_warn!("stat {:?} has negative value {}; showing 0", stat.label, stat.value);
            }
            if stat.duration_ms.unwrap_or(self.counter_duration_ms) <= 0 {
                page_warn!("stat {:?} has no positive duration; it will not animate", stat.label);
            }
        }
        self
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            activation: self.activation,
            nav_scroll_threshold: self.nav_scroll_threshold,
        }
    }

    pub fn stats_bounds(&self) -> RegionBounds {
        RegionBounds {
            top: self.stats_region.top,
            height: self.stats_region.height,
        }
    }

    /// Page state with one idle counter per configured stat.
    pub fn build_state(&self) -> PageState {
        let mut state = PageState::new(self.page_settings());
        for stat in &self.stats {
            state.add_counter(
                stat.label.clone(),
                STATS_REGION,
                CounterSpec::new(
                    stat.value,
                    stat.duration_ms.unwrap_or(self.counter_duration_ms),
                    stat.suffix.clone(),
                ),
            );
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_mirrors_page_stats() {
        let config = PageConfig::default();
        let labels: Vec<&str> = config.stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Years Experience",
                "Projects Delivered",
                "Happy Clients",
                "Coffee Consumed"
            ]
        );
        let state = config.build_state();
        assert_eq!(state.counter_ids(), vec![1, 2, 3, 4]);
        assert_eq!(state.counter(4).unwrap().spec().target(), 1000);
    }

    #[test]
    fn partial_ron_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.ron");
        fs::write(
            &path,
            r#"(
                activation: on_mount,
                stats: [
                    (label: "Talks", value: 12, suffix: "+"),
                    (label: "Instant", value: 5, duration_ms: Some(0)),
                ],
            )"#,
        )
        .unwrap();

        let config = PageConfig::load(&path).unwrap();
        assert_eq!(config.activation, ActivationPolicy::OnMount);
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.stats.len(), 2);
        assert_eq!(config.stats[1].suffix, "");

        let state = config.build_state();
        assert_eq!(state.counter(1).unwrap().spec().suffix(), "+");
        assert!(state.counter(2).unwrap().spec().completes_immediately());
    }

    #[test]
    fn zero_tick_interval_is_replaced() {
        let config = PageConfig {
            tick_interval_ms: 0,
            ..PageConfig::default()
        }
        .normalized();
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.page_settings().tick_interval, DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PageConfig::load_or_default(Some(&dir.path().join("absent.ron")));
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(activation: sideways").unwrap();

        assert!(matches!(
            PageConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(PageConfig::load_or_default(Some(&path)), PageConfig::default());
    }

    #[test]
    fn config_round_trips_through_ron() {
        let config = PageConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        let parsed: PageConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
