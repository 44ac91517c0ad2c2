//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/quadriclass/quadriclass.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `QUADRICLASS_*` prefix, `__` for nesting

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{FuzzyMatcher, TolerancePolicy};

/// Quiz rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizConfig {
    /// Length of a game in seconds
    pub duration_secs: u64,
    /// Points for a correct answer
    pub correct_points: u32,
    /// Points deducted for a hint
    pub hint_penalty: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            correct_points: 10,
            hint_penalty: 5,
        }
    }
}

impl QuizConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Answer grading tolerances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchingConfig {
    /// Aliases longer than this many characters use `long_tolerance`
    pub long_alias_len: usize,
    pub short_tolerance: usize,
    pub long_tolerance: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let policy = TolerancePolicy::default();
        Self {
            long_alias_len: policy.long_alias_len,
            short_tolerance: policy.short_tolerance,
            long_tolerance: policy.long_tolerance,
        }
    }
}

impl From<MatchingConfig> for TolerancePolicy {
    fn from(cfg: MatchingConfig) -> Self {
        TolerancePolicy {
            long_alias_len: cfg.long_alias_len,
            short_tolerance: cfg.short_tolerance,
            long_tolerance: cfg.long_tolerance,
        }
    }
}

/// Raw quiz config for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQuizConfig {
    pub duration_secs: Option<u64>,
    pub correct_points: Option<u32>,
    pub hint_penalty: Option<u32>,
}

/// Raw matching config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMatchingConfig {
    pub long_alias_len: Option<usize>,
    pub short_tolerance: Option<usize>,
    pub long_tolerance: Option<usize>,
}

/// Raw settings for intermediate parsing.
///
/// Used during layered config merging to distinguish between
/// "not specified, inherit from base" (`None`) and an explicit value.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub quiz: RawQuizConfig,
    pub matching: RawMatchingConfig,
}

/// Unified configuration for quadriclass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the high score file
    pub data_dir: PathBuf,
    pub quiz: QuizConfig,
    pub matching: MatchingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quiz: QuizConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

/// Platform data directory, falling back to `~/.quadriclass`.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "quadriclass")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.quadriclass"))
}

/// Get the XDG config directory for quadriclass.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quadriclass").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("quadriclass.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; the input is returned unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Grading matcher configured with these tolerances.
    pub fn matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::new(self.matching.into())
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            quiz: QuizConfig {
                duration_secs: overlay
                    .quiz
                    .duration_secs
                    .unwrap_or(self.quiz.duration_secs),
                correct_points: overlay
                    .quiz
                    .correct_points
                    .unwrap_or(self.quiz.correct_points),
                hint_penalty: overlay.quiz.hint_penalty.unwrap_or(self.quiz.hint_penalty),
            },
            matching: MatchingConfig {
                long_alias_len: overlay
                    .matching
                    .long_alias_len
                    .unwrap_or(self.matching.long_alias_len),
                short_tolerance: overlay
                    .matching
                    .short_tolerance
                    .unwrap_or(self.matching.short_tolerance),
                long_tolerance: overlay
                    .matching
                    .long_tolerance
                    .unwrap_or(self.matching.long_tolerance),
            },
        }
    }

    /// Load settings from all layers.
    ///
    /// `explicit` is a config file given on the command line; it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply QUADRICLASS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("QUADRICLASS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<u64>("quiz.duration_secs") {
            settings.quiz.duration_secs = val;
        }
        if let Ok(val) = config.get::<u32>("quiz.correct_points") {
            settings.quiz.correct_points = val;
        }
        if let Ok(val) = config.get::<u32>("quiz.hint_penalty") {
            settings.quiz.hint_penalty = val;
        }
        if let Ok(val) = config.get::<usize>("matching.long_alias_len") {
            settings.matching.long_alias_len = val;
        }
        if let Ok(val) = config.get::<usize>("matching.short_tolerance") {
            settings.matching.short_tolerance = val;
        }
        if let Ok(val) = config.get::<usize>("matching.long_tolerance") {
            settings.matching.long_tolerance = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# quadriclass configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/quadriclass/quadriclass.toml
#   Explicit: file passed with --config
#   Env:      QUADRICLASS_* environment variables, e.g. QUADRICLASS_QUIZ__DURATION_SECS=30

# Where the high score is kept
# data_dir = "~/.local/share/quadriclass"

[quiz]
# Game length in seconds
# duration_secs = 60

# Points for a correct answer
# correct_points = 10

# Points deducted when a hint is shown
# hint_penalty = 5

[matching]
# Aliases longer than this many characters get long_tolerance
# long_alias_len = 5

# Accepted edit distance for short and long aliases
# short_tolerance = 1
# long_tolerance = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert!(settings
            .data_dir
            .to_string_lossy()
            .contains("quadriclass"));
        assert!(settings.quiz.duration_secs > 0);
    }

    #[test]
    fn given_defaults_when_building_matcher_then_reference_tolerances() {
        let settings = Settings::default();
        assert_eq!(settings.matcher().policy(), TolerancePolicy::default());
    }

    #[test]
    fn given_tilde_in_data_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_dir: PathBuf::from("~/.quadriclass"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let dir = settings.data_dir.to_string_lossy();
        assert!(dir.starts_with(&home), "data_dir should start with home: {}", dir);
        assert!(!dir.contains('~'), "data_dir should not contain tilde: {}", dir);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_keep_base() {
        let base = Settings::default();
        let overlay = RawSettings {
            data_dir: None,
            quiz: RawQuizConfig {
                duration_secs: Some(30),
                ..RawQuizConfig::default()
            },
            matching: RawMatchingConfig {
                long_tolerance: Some(3),
                ..RawMatchingConfig::default()
            },
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.data_dir, base.data_dir);
        assert_eq!(merged.quiz.duration_secs, 30);
        assert_eq!(merged.quiz.correct_points, 10);
        assert_eq!(merged.quiz.hint_penalty, 5);
        assert_eq!(merged.matching.long_tolerance, 3);
        assert_eq!(merged.matching.short_tolerance, 1);
    }

    #[test]
    fn given_settings_when_serialized_then_parses_back() {
        let settings = Settings::default();
        let text = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_all_fields_are_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template is valid TOML");
        assert!(raw.data_dir.is_none());
        assert!(raw.quiz.duration_secs.is_none());
        assert!(raw.matching.long_tolerance.is_none());
    }
}
