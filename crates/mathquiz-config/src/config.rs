//! Quiz configuration and loader.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mathquiz_core::{ReusePolicy, SessionOptions};

use crate::error::ConfigError;

/// Logging section (`[log]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Install a subscriber at all.
    #[serde(default)]
    pub enabled: bool,
    /// Truncate the log file at start instead of appending.
    #[serde(default)]
    pub clear_on_start: bool,
    /// Log file; stderr when unset. `${VAR}` references are expanded.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Default level for the mathquiz crates; `RUST_LOG` overrides it.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            clear_on_start: false,
            file: None,
            level: default_level(),
        }
    }
}

/// Quiz section (`[quiz]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Which answered problems are withheld for the rest of a session.
    #[serde(default)]
    pub reuse_policy: ReusePolicy,
    /// Attempts allowed to find a problem that is not withheld.
    #[serde(default = "default_max_regenerations")]
    pub max_regenerations: usize,
}

fn default_max_regenerations() -> usize {
    1000
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            reuse_policy: ReusePolicy::default(),
            max_regenerations: default_max_regenerations(),
        }
    }
}

impl QuizSettings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            reuse_policy: self.reuse_policy,
            max_regenerations: self.max_regenerations,
        }
    }
}

/// Top-level mathquiz configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub quiz: QuizSettings,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Accepted spellings for boolean settings, case insensitive.
const STR_BOOL_VALS: [(&str, bool); 10] = [
    ("1", true),
    ("true", true),
    ("t", true),
    ("yes", true),
    ("y", true),
    ("0", false),
    ("false", false),
    ("f", false),
    ("no", false),
    ("n", false),
];

/// Read a boolean from one of the [`STR_BOOL_VALS`] spellings.
pub fn parse_bool_str(val: &str) -> Result<bool, ConfigError> {
    let cleaned = val.trim().to_lowercase();
    STR_BOOL_VALS
        .iter()
        .find(|(s, _)| *s == cleaned)
        .map(|(_, b)| *b)
        .ok_or_else(|| ConfigError::InvalidBool(val.to_string()))
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Parse configuration text in the given format.
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<QuizConfig> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str::<QuizConfig>(content)?,
        ConfigFormat::Json => serde_json::from_str::<QuizConfig>(content)?,
    };
    Ok(config)
}

/// Apply `MATHQUIZ_LOG` and expand `${VAR}` in the log file path.
///
/// `lookup` stands in for `std::env::var` so overrides can be tested
/// without touching the process environment.
fn apply_env_overrides(
    mut config: QuizConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<QuizConfig> {
    if let Some(val) = lookup("MATHQUIZ_LOG") {
        config.log.enabled = parse_bool_str(&val).context("invalid MATHQUIZ_LOG value")?;
    }

    config.log.file = config
        .log
        .file
        .as_ref()
        .map(|f| PathBuf::from(resolve_env_vars(&f.to_string_lossy())));

    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mathquiz.toml` in the current directory
/// 2. `~/.config/mathquiz/config.toml`
///
/// Environment variable override: `MATHQUIZ_LOG`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config named on the command line, or search the default locations.
///
/// A name that is not an existing path is looked up in the config directory
/// (`$MATHQUIZ_CONFIG_DIR`, else `~/.config/mathquiz`).
pub fn load_config_from(name: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(name) = name {
        Some(resolve_named(name)?)
    } else {
        let local = PathBuf::from("mathquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let format = ConfigFormat::from_path(&path)?;
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content, format)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn resolve_named(name: &Path) -> Result<PathBuf> {
    if name.exists() {
        return Ok(name.to_path_buf());
    }
    if let Some(candidate) = config_dir().map(|dir| dir.join(name)) {
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(ConfigError::NotFound(name.display().to_string()).into())
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MATHQUIZ_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MATHQUIZ_TEST_VAR", "logs");
        assert_eq!(resolve_env_vars("${_MATHQUIZ_TEST_VAR}"), "logs");
        assert_eq!(
            resolve_env_vars("/tmp/${_MATHQUIZ_TEST_VAR}/quiz.log"),
            "/tmp/logs/quiz.log"
        );
        std::env::remove_var("_MATHQUIZ_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert!(!config.log.enabled);
        assert!(!config.log.clear_on_start);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.quiz.reuse_policy, ReusePolicy::Correct);
        assert_eq!(config.quiz.max_regenerations, 1000);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[log]
enabled = true
clear_on_start = true
file = "quiz.log"
level = "debug"

[quiz]
reuse_policy = "any"
max_regenerations = 50
"#;
        let config = parse_config_str(toml_str, ConfigFormat::Toml).unwrap();
        assert!(config.log.enabled);
        assert!(config.log.clear_on_start);
        assert_eq!(config.log.file, Some(PathBuf::from("quiz.log")));
        assert_eq!(config.quiz.reuse_policy, ReusePolicy::Any);
        assert_eq!(config.quiz.session_options().max_regenerations, 50);
    }

    #[test]
    fn parse_json_config_with_defaults() {
        let json = r#"{ "log": { "enabled": true } }"#;
        let config = parse_config_str(json, ConfigFormat::Json).unwrap();
        assert!(config.log.enabled);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.quiz.reuse_policy, ReusePolicy::Correct);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("app.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("dir/app.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("app.yml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn bool_spellings() {
        for s in ["1", "True", "T", "yes", "y"] {
            assert!(parse_bool_str(s).unwrap(), "{s}");
        }
        for s in ["0", "false", "f", "NO", "n"] {
            assert!(!parse_bool_str(s).unwrap(), "{s}");
        }
        let err = parse_bool_str("not_allowed").unwrap_err();
        assert!(err.to_string().contains("not_allowed"));
    }

    #[test]
    fn env_override_toggles_logging() {
        let config = apply_env_overrides(QuizConfig::default(), |key| {
            (key == "MATHQUIZ_LOG").then(|| "yes".to_string())
        })
        .unwrap();
        assert!(config.log.enabled);

        let err = apply_env_overrides(QuizConfig::default(), |_| Some("maybe".into()));
        assert!(err.is_err());
    }

    #[test]
    fn load_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        std::fs::write(&path, r#"{ "quiz": { "max_regenerations": 7 } }"#).unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.quiz.max_regenerations, 7);
    }

    #[test]
    fn missing_named_file_is_an_error() {
        let err = load_config_from(Some(Path::new("definitely-not-here.toml"))).unwrap_err();
        assert!(err.to_string().contains("definitely-not-here.toml"));
    }
}
