use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViceError};
use crate::level::Level;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = ViceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "true" => Ok(Self::Always),
            "never" | "off" | "false" => Ok(Self::Never),
            _ => Err(ViceError::Parse(format!("unknown color mode: {s}"))),
        }
    }
}

impl FromStr for SymbolMode {
    type Err = ViceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "true" => Ok(Self::Always),
            "never" | "off" | "false" => Ok(Self::Never),
            _ => Err(ViceError::Parse(format!("unknown symbol mode: {s}"))),
        }
    }
}

impl ColorMode {
    /// `NO_COLOR` disables and a non-`0` `FORCE_COLOR` enables; otherwise
    /// color follows whether the output is a terminal.
    pub fn resolve(self, output_is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                if env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                if let Ok(v) = env::var("FORCE_COLOR")
                    && !v.is_empty()
                    && v != "0"
                {
                    return true;
                }
                output_is_terminal
            }
        }
    }
}

impl SymbolMode {
    pub fn resolve(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
                    .iter()
                    .find_map(|key| env::var(key).ok().filter(|v| !v.is_empty()));
                terminal_has_unicode(cfg!(windows), locale.as_deref())
            }
        }
    }
}

fn terminal_has_unicode(windows: bool, locale: Option<&str>) -> bool {
    if windows {
        return false;
    }
    locale
        .map(|l| l.to_ascii_uppercase())
        .is_some_and(|l| l.ends_with("UTF-8") || l.ends_with("UTF8"))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub color: ColorMode,
    pub symbols: SymbolMode,
    /// Residual summaries shorter than this many characters stay inline.
    pub detail_threshold: usize,
    /// Levels whose residual fields are not rendered at all.
    pub quiet_levels: Vec<Level>,
    pub gutter_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            symbols: SymbolMode::Auto,
            detail_threshold: 160,
            quiet_levels: vec![Level::Info],
            gutter_width: 9,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = load_env_overrides()?;
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(file_overrides) = load_file_overrides(path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    color: Option<String>,
    symbols: Option<String>,
    detail_threshold: Option<usize>,
    quiet_levels: Option<QuietLevels>,
    gutter_width: Option<usize>,
}

/// Accepts either a TOML array or a comma separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuietLevels {
    List(Vec<String>),
    Joined(String),
}

impl QuietLevels {
    fn parse(self) -> Result<Vec<Level>> {
        let names = match self {
            Self::List(names) => names,
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(Level::from_str)
            .collect()
    }
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("VICE_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("vice/config.toml")
}

fn load_file_overrides(path: &Path) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| ViceError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| ViceError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> Result<ConfigOverrides> {
    let detail_threshold = match env::var("VICE_DETAIL_THRESHOLD") {
        Ok(v) => Some(v.trim().parse::<usize>().map_err(|e| {
            ViceError::Config(format!("bad VICE_DETAIL_THRESHOLD in environment: {e}"))
        })?),
        Err(_) => None,
    };

    Ok(ConfigOverrides {
        color: env::var("VICE_COLOR").ok(),
        symbols: env::var("VICE_SYMBOLS").ok(),
        detail_threshold,
        quiet_levels: env::var("VICE_QUIET_LEVELS").ok().map(QuietLevels::Joined),
        gutter_width: None,
    })
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.color {
        cfg.color = v
            .parse()
            .map_err(|e| ViceError::Config(format!("bad color in {source}: {e}")))?;
    }
    if let Some(v) = overrides.symbols {
        cfg.symbols = v
            .parse()
            .map_err(|e| ViceError::Config(format!("bad symbols in {source}: {e}")))?;
    }
    if let Some(v) = overrides.detail_threshold {
        cfg.detail_threshold = v;
    }
    if let Some(v) = overrides.quiet_levels {
        cfg.quiet_levels = v
            .parse()
            .map_err(|e| ViceError::Config(format!("bad quiet_levels in {source}: {e}")))?;
    }
    if let Some(v) = overrides.gutter_width {
        cfg.gutter_width = v;
    }
    Ok(())
}
