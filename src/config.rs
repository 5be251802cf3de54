//! User configuration loading from `~/.cadence/config.toml`.

use crate::domain::TagPrefixes;
use crate::ui::theme::ThemePalette;
use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".cadence";
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG_TOML: &str = r##"# cadence configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[tags]
# Release candidate tags look like `<candidate_prefix>-1.3.0`,
# shipped version tags like `<version_prefix>-1.3.0`.
candidate_prefix = "rc"
version_prefix = "version"

[theme]
border = "#c47832"
title = "#ebaa5a"
dim = "dark_gray"
text = "#d2d2c8"
selected_fg = "black"
selected_bg = "#e2b45c"
accent = "#e7b258"
released = "green"
ongoing = "yellow"
error = "red"
info = "cyan"
gauge_label = "black"
gauge_fill = "#f5cd52"
gauge_empty = "#5e501e"
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tags: TagPrefixes,
    pub theme: ThemePalette,
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config(&path)?;
    Ok(path)
}

/// Loads configuration from `~/.cadence/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    parse(&content).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn parse(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;

    Ok(AppConfig {
        tags: raw.tags.into_prefixes()?,
        theme: raw.theme.into_theme()?,
    })
}

fn config_path() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    tags: RawTags,
    theme: RawTheme,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTags {
    candidate_prefix: Option<String>,
    version_prefix: Option<String>,
}

impl RawTags {
    fn into_prefixes(self) -> Result<TagPrefixes> {
        let defaults = TagPrefixes::default();
        let candidate = self
            .candidate_prefix
            .map(|value| value.trim().to_owned())
            .unwrap_or(defaults.candidate);
        let version = self
            .version_prefix
            .map(|value| value.trim().to_owned())
            .unwrap_or(defaults.version);

        if candidate.is_empty() {
            return Err(anyhow!("`tags.candidate_prefix` must not be empty"));
        }
        if version.is_empty() {
            return Err(anyhow!("`tags.version_prefix` must not be empty"));
        }
        if candidate == version {
            return Err(anyhow!(
                "`tags.candidate_prefix` and `tags.version_prefix` must differ"
            ));
        }

        Ok(TagPrefixes { candidate, version })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    border: Option<String>,
    title: Option<String>,
    dim: Option<String>,
    text: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    accent: Option<String>,
    released: Option<String>,
    ongoing: Option<String>,
    error: Option<String>,
    info: Option<String>,
    gauge_label: Option<String>,
    gauge_fill: Option<String>,
    gauge_empty: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let defaults = ThemePalette::default();

        Ok(ThemePalette {
            border: parse_or_default(self.border, defaults.border, "theme.border")?,
            title: parse_or_default(self.title, defaults.title, "theme.title")?,
            dim: parse_or_default(self.dim, defaults.dim, "theme.dim")?,
            text: parse_or_default(self.text, defaults.text, "theme.text")?,
            selected_fg: parse_or_default(
                self.selected_fg,
                defaults.selected_fg,
                "theme.selected_fg",
            )?,
            selected_bg: parse_or_default(
                self.selected_bg,
                defaults.selected_bg,
                "theme.selected_bg",
            )?,
            accent: parse_or_default(self.accent, defaults.accent, "theme.accent")?,
            released: parse_or_default(self.released, defaults.released, "theme.released")?,
            ongoing: parse_or_default(self.ongoing, defaults.ongoing, "theme.ongoing")?,
            error: parse_or_default(self.error, defaults.error, "theme.error")?,
            info: parse_or_default(self.info, defaults.info, "theme.info")?,
            gauge_label: parse_or_default(
                self.gauge_label,
                defaults.gauge_label,
                "theme.gauge_label",
            )?,
            gauge_fill: parse_or_default(self.gauge_fill, defaults.gauge_fill, "theme.gauge_fill")?,
            gauge_empty: parse_or_default(
                self.gauge_empty,
                defaults.gauge_empty,
                "theme.gauge_empty",
            )?,
        })
    }
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::{parse, parse_color};
    use ratatui::style::Color;

    #[test]
    fn parse_color_supports_hex() {
        assert_eq!(
            parse_color("#112233").unwrap(),
            Color::Rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn parse_color_supports_named_values() {
        assert_eq!(parse_color("light_yellow").unwrap(), Color::LightYellow);
        assert_eq!(parse_color("dark-gray").unwrap(), Color::DarkGray);
    }

    #[test]
    fn default_document_parses() {
        let config = parse(super::DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.tags.candidate, "rc");
        assert_eq!(config.tags.version, "version");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.tags.candidate, "rc");
        assert_eq!(config.theme.border, super::ThemePalette::default().border);
    }

    #[test]
    fn identical_prefixes_are_rejected() {
        let error = parse("[tags]\ncandidate_prefix = \"v\"\nversion_prefix = \"v\"\n")
            .unwrap_err()
            .to_string();
        assert!(error.contains("must differ"));
    }

    #[test]
    fn empty_prefix_is_rejected() {
        assert!(parse("[tags]\ncandidate_prefix = \"  \"\n").is_err());
    }
}
