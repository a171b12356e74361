//! Colours for the board and sidebar, optionally loaded from a btop-style
//! `theme[key]="#RRGGBB"` file.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Locked blocks.
    pub block: Color,
    /// Falling piece.
    pub active: Color,
    /// Next-piece preview.
    pub preview: Color,
    /// Board and sidebar background.
    pub bg: Color,
    pub border: Color,
    /// Score text.
    pub text: Color,
    /// Labels and titles.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark()
    }
}

impl Theme {
    /// One Dark colours.
    pub const fn onedark() -> Self {
        Self {
            block: Color::Rgb(0x61, 0xAF, 0xEF),
            active: Color::Rgb(0xE5, 0xC0, 0x7B),
            preview: Color::Rgb(0x98, 0xC3, 0x79),
            bg: Color::Rgb(0x28, 0x2C, 0x34),
            border: Color::Rgb(0x3F, 0x44, 0x4F),
            text: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xC6, 0x78, 0xDD),
        }
    }

    /// Load from file; keys missing from the file keep their default colour.
    /// No path (or a path that does not exist) gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_theme_file(&s)))
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let base = Self::default();
        let get = |key: &str, fallback: Color| {
            map.get(key)
                .and_then(|v| parse_hex(v).ok())
                .unwrap_or(fallback)
        };
        Self {
            block: get("block", base.block),
            active: get("active", base.active),
            preview: get("preview", base.preview),
            bg: get("bg", base.bg),
            border: get("border", base.border),
            text: get("text", base.text),
            title: get("title", base.title),
        }
    }
}

/// Parse `theme[key]="value"` lines into key -> value. Comments (#) and
/// malformed lines are skipped.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let rest = line.strip_prefix("theme[")?;
            let (key, rest) = rest.split_once(']')?;
            let (_, value) = rest.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (!value.is_empty()).then(|| (key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Parse hex colour "#RRGGBB" or "#RGB".
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };
    match digits.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(parse_hex("#12"), Err(ThemeError::InvalidHex(_))));
        assert!(matches!(parse_hex("#GGHHII"), Err(ThemeError::InvalidHex(_))));
    }

    #[test]
    fn test_parse_theme_lines() {
        let map = parse_theme_file(
            "# comment\ntheme[block]=\"#112233\"\ntheme[ title ] = '#FFF'\ngarbage\ntheme[bg]=\"\"\n",
        );
        assert_eq!(map.get("block"), Some(&"#112233".to_string()));
        assert_eq!(map.get("title"), Some(&"#FFF".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_unknown_and_bad_values_fall_back() {
        let map = parse_theme_file("theme[block]=\"#010203\"\ntheme[border]=\"nope\"\ntheme[other]=\"#FFFFFF\"");
        let theme = Theme::from_map(&map);
        assert_eq!(theme.block, Color::Rgb(1, 2, 3));
        assert_eq!(theme.border, Theme::onedark().border);
        assert_eq!(theme.text, Theme::onedark().text);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let theme = Theme::load(Some(Path::new("/definitely/not/here.theme"))).unwrap();
        assert_eq!(theme, Theme::default());
        assert_eq!(Theme::load(None).unwrap(), Theme::default());
    }
}
