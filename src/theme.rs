use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub header: Style,
    pub selected: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    /// Add/edit form chrome.
    pub accent: Style,
    /// Delete confirmation chrome.
    pub danger: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            selected: Style::new().fg(Color::Black).bg(Color::Cyan),
            dim: Style::new().fg(Color::DarkGray),
            border: Style::new().fg(Color::Gray),
            status: Style::new().fg(Color::White).bg(Color::DarkGray),
            accent: Style::new().fg(Color::Green),
            danger: Style::new().fg(Color::Red),
        }
    }

    fn light() -> Self {
        Self {
            name: "light".to_string(),
            header: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
            selected: Style::new().fg(Color::White).bg(Color::Blue),
            dim: Style::new().fg(Color::Gray),
            border: Style::new().fg(Color::DarkGray),
            status: Style::new().fg(Color::Black).bg(Color::Gray),
            accent: Style::new().fg(Color::Blue),
            danger: Style::new().fg(Color::LightRed),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reminder-tui").join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    header_fg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    accent_fg: Option<String>,
    danger_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.accent_fg.as_deref().and_then(parse_color) {
            theme.accent = theme.accent.fg(c);
        }
        if let Some(c) = self.danger_fg.as_deref().and_then(parse_color) {
            theme.danger = theme.danger.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        // get() rather than byte slicing: a multibyte char in the value
        // must parse as None, not panic on a non-boundary slice.
        let r = u8::from_str_radix(s.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(s.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(s.get(5..7)?, 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("  cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("mauve"), None);
        assert_eq!(parse_color("#ff80"), None);
        // 7 bytes but not 7 hex digits; must not panic mid-char.
        assert_eq!(parse_color("#1é234"), None);
    }

    #[test]
    fn config_overrides_apply_on_top_of_preset() {
        let config: ThemeConfig = toml::from_str(
            r##"
            preset = "light"
            accent_fg = "#bd93f9"
            "##,
        )
        .unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.name, "light");
        assert_eq!(theme.accent.fg, Some(Color::Rgb(189, 147, 249)));
    }
}
