//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::assessment::RiskTier;
use crate::config::ThemeConfig;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tier colors (traffic light pattern)
    pub tier_low: Color,
    pub tier_medium: Color,
    pub tier_high: Color,

    // Progress gauge
    pub gauge_filled: Color,
    pub gauge_empty: Color,

    // Option list
    pub option_cursor: Style,
    pub answer_marker: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub question_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_key: Style,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            tier_low: Color::Green,
            tier_medium: Color::Yellow,
            tier_high: Color::Red,
            gauge_filled: Color::Cyan,
            gauge_empty: Color::Indexed(236),
            option_cursor: Style::new().reversed(),
            answer_marker: Color::Green,
            muted: Color::Gray,
            title_color: Color::Cyan,
            question_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_key: Style::new().fg(Color::Cyan).bold(),
        }
    }

    /// Light theme palette (darker foregrounds, pale backgrounds)
    pub fn light() -> Self {
        Self {
            tier_low: Color::Rgb(0, 128, 0),
            tier_medium: Color::Rgb(170, 110, 0),
            tier_high: Color::Rgb(190, 0, 0),
            gauge_filled: Color::Blue,
            gauge_empty: Color::Indexed(253),
            option_cursor: Style::new().reversed(),
            answer_marker: Color::Rgb(0, 128, 0),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            question_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(190, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_key: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn tier_color(&self, tier: RiskTier) -> Color {
        match tier {
            RiskTier::Low => self.tier_low,
            RiskTier::Medium => self.tier_medium,
            RiskTier::High => self.tier_high,
        }
    }
}

/// Pick the palette for a theme setting. `auto` asks the terminal for its
/// background luminance and falls back to dark when it cannot tell.
pub fn resolve_theme(config: ThemeConfig) -> ThemeColors {
    match config {
        ThemeConfig::Dark => ThemeColors::dark(),
        ThemeConfig::Light => ThemeColors::light(),
        ThemeConfig::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors_dark() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.tier_color(RiskTier::Low), Color::Green);
        assert_eq!(theme.tier_color(RiskTier::Medium), Color::Yellow);
        assert_eq!(theme.tier_color(RiskTier::High), Color::Red);
    }

    #[test]
    fn test_explicit_theme_selection() {
        assert_eq!(resolve_theme(ThemeConfig::Light).title_color, Color::Blue);
        assert_eq!(resolve_theme(ThemeConfig::Dark).title_color, Color::Cyan);
    }
}
