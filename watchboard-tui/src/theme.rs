//! Parrot/neon theme tokens for the Watchboard TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (title, header row)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses)
//! - **Warning**: Neon orange (refresh in progress, fetch errors)
//! - **Neutral**: Cool purple (unchanged, no data)
//! - **Muted**: Steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use crate::view::RowStyle;

/// Parrot/neon theme for the dashboard
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Electric cyan accent (title, headers)
    pub accent: Color,
    /// Neon green (gains)
    pub positive: Color,
    /// Hot pink (losses)
    pub negative: Color,
    /// Neon orange (loading, errors)
    pub warning: Color,
    /// Cool purple (flat or missing)
    pub neutral: Color,
    /// Steel blue (muted text)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// Create the default Parrot/neon theme
    pub fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Color for a row's style tag
    pub fn row_color(&self, style: RowStyle) -> Color {
        match style {
            RowStyle::Positive => self.positive,
            RowStyle::Negative => self.negative,
            RowStyle::Neutral => self.neutral,
        }
    }

    pub fn row(&self, style: RowStyle) -> Style {
        Style::default().fg(self.row_color(style))
    }

    pub fn accent_bold(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}
