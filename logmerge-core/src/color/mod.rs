#[cfg(test)]
mod tests;

use owo_colors::{Style, XtermColors};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Renders a piece of text, typically by wrapping it in ANSI escape codes.
pub type ColorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Solarized-derived xterm-256 colors, cycled across aliases.
const SOLARIZED: [u8; 8] = [
    253, // whiteish
    64,  // green
    37,  // cyan
    33,  // blue
    61,  // violet
    125, // magenta
    160, // red
    166, // orange
];

const LIGHT_BACKGROUND_BASE: u8 = 234; // blackish

/// The three color functions a source renders with.
#[derive(Clone)]
pub struct Palette {
    pub normal: ColorFn,
    pub grep: ColorFn,
    pub highlight: ColorFn,
}

impl Palette {
    pub fn new(normal: ColorFn, grep: ColorFn, highlight: ColorFn) -> Self {
        Self {
            normal,
            grep,
            highlight,
        }
    }

    /// Palette that leaves text untouched.
    pub fn plain() -> Self {
        let identity: ColorFn = Arc::new(|text: &str| text.to_string());
        Self::new(identity.clone(), identity.clone(), identity)
    }

    /// Foreground `code` for normal text, the same color reversed for matches.
    pub fn xterm(code: u8) -> Self {
        Self::new(
            styled(Style::new().color(XtermColors::from(code))),
            styled(Style::new().color(XtermColors::from(code)).reversed()),
            styled(Style::new().color(XtermColors::from(code)).reversed()),
        )
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette").finish_non_exhaustive()
    }
}

fn styled(style: Style) -> ColorFn {
    Arc::new(move |text: &str| style.style(text).to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light text for dark terminals
    #[default]
    Dark,
    /// Dark text for light terminals
    Light,
    /// No ANSI codes at all
    Off,
}

impl ColorScheme {
    /// The palettes handed out to aliases, in round-robin order.
    pub fn palettes(self) -> Vec<Palette> {
        match self {
            ColorScheme::Off => vec![Palette::plain()],
            ColorScheme::Dark => SOLARIZED.iter().copied().map(Palette::xterm).collect(),
            ColorScheme::Light => {
                let mut codes = SOLARIZED;
                codes[0] = LIGHT_BACKGROUND_BASE;
                codes.iter().copied().map(Palette::xterm).collect()
            }
        }
    }
}
