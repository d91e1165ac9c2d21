//! Terminal colouring without global state
//!
//! Callers pass the tone explicitly and the palette decides whether any
//! escape codes are emitted at all.

use colored::{Color, Colorize};

/// Semantic role of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    Warning,
    Info,
    Prompt,
    Accent,
    Heading,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => Color::BrightGreen,
            Tone::Failure => Color::BrightRed,
            Tone::Warning => Color::BrightYellow,
            Tone::Info => Color::BrightBlue,
            Tone::Prompt | Tone::Heading => Color::BrightCyan,
            Tone::Accent => Color::BrightYellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Palette that never emits escape codes
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let colored = text.color(tone.color());
        match tone {
            Tone::Heading => colored.bold().to_string(),
            _ => colored.to_string(),
        }
    }
}
