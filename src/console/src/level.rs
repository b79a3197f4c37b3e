//! The severity of a log channel.

use std::fmt;

use termcolor::Color;

/// Log severities, ordered from least to most verbose. Enabling the console
/// at some level keeps every channel up to and including it live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Success,
    Info,
    Debug,
}

impl Level {
    /// Every level name, least verbose first. Handy for CLI wiring.
    pub const NAMES: [&'static str; 5] =
        ["error", "warn", "success", "info", "debug"];

    /// The name of the level ready to be shown to users.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Success => "success",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// The color its channel tag is printed in.
    pub(crate) fn color(&self) -> Color {
        match self {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Success => Color::Green,
            Level::Info => Color::Blue,
            Level::Debug => Color::Magenta,
        }
    }

    /// Parse a level by name, case-insensitively. Unrecognized names fall
    /// back to the most verbose tier rather than failing.
    pub fn from_name(name: &str) -> Level {
        match name.to_ascii_lowercase().as_str() {
            "error" => Level::Error,
            "warn" | "warning" => Level::Warn,
            "success" => Level::Success,
            "info" => Level::Info,
            _ => Level::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_is_ordered() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Success);
        assert!(Level::Success < Level::Info);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn unknown_names_fall_back_to_the_most_verbose_tier() {
        assert_eq!(Level::from_name("warn"), Level::Warn);
        assert_eq!(Level::from_name("WARNING"), Level::Warn);
        assert_eq!(Level::from_name("chatty"), Level::Debug);
    }
}
