//! Styling for rendered trace fragments.
//!
//! Renderers produce plain [`String`]s, so styling is baked in as ANSI
//! sequences via [`termcolor::Ansi`]. A sink that doesn't want them uses
//! [`Theme::PLAIN`], which makes every method the identity.

use std::io::Write;

use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Which styles rendered fragments carry.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Embed ANSI styling in rendered strings.
    pub const COLORED: Theme = Theme { colored: true };

    /// Render plain text only. What tests use.
    pub const PLAIN: Theme = Theme { colored: false };

    /// An identifier: a symbolic name or the short tail of a minted id.
    pub(crate) fn identifier(&self, text: &str) -> String {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.paint(&spec, text)
    }

    /// A module's short name.
    pub(crate) fn module(&self, text: &str) -> String {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        self.paint(&spec, text)
    }

    /// The instruction a dump points at.
    pub(crate) fn emphasis(&self, text: &str) -> String {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec.set_underline(true);
        self.paint(&spec, text)
    }

    /// A section label in a dump.
    pub(crate) fn label(&self, text: &str) -> String {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        self.paint(&spec, text)
    }

    /// De-emphasized housekeeping, like step counters.
    pub(crate) fn dim(&self, text: &str) -> String {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        self.paint(&spec, text)
    }

    /// Wrap `text` in the ANSI sequences for `spec`. Any failure along the
    /// way falls back to the unstyled text.
    fn paint(&self, spec: &ColorSpec, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }

        let mut ansi = Ansi::new(Vec::new());

        let ok = ansi.set_color(spec).is_ok()
            && write!(ansi, "{}", text).is_ok()
            && ansi.reset().is_ok();

        if !ok {
            return text.to_string();
        }

        String::from_utf8(ansi.into_inner())
            .unwrap_or_else(|_| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_identity() {
        assert_eq!(Theme::PLAIN.identifier("point"), "point");
        assert_eq!(Theme::PLAIN.emphasis("Halt()"), "Halt()");
    }

    #[test]
    fn colored_wraps_and_resets() {
        let styled = Theme::COLORED.identifier("point");
        assert!(styled.contains("point"));
        assert!(styled.starts_with('\u{1b}'));
        assert!(styled.ends_with('m'));
    }
}
