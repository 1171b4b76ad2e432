//! ANSI styling for report output.
use std::io::IsTerminal as _;

/// Colour palette for report lines.
///
/// When colour is disabled every method returns its input unchanged, so
/// callers never branch on colour support themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    /// Palette that emits ANSI escape sequences.
    #[must_use]
    pub const fn ansi() -> Self {
        Self { color: true }
    }

    /// Palette that leaves text untouched.
    #[must_use]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// Pick a palette for the current process: colour unless `NO_COLOR` is
    /// set or stdout is not a terminal.
    #[must_use]
    pub fn detect() -> Self {
        Self::choose(
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        )
    }

    const fn choose(no_color: bool, terminal: bool) -> Self {
        if !no_color && terminal {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Whether this palette emits escape sequences.
    #[must_use]
    pub const fn is_color(self) -> bool {
        self.color
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Green: completed actions.
    #[must_use]
    pub fn success(self, text: &str) -> String {
        self.paint("32", text)
    }

    /// Red: skipped or failed actions.
    #[must_use]
    pub fn failure(self, text: &str) -> String {
        self.paint("31", text)
    }

    /// Dim: secondary detail such as skip reasons.
    #[must_use]
    pub fn unimportant(self, text: &str) -> String {
        self.paint("1;30", text)
    }

    /// Cyan: commands and rendered content shown in verbose mode.
    #[must_use]
    pub fn debugging(self, text: &str) -> String {
        self.paint("36", text)
    }

    /// Bold yellow: warnings the user should not miss.
    #[must_use]
    pub fn emphasis(self, text: &str) -> String {
        self.paint("1;33", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_is_identity() {
        let p = Palette::plain();
        assert_eq!(p.success("ok"), "ok");
        assert_eq!(p.failure("skip"), "skip");
        assert_eq!(p.unimportant("why"), "why");
        assert_eq!(p.debugging("ln -s a b"), "ln -s a b");
        assert_eq!(p.emphasis("careful"), "careful");
        assert!(!p.is_color());
    }

    #[test]
    fn colour_only_on_a_terminal_without_no_color() {
        assert!(Palette::choose(false, true).is_color());
        assert!(!Palette::choose(true, true).is_color());
        assert!(!Palette::choose(false, false).is_color());
        assert!(!Palette::choose(true, false).is_color());
    }

    #[test]
    fn ansi_palette_wraps_text() {
        let p = Palette::ansi();
        assert_eq!(p.success("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(p.failure("skip"), "\x1b[31mskip\x1b[0m");
        assert_eq!(p.emphasis("!"), "\x1b[1;33m!\x1b[0m");
        assert!(p.is_color());
    }
}
