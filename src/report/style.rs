//! Console colors and status glyphs.

use console::Style;

use crate::results::{CheckResult, CheckStatus};

/// Styles used by the console report.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// Passing checks (green).
    pub pass: Style,
    /// Blocking failures (bright red).
    pub fail: Style,
    /// Checks that could not be evaluated (red bold).
    pub error: Style,
    /// Warning-level failures (orange).
    pub warning: Style,
    /// Check type names (bold).
    pub check: Style,
    /// Labels such as "Error code" (cyan).
    pub header: Style,
    /// Separators and secondary text.
    pub dim: Style,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    pub fn new() -> Self {
        Self {
            pass: Style::new().green(),
            fail: Style::new().red().bright(),
            error: Style::new().red().bold(),
            warning: Style::new().color256(208),
            check: Style::new().bold(),
            header: Style::new().cyan(),
            dim: Style::new().dim(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            check: Style::new(),
            header: Style::new(),
            dim: Style::new(),
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_terminal(no_color: bool) -> Self {
        if !no_color && should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// The style for a result's glyph and status word.
    pub fn for_result(&self, result: &CheckResult) -> &Style {
        match Glyph::of(result) {
            Glyph::Pass => &self.pass,
            Glyph::Warning => &self.warning,
            Glyph::Fail => &self.fail,
            Glyph::Error => &self.error,
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}

/// How a result is marked in console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Pass,
    Warning,
    Fail,
    Error,
}

impl Glyph {
    pub fn of(result: &CheckResult) -> Self {
        match result.status {
            CheckStatus::Pass => Glyph::Pass,
            CheckStatus::Fail if result.is_warning() => Glyph::Warning,
            CheckStatus::Fail => Glyph::Fail,
            CheckStatus::Error => Glyph::Error,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Glyph::Pass => "✓",
            Glyph::Warning => "⚠",
            Glyph::Fail => "✗",
            Glyph::Error => "⊘",
        }
    }
}
