//! CLI styling utilities
//!
//! Provides semantic styling via the [`Stylize`] trait with automatic
//! terminal color support detection (delegated to `owo-colors`).
//!
//! # Color Palette
//!
//! | Method       | Color  | Stream | Semantic Use                        |
//! |--------------|--------|--------|-------------------------------------|
//! | `.accent()`  | Cyan   | stdout | Primary info: IDs, phases, commands |
//! | `.success()` | Green  | stdout | Completed phases, done              |
//! | `.error()`   | Red    | stderr | Failures, error messages            |
//! | `.warn()`    | Yellow | stderr | Warnings, unknown phases            |
//! | `.muted()`   | Dim    | stdout | Secondary: hints, timestamps        |
//! | `.emphasis()`| Bold   | stdout | Headers, current phase              |

use std::fmt::{self, Display};

use owo_colors::{OwoColorize, Stream, Style};

// ============================================================================
// Style definitions (single source of truth for color palette)
// ============================================================================

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

// ============================================================================
// Styled wrapper
// ============================================================================

/// A value with semantic styling applied.
///
/// Implements [`Display`] to render with ANSI codes when supported.
/// `owo-colors` respects `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, and TTY
/// detection.
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }

    /// Override to render for stdout stream detection.
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

// ============================================================================
// Stylize trait
// ============================================================================

/// Extension trait for semantic terminal styling.
///
/// Automatically implemented for all [`Display`] types.
pub trait Stylize: Display {
    /// Accent color (cyan) for primary information.
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Success color (green) for completion states.
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Error color (red) for failures. Default stream: stderr
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Warning color (yellow). Default stream: stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Muted style (dim) for secondary information.
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Emphasis style (bold) for important text.
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

// ============================================================================
// Symbols (Unicode)
// ============================================================================

/// Success checkmark
pub const CHECK: &str = "✓";

/// Error/failure cross
pub const CROSS: &str = "✗";

/// Arrow for steps/actions
pub const ARROW: &str = "→";

/// Upcoming phase marker
pub const BULLET: &str = "○";

/// Current phase marker
pub const CURRENT: &str = "●";

const BAR_FILLED: &str = "█";
const BAR_EMPTY: &str = "░";
const BAR_WIDTH: usize = 20;

// ============================================================================
// Pre-styled symbol helpers
// ============================================================================

/// Green checkmark for success states.
#[inline]
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross for error/failure states (renders to stderr by default).
#[inline]
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// Cyan arrow for action steps.
#[inline]
pub const fn arrow() -> Styled<&'static str> {
    Styled::new(ARROW, ACCENT, Stream::Stdout)
}

/// Dimmed bullet for upcoming phases.
#[inline]
pub const fn bullet() -> Styled<&'static str> {
    Styled::new(BULLET, MUTED, Stream::Stdout)
}

/// Bold marker for the current phase.
#[inline]
pub const fn current() -> Styled<&'static str> {
    Styled::new(CURRENT, EMPHASIS, Stream::Stdout)
}

/// Text progress bar for a 0..=100 percentage
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        BAR_FILLED.repeat(filled),
        BAR_EMPTY.repeat(BAR_WIDTH - filled)
    )
}

// ============================================================================
// Spinner Styles
// ============================================================================

use indicatif::ProgressStyle;
use std::sync::OnceLock;

/// Default spinner style - cyan dots.
///
/// Template validated once on first call via `OnceLock`.
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
