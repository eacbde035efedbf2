//! Text rendering: meters, danger stars, detective lines, typewriter output.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::core::{DetectiveStatus, Gauge};

/// Width of the public opinion bar.
const METER_WIDTH: usize = 24;

/// Screen width for rules and banners.
pub const SCREEN_WIDTH: usize = 60;

/// Public opinion bar and caption for a popularity value.
///
/// ```
/// use the_judge::cli::render::opinion_meter;
/// use the_judge::core::Gauge;
///
/// let (bar, caption) = opinion_meter(Gauge::settle(95));
/// assert_eq!(bar, "█".repeat(24));
/// assert_eq!(caption, "People worship you as a god!");
/// ```
#[must_use]
pub fn opinion_meter(popularity: Gauge) -> (String, &'static str) {
    let (filled, caption) = match popularity.get() {
        p if p < 30 => (2, "People debate your existence"),
        p if p < 50 => (10, "Some see you as a necessary evil"),
        p if p < 70 => (14, "People debate if you're hero or villain"),
        p if p < 90 => (20, "People describe you as an invisible hero"),
        _ => (METER_WIDTH, "People worship you as a god!"),
    };
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(METER_WIDTH - filled));
    (bar, caption)
}

/// Danger as ten stars, filled up to `danger`.
///
/// ```
/// use the_judge::cli::render::danger_stars;
///
/// assert_eq!(danger_stars(3), "★★★☆☆☆☆☆☆☆");
/// ```
#[must_use]
pub fn danger_stars(danger: u8) -> String {
    let filled = usize::from(danger.min(10));
    format!("{}{}", "★".repeat(filled), "☆".repeat(10 - filled))
}

/// Detective line under a docket entry.
#[must_use]
pub fn detective_line(status: &DetectiveStatus<'_>) -> String {
    match status {
        DetectiveStatus::Redacted => "[REDACTED - Investigation sealed]".to_string(),
        DetectiveStatus::Eliminated(_) => "[ELIMINATED]".to_string(),
        DetectiveStatus::Assigned(name) => (*name).to_string(),
        DetectiveStatus::Unassigned => "No official assignment".to_string(),
    }
}

/// Signed percentage, e.g. `+12%` or `-7%`.
#[must_use]
pub fn signed_percent(delta: i32) -> String {
    format!("{delta:+}%")
}

/// Output sink with an optional typewriter effect.
///
/// `line` prints at once; `typed` prints one character at a time with the
/// configured delay. A zero delay makes both instant.
pub struct Typewriter<W: Write> {
    out: W,
    delay: Duration,
}

impl<W: Write> Typewriter<W> {
    /// Delay used by the interactive game.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);

    /// Wrap a writer.
    pub fn new(out: W, delay: Duration) -> Self {
        Self { out, delay }
    }

    /// Print a line at once.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Print an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Print a line one character at a time.
    pub fn typed(&mut self, text: &str) -> io::Result<()> {
        if self.delay.is_zero() {
            return self.line(text);
        }
        for ch in text.chars() {
            write!(self.out, "{ch}")?;
            self.out.flush()?;
            thread::sleep(self.delay);
        }
        writeln!(self.out)
    }

    /// Print text without a newline (for prompts).
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// A full-width rule of `ch`.
    pub fn rule(&mut self, ch: char) -> io::Result<()> {
        let rule: String = std::iter::repeat(ch).take(SCREEN_WIDTH).collect();
        self.line(&rule)
    }

    /// A banner: rule, centered title, rule.
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        self.blank()?;
        self.rule('=')?;
        self.line(&format!("{title:^width$}", width = SCREEN_WIDTH))?;
        self.rule('=')
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
