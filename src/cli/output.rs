//! Colored terminal output.
//!
//! Status lines go to stdout, warnings to stderr. Quiet mode (used for JSON
//! output) suppresses everything except warnings.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, Write};

/// Terminal output with verbosity control
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color_choice: ColorChoice,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color_choice: ColorChoice::Auto,
        }
    }

    fn write_line(
        stream: &mut StandardStream,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        stream.set_color(&spec)?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }

    fn stdout_line(
        &self,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(self.color_choice);
        Self::write_line(&mut stdout, color, bold, prefix, message)
    }

    /// Print message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.stdout_line(Some(Color::Cyan), false, "  ", message)
        } else {
            Ok(())
        }
    }

    /// Print warning message (never suppressed)
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(self.color_choice);
        Self::write_line(&mut stderr, Some(Color::Yellow), true, "warning: ", message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.stdout_line(Some(Color::Green), true, "✓ ", message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.stdout_line(Some(Color::Blue), true, "→ ", message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(title.chars().count());
        self.stdout_line(Some(Color::White), true, &format!("\n{title}\n"), &rule)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.stdout_line(None, false, "    ", message)
    }
}
