//! Colored terminal output for build and publish progress.
//!
//! Inside GitHub Actions, sections are emitted as `::group::` blocks so the
//! build log folds per stage in the workflow UI.

use crate::EnvConfig;
use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    color: ColorChoice,
    verbose: bool,
    quiet: bool,
    grouped: bool,
    group_open: std::cell::Cell<bool>,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(self.color),
            color: self.color,
            verbose: self.verbose,
            quiet: self.quiet,
            grouped: self.grouped,
            group_open: std::cell::Cell::new(false),
        }
    }
}

/// `NO_COLOR` disables color; Actions logs render ANSI even without a tty
fn color_choice(env: &EnvConfig) -> ColorChoice {
    if env.get("NO_COLOR").is_some() {
        ColorChoice::Never
    } else if env.is_github_actions() {
        ColorChoice::AlwaysAnsi
    } else {
        ColorChoice::Auto
    }
}

impl OutputManager {
    /// Create a new output manager; color and grouping follow `env`
    pub fn new(verbose: bool, quiet: bool, env: &EnvConfig) -> Self {
        let color = color_choice(env);
        Self {
            bufwtr: BufferWriter::stdout(color),
            color,
            verbose,
            quiet,
            grouped: env.is_github_actions(),
            group_open: std::cell::Cell::new(false),
        }
    }

    fn marked(&self, symbol: &str, color: Color, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(&mut buffer, "{}", symbol);
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        self.bufwtr.print(&buffer)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.end_group()?;
        self.marked("✓", Color::Green, message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.marked("⚠", Color::Yellow, message)
    }

    /// Print an error message to stderr (always shown)
    pub fn error(&self, message: &str) {
        let _ = self.end_group();

        let bufwtr = BufferWriter::stderr(self.color);
        let mut buffer = bufwtr.buffer();
        if buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))
            .is_err()
            || writeln!(&mut buffer, "✗ {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("✗ {}", message);
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.marked("→", Color::Blue, message)
    }

    /// Start a section; closes the previous group when running in Actions
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.end_group()?;

        let mut buffer = self.bufwtr.buffer();
        if self.grouped {
            let _ = writeln!(&mut buffer, "::group::{}", title);
            self.group_open.set(true);
        } else {
            let _ = writeln!(&mut buffer);
            let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
            let _ = writeln!(&mut buffer, "═══ {} ═══", title);
            let _ = buffer.reset();
        }
        self.bufwtr.print(&buffer)
    }

    fn end_group(&self) -> std::io::Result<()> {
        if !self.group_open.replace(false) {
            return Ok(());
        }
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "::endgroup::");
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.println(&format!("    {}", message))
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        self.bufwtr.print(&buffer)
    }
}
