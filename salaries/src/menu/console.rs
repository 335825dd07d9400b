//! Levelled console output for the interactive menu.
//!
//! Every message is written to the menu's output and mirrored to the
//! `log` facade, so a session can be followed from stderr with
//! `RUST_LOG=salaries=info`.

use std::io::{self, Write};

/// Message level for console display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn prefix(self) -> &'static str {
        match self {
            Level::Info => "",
            Level::Success => "✓ ",
            Level::Warning => "⚠️ ",
            Level::Error => "❌ ",
        }
    }
}

/// Writer wrapper used by the menu for all user-facing output.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Plain line, not mirrored to the log (record listings, menu text).
    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())
    }

    pub fn info(&mut self, msg: impl AsRef<str>) -> io::Result<()> {
        self.emit(Level::Info, msg.as_ref())
    }

    pub fn success(&mut self, msg: impl AsRef<str>) -> io::Result<()> {
        self.emit(Level::Success, msg.as_ref())
    }

    pub fn warning(&mut self, msg: impl AsRef<str>) -> io::Result<()> {
        self.emit(Level::Warning, msg.as_ref())
    }

    pub fn error(&mut self, msg: impl AsRef<str>) -> io::Result<()> {
        self.emit(Level::Error, msg.as_ref())
    }

    fn emit(&mut self, level: Level, msg: &str) -> io::Result<()> {
        match level {
            Level::Info | Level::Success => log::info!("{}", msg),
            Level::Warning => log::warn!("{}", msg),
            Level::Error => log::error!("{}", msg),
        }
        writeln!(self.out, "{}{}", level.prefix(), msg)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
