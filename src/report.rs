//! Console status protocol
//!
//! Every significant step of a run prints one prefixed line: `[GEN]` for
//! progress, `[INFO]` for notices, `[WARNING]` for recoverable problems and
//! `[ERROR]` for failures. The lines go to stdout by default; tests capture them
//! with an in-memory buffer.

use std::fmt::Display;
use std::io::{Stdout, Write};

/// Prefix of a console status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Gen,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn prefix(&self) -> &'static str {
        match self {
            Level::Gen => "[GEN]",
            Level::Info => "[INFO]",
            Level::Warning => "[WARNING]",
            Level::Error => "[ERROR]",
        }
    }
}

/// Writes status lines to a sink
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<Stdout> {
    pub fn stdout() -> Self {
        Reporter::new(std::io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    pub fn gen(&mut self, message: impl Display) {
        self.line(Level::Gen, message);
    }

    pub fn info(&mut self, message: impl Display) {
        self.line(Level::Info, message);
    }

    pub fn warning(&mut self, message: impl Display) {
        self.line(Level::Warning, message);
    }

    pub fn error(&mut self, message: impl Display) {
        self.line(Level::Error, message);
    }

    pub fn line(&mut self, level: Level, message: impl Display) {
        // A closed stdout must not abort generation
        if let Err(err) = writeln!(self.out, "{} {}", level.prefix(), message) {
            tracing::warn!(error = %err, "failed to write status line");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.gen("Source file `a.json` has been loaded.");
        reporter.warning("careful");
        reporter.error("boom");

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[GEN] Source file `a.json` has been loaded.",
                "[WARNING] careful",
                "[ERROR] boom",
            ]
        );
    }
}
