//! Console output for command results and errors.
//!
//! Results go to `out`, failures to `err`. Color is plain ANSI and is
//! switched off entirely when disabled, so piped output stays clean.

use std::io::{self, Stderr, Stdout, Write};

use anyhow::{Context, Result};
use serde::Serialize;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Width labels are padded to in `field` output.
const LABEL_WIDTH: usize = 25;

/// A pair of output streams plus the color setting.
pub struct Console<W: Write, E: Write> {
    out: W,
    err: E,
    color: bool,
}

impl Console<Stdout, Stderr> {
    /// Console over the process's stdout and stderr.
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), color)
    }
}

impl<W: Write, E: Write> Console<W, E> {
    pub fn new(out: W, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    /// `label: value`, with the label padded and the value highlighted.
    pub fn field(&mut self, label: &str, value: &str) -> io::Result<()> {
        let label = format!("{label}:");
        if self.color {
            writeln!(self.out, "{label:<LABEL_WIDTH$} {GREEN}{value}{RESET}")
        } else {
            writeln!(self.out, "{label:<LABEL_WIDTH$} {value}")
        }
    }

    /// A bare line, never colored.
    pub fn line(&mut self, value: &str) -> io::Result<()> {
        writeln!(self.out, "{value}")
    }

    /// Pretty-printed JSON followed by a newline.
    pub fn json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value).context("serialize output")?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Error message on the error stream.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.err, "{BOLD}{RED}error:{RESET} {message}")
        } else {
            writeln!(self.err, "error: {message}")
        }
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}
