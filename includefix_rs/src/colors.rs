//! Terminal color utilities for CLI output.
//!
//! ANSI color codes and semantic helpers so warnings, paths and counts
//! render consistently across the report.

use std::io::IsTerminal;

use crate::types::ColorMode;

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

pub const BRIGHT_CYAN: &str = "\x1b[96m";

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Fatal problems - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Warnings, ambiguous resolutions - YELLOW
    pub fn warn(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// Success, clean files - GREEN
    pub fn ok(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// File paths - CYAN
    pub fn path(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    /// Headers, titles - BOLD
    pub fn header(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    /// Secondary info, hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    /// Numbers, counts - BRIGHT_CYAN
    pub fn number(&self, n: impl std::fmt::Display) -> String {
        self.wrap(&n.to_string(), BRIGHT_CYAN)
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
