// tagdispatch - Terminal output
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Colour-coded output, and the verbose resolution trace.

use owo_colors::{OwoColorize, Style};
use tagdispatch_core::{ClassVector, Dispatched, Resolution};

pub struct Output {
    color: bool,
    verbose: bool,
}

impl Output {
    pub fn new(color: bool, verbose: bool) -> Self {
        Output { color, verbose }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", self.paint("error:", Style::new().red().bold()), msg);
    }

    pub fn warning(&self, msg: &str) {
        eprintln!("{} {}", self.paint("warning:", Style::new().yellow().bold()), msg);
    }

    pub fn info(&self, msg: &str) {
        println!("{} {}", self.paint("info:", Style::new().blue().bold()), msg);
    }

    pub fn note(&self, msg: &str) {
        println!("{} {}", self.paint("note:", Style::new().cyan()), msg);
    }

    pub fn heading(&self, title: &str) {
        println!("\n{}", self.paint(title, Style::new().bold().underline()));
    }

    /// One `generic(class) => result` line
    pub fn result(&self, generic: &str, class: &ClassVector, result: &str) {
        println!(
            "  {}({}) {} {}",
            self.paint(generic, Style::new().bright_white()),
            class,
            self.paint("=>", Style::new().bright_blue()),
            result
        );
    }

    /// Resolution trace, shown only with --verbose.
    ///
    /// Default-method calls are flagged as warnings so they stand apart from
    /// class methods in the trace.
    pub fn resolution(&self, generic: &str, class: &ClassVector, resolution: &Resolution) {
        if !self.verbose {
            return;
        }
        let line = format!("{} for {} resolved to the {}", generic, class, resolution);
        if resolution.is_default() {
            self.warning(&line);
        } else {
            self.note(&line);
        }
    }

    /// Report a finished call: its resolution (when verbose) and its result.
    /// Text results print without quotes.
    pub fn dispatched(&self, generic: &str, class: &ClassVector, dispatched: &Dispatched) {
        self.resolution(generic, class, &dispatched.resolution);
        let shown = match dispatched.value.as_str() {
            Some(s) => s.to_string(),
            None => dispatched.value.to_string(),
        };
        self.result(generic, class, &shown);
    }
}
