// tagdispatch - Command line arguments
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::io::IsTerminal;

use clap::{Parser, Subcommand, ValueEnum};
use tagdispatch_core::{DefaultPolicy, DispatchConfig};

#[derive(Parser, Debug)]
#[command(name = "tagdispatch")]
#[command(about = "Single-dispatch generic functions over class-tagged values", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print which method each call resolved to
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Refuse default-method fallbacks
    #[arg(long, global = true)]
    pub strict: bool,

    /// When to use colours
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorWhen,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the model summary example
    Demo,
    /// Call a demo generic on an object with the given class
    Dispatch {
        /// Generic function name, e.g. describe
        generic: String,

        /// Comma-separated class vector, most specific first
        #[arg(short, long, value_name = "TAGS")]
        class: String,

        /// Object field, repeatable
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// List generics, or the methods of one generic
    Methods {
        /// Only show this generic
        generic: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    pub fn should_color(&self) -> bool {
        match self {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Run settings derived from the command line
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub verbose: bool,
    pub color: bool,
    pub dispatch: DispatchConfig,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let policy = if cli.strict {
            DefaultPolicy::Reject
        } else {
            DefaultPolicy::Invoke
        };
        RunConfig {
            verbose: cli.verbose,
            color: cli.color.should_color(),
            dispatch: DispatchConfig::default().with_default_policy(policy),
        }
    }
}
