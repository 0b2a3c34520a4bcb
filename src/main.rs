// tagdispatch - Single-dispatch generic functions over class-tagged values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod cli;
mod demo;
mod output;

use std::process;

use clap::Parser;
use tagdispatch_core::{ClassVector, Dispatched, Dispatcher, MethodRegistry, Result, Value};

use cli::{Cli, Commands, RunConfig};
use output::Output;

fn main() {
    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli);
    let out = Output::new(config.color, config.verbose);

    match run(cli.command.unwrap_or(Commands::Demo), &config, &out) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            out.error(&e.to_string());
            process::exit(1);
        }
    }
}

/// Run one subcommand. `Ok(false)` means it finished but some calls failed.
fn run(command: Commands, config: &RunConfig, out: &Output) -> Result<bool> {
    let dispatcher = Dispatcher::with_config(demo::registry()?, config.dispatch.clone());

    match command {
        Commands::Demo => Ok(demo::run(out, &dispatcher)? == 0),
        Commands::Dispatch {
            generic,
            class,
            fields,
        } => {
            let (class, dispatched) = dispatch_object(&dispatcher, &generic, &class, &fields)?;
            out.dispatched(&generic, &class, &dispatched);
            Ok(true)
        }
        Commands::Methods { generic } => {
            let names: Vec<String> = match generic {
                Some(name) => vec![name],
                None => dispatcher
                    .registry()
                    .generics()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            };
            for name in &names {
                match method_listing(dispatcher.registry(), name) {
                    Some(lines) => {
                        out.heading(name);
                        for line in lines {
                            println!("  {}", line);
                        }
                    }
                    None => out.info(&format!("no methods registered for '{}'", name)),
                }
            }
            Ok(true)
        }
    }
}

/// Build the object named on the command line: a class list and `NAME=VALUE` fields.
fn build_object(class: &str, fields: &[String]) -> Result<Value> {
    let class = ClassVector::parse(class)?;
    let fields = fields
        .iter()
        .map(|raw| demo::parse_field(raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::object(class, fields))
}

/// Call `generic` on an object built from command-line text. Nothing is printed.
fn dispatch_object(
    dispatcher: &Dispatcher,
    generic: &str,
    class: &str,
    fields: &[String],
) -> Result<(ClassVector, Dispatched)> {
    let value = build_object(class, fields)?;
    let dispatched = dispatcher.dispatch_traced(generic, &value, &[])?;
    Ok((value.class(), dispatched))
}

/// `generic.tag` lines for each method, then `generic.default`. `None` for an
/// unknown generic.
fn method_listing(registry: &MethodRegistry, generic: &str) -> Option<Vec<String>> {
    let function = registry.generic(generic)?;
    let mut lines: Vec<String> = registry
        .methods(generic)
        .iter()
        .map(|tag| format!("{}.{}", generic, tag))
        .collect();
    if function.has_default() {
        lines.push(format!("{}.default", generic));
    }
    Some(lines)
}
