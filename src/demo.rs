// tagdispatch - Model summary walkthrough
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The demo registry: a `describe` generic over fitted-model objects and a
//! `format` generic over the implicit classes of basic values.

use tagdispatch_core::{
    ClassVector, Dispatcher, Error, MethodCall, MethodRegistry, Result, Value,
};

use crate::output::Output;

fn count(call: &MethodCall<'_>, name: &str) -> Result<i64> {
    let value = call.field(name)?;
    value
        .as_i64()
        .ok_or_else(|| Error::type_error_in(format!("field '{}'", name), "integer", value.type_name()))
}

fn text(call: &MethodCall<'_>, name: &str) -> Result<String> {
    let value = call.field(name)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::type_error_in(format!("field '{}'", name), "character", value.type_name()))
}

fn register_describe(registry: &mut MethodRegistry) -> Result<()> {
    registry.register("describe", "rpart", |call| {
        Ok(Value::string(format!(
            "decision tree with {} leaves (method: {})",
            count(call, "n_leaves")?,
            text(call, "method")?
        )))
    })?;

    registry.register("describe", "gbm", |call| {
        Ok(Value::string(format!(
            "gradient boosted model: {} trees, shrinkage {}, {} loss",
            count(call, "n_trees")?,
            call.number("shrinkage")?,
            text(call, "distribution")?
        )))
    })?;

    registry.register("describe", "randomForest", |call| {
        Ok(Value::string(format!(
            "random forest ({}): {} trees, mtry = {}",
            text(call, "type")?,
            count(call, "ntree")?,
            count(call, "mtry")?
        )))
    })?;

    // Formula fits add their call to whatever the plain forest method reports.
    registry.register("describe", "randomForest.formula", |call| {
        let inner = call.next_method()?;
        let inner = inner
            .as_str()
            .ok_or_else(|| Error::type_error_in("describe", "character", inner.type_name()))?;
        Ok(Value::string(format!("{}, fitted from {}", inner, text(call, "formula")?)))
    })?;

    registry.register_default("describe", |call| {
        Ok(Value::string(format!(
            "no describe method for objects of class {}",
            call.class()
        )))
    });
    Ok(())
}

fn register_format(registry: &mut MethodRegistry) -> Result<()> {
    registry.register("format", "numeric", |call| match call.value().as_f64() {
        Some(n) => Ok(Value::string(format!("{:.3}", n))),
        None => Err(Error::type_error_in("format", "numeric", call.value().type_name())),
    })?;
    registry.register("format", "integer", |call| {
        Ok(Value::string(format!("{} (integer)", call.value())))
    })?;
    registry.register("format", "character", |call| match call.value().as_str() {
        Some(s) => Ok(Value::string(format!("{} chars: {}", s.chars().count(), s))),
        None => Err(Error::type_error_in("format", "character", call.value().type_name())),
    })?;
    registry.register_default("format", |call| {
        Ok(Value::string(format!(
            "no format method for class {}, shown as {}",
            call.class(),
            call.value()
        )))
    });
    Ok(())
}

/// Registry with every demo generic bound.
pub fn registry() -> Result<MethodRegistry> {
    let mut registry = MethodRegistry::new();
    register_describe(&mut registry)?;
    register_format(&mut registry)?;
    Ok(registry)
}

/// The fitted-model objects used by the walkthrough.
pub fn models() -> Result<Vec<Value>> {
    Ok(vec![
        Value::object(
            ClassVector::new(["rpart"])?,
            [
                ("n_leaves", Value::Integer(7)),
                ("method", Value::from("anova")),
            ],
        ),
        Value::object(
            ClassVector::new(["gbm"])?,
            [
                ("n_trees", Value::Integer(500)),
                ("shrinkage", Value::Double(0.01)),
                ("distribution", Value::from("gaussian")),
            ],
        ),
        Value::object(
            ClassVector::new(["randomForest.formula", "randomForest"])?,
            [
                ("ntree", Value::Integer(500)),
                ("mtry", Value::Integer(3)),
                ("type", Value::from("regression")),
                ("formula", Value::from("medv ~ .")),
            ],
        ),
        Value::object(ClassVector::new(["lm"])?, [("rank", Value::Integer(2))]),
    ])
}

fn looks_numeric(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

/// Parse a `NAME=VALUE` field. Values read as integer, double, logical, or text.
pub fn parse_field(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::handler(format!("expected NAME=VALUE, got '{}'", raw)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::handler(format!("empty field name in '{}'", raw)));
    }
    let value = value.trim();
    let number = if looks_numeric(value) {
        value
            .parse::<i64>()
            .map(Value::Integer)
            .ok()
            .or_else(|| value.parse::<f64>().ok().map(Value::Double))
    } else {
        None
    };
    let parsed = number.unwrap_or_else(|| match value {
        "TRUE" => Value::Logical(true),
        "FALSE" => Value::Logical(false),
        _ => Value::from(value),
    });
    Ok((name.to_string(), parsed))
}

/// Run one call and print it. Errors are left for the caller to report.
pub fn report(
    out: &Output,
    dispatcher: &Dispatcher,
    generic: &str,
    value: &Value,
) -> Result<Value> {
    let dispatched = dispatcher.dispatch_traced(generic, value, &[])?;
    out.dispatched(generic, &value.class(), &dispatched);
    Ok(dispatched.value)
}

/// Walk through both demo generics. Returns the number of failed calls.
pub fn run(out: &Output, dispatcher: &Dispatcher) -> Result<usize> {
    let mut failures = 0;

    out.heading("Basic values");
    let basics = [
        Value::Double(3.14159),
        Value::Integer(42),
        Value::from("text"),
        Value::Logical(true),
        Value::Null,
    ];
    for value in &basics {
        if let Err(e) = report(out, dispatcher, "format", value) {
            out.error(&e.to_string());
            failures += 1;
        }
    }

    out.heading("Fitted models");
    for model in models()? {
        if let Err(e) = report(out, dispatcher, "describe", &model) {
            out.error(&e.to_string());
            failures += 1;
        }
    }

    if failures > 0 {
        out.info(&format!("{} call(s) failed", failures));
    }
    Ok(failures)
}
