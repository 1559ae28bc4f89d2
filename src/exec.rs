//! The module responsible for running external commands filled with location data.
//!
//! A template such as `echo {{City}} {{Latitude}}` names fields of
//! [`LocationInfo`]. After rendering, the command line is split on single
//! spaces, so a value holding spaces turns into several arguments.

use std::{
    io,
    process::{Command, ExitStatus, Stdio},
    sync::{Arc, Mutex},
};

use log::debug;
use minijinja::{
    value::{Object, Value},
    Environment, UndefinedBehavior,
};
use thiserror::Error;

use crate::location::{field, FieldValue, LocationInfo};

/// The command template can not be filled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    Syntax(String),
    #[error("Template uses unknown field {0}")]
    UnknownField(String),
}

/// The command could not run or did not succeed.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Command is empty")]
    EmptyCommand,
    #[error("Unable to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} failed: {status}")]
    Status { program: String, status: ExitStatus },
}

/// Template context resolving field names against one record.
#[derive(Debug)]
struct FieldContext {
    info: LocationInfo,
    /// First name that did not resolve.
    missing: Arc<Mutex<Option<String>>>,
}

impl Object for FieldContext {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let name = key.as_str()?;
        match field(name) {
            Some(f) => Some(match (f.get)(&self.info) {
                FieldValue::Text(s) => Value::from(s),
                FieldValue::Int(i) => Value::from(i),
                FieldValue::Float(v) => Value::from(v),
                FieldValue::Bool(b) => Value::from(b),
            }),
            None => {
                if let Ok(mut missing) = self.missing.lock() {
                    missing.get_or_insert_with(|| name.to_owned());
                }
                None
            }
        }
    }
}

/// Fill `template` with values from `info` and split it into arguments.
pub fn render_template(
    template: &str,
    info: &LocationInfo,
) -> Result<Vec<String>, TemplateError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let missing = Arc::new(Mutex::new(None));
    let ctx = Value::from_object(FieldContext {
        info: info.clone(),
        missing: Arc::clone(&missing),
    });

    let rendered = env.render_str(template, ctx).map_err(|e| {
        let name = missing.lock().ok().and_then(|mut m| m.take());
        match name {
            Some(name) => TemplateError::UnknownField(name),
            None => TemplateError::Syntax(e.to_string()),
        }
    })?;
    debug!("rendered command: {}", rendered);

    Ok(rendered.split(' ').map(str::to_owned).collect())
}

/// Run `args[0]` with the remaining arguments and wait for it to finish.
///
/// The child writes straight to this process' stdout and stderr.
pub fn run(args: &[String]) -> Result<(), ExecError> {
    let (program, rest) = args.split_first().ok_or(ExecError::EmptyCommand)?;
    debug!("running {} with {:?}", program, rest);

    let status = Command::new(program)
        .args(rest)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ExecError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Status {
            program: program.clone(),
            status,
        })
    }
}
