//! The module responsible for turning a location record into output.
//!

use std::fmt::{self, Write};

use colored::Colorize;

use super::{
    record::{LocationInfo, FIELDS},
    select::{Selection, ALL},
};

/// One `Name: value` line per selected field.
pub fn text<S: AsRef<str>>(info: &LocationInfo, fields: &[S]) -> String {
    let mut out = String::new();
    for f in Selection::new(fields).included() {
        // Writing into a String can not fail.
        let _ = writeln!(out, "{}: {}", f.name, (f.get)(info));
    }
    out
}

/// JSON holding only the selected fields.
///
/// The selected values are copied into an empty record before serializing, so
/// a selected string that is empty is left out just like an unselected one.
pub fn json<S: AsRef<str>>(info: &LocationInfo, fields: &[S]) -> serde_json::Result<Vec<u8>> {
    let mut aux = LocationInfo::default();
    for f in Selection::new(fields).included() {
        (f.copy)(&mut aux, info);
    }
    serde_json::to_vec(&aux)
}

/// Bullet list describing every selectable field.
pub fn description() -> String {
    let mut out = String::new();
    for f in FIELDS.iter().filter(|f| f.selectable) {
        let _ = write!(out, "- {}", f.name.bold());
        if let Some(description) = f.description {
            let _ = write!(out, ": {}", description);
        }
        if let Some(example) = f.example {
            let _ = write!(out, ", {}", format!("ex. {}", example).as_str().italic());
        }
        out.push_str(".\n");
    }
    out
}

/// Every selectable field as text.
impl fmt::Display for LocationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&text(self, &[ALL]))
    }
}
