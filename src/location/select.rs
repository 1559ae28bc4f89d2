//! The module responsible for checking and applying the requested field list.
//!

use std::collections::HashMap;

use log::trace;
use thiserror::Error;

use super::record::{field, Field, FIELDS};

/// Field name that stands for every selectable field.
pub const ALL: &str = "All";

/// A requested field does not exist or may not be selected.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid field name {0}")]
pub struct InvalidField(pub String);

/// Check that every requested name can be displayed.
///
/// Names are checked in order. Reaching [`ALL`] ends the check, the names
/// after it are not looked at.
pub fn validate<S: AsRef<str>>(requested: &[S]) -> Result<(), InvalidField> {
    for name in requested.iter().map(AsRef::as_ref) {
        if name == ALL {
            return Ok(());
        }
        match field(name) {
            Some(f) if f.selectable => {}
            _ => return Err(InvalidField(name.to_owned())),
        }
    }
    Ok(())
}

/// One pass over the field catalog deciding which fields to display.
///
/// Yields `(field, included)` for every catalog field in declared order. The
/// pass can not be restarted: once spent it yields nothing, build a new
/// `Selection` for every rendering.
#[derive(Debug)]
pub struct Selection {
    /// Next catalog index to visit.
    idx: usize,
    /// Requested names. Set to false once the field has been emitted.
    emit: HashMap<String, bool>,
    /// [`ALL`] was requested.
    all: bool,
}

impl Selection {
    /// Start a pass for the requested names.
    pub fn new<S: AsRef<str>>(requested: &[S]) -> Selection {
        let emit: HashMap<String, bool> = requested
            .iter()
            .map(|name| (name.as_ref().to_owned(), true))
            .collect();
        let all = emit.contains_key(ALL);
        Selection { idx: 0, emit, all }
    }

    /// Only the fields to display.
    pub fn included(self) -> impl Iterator<Item = &'static Field> {
        self.filter_map(|(f, included)| included.then_some(f))
    }

    fn can_use(&self, f: &Field) -> bool {
        let requested = self.emit.get(f.name).copied().unwrap_or(false);
        (requested || self.all) && f.selectable
    }
}

impl Iterator for Selection {
    type Item = (&'static Field, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let f = FIELDS.get(self.idx)?;
        self.idx += 1;

        let included = self.can_use(f);
        if included {
            self.emit.insert(f.name.to_owned(), false);
        }
        trace!("field {} included: {}", f.name, included);
        Some((f, included))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = FIELDS.len().saturating_sub(self.idx);
        (left, Some(left))
    }
}
