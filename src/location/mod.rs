//! Location record, field selection and output rendering.
//!

pub mod record;
pub mod render;
pub mod select;

pub use record::{field, FieldValue, LocationInfo};
pub use select::{validate, InvalidField};
