//! Preprocessing of uploaded tabular data before it is turned into entries.

pub mod field_types;

#[cfg(test)]
mod field_types_tests;

pub use field_types::{classify_cell, detect_field_types, FieldSpec, FieldType, GeoIndex};
