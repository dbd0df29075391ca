//! Core domain models for widget derivation.
//!
//! This module defines the widget definitions and attribute values received
//! from the web application, and the filter, export and comprehensive-view
//! representations produced from them.

pub mod domain;

pub use domain::*;
