//! # API Module
//!
//! Entry points for callers outside the crate. Inputs and outputs are JSON
//! documents so that the web application and the command-line tool share
//! one request format.
//!
//! - [`requests`]: request documents and their handlers
//! - [`python`]: `#[pyfunction]` wrappers (feature `python`)

pub mod requests;

#[cfg(feature = "python")]
pub mod python;


pub use requests::{handle_derive, handle_derive_parts, handle_fields, handle_locations, handle_views, ApiError};
