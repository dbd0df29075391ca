//! Parsers for the scalar values stored in widget attributes.
//!
//! # Parsers
//!
//! - [`time`]: `HH:MM` strings used by time and time-range widgets
//! - [`number`]: numeric attribute values and spreadsheet cells
//! - [`date`]: `YYYY-MM-DD` attribute values and spreadsheet date cells
//!
//! # Example
//!
//! ```
//! use deep_widgets::parsing::time::parse_time;
//!
//! let parsed = parse_time("9:05").unwrap();
//! assert_eq!(parsed.time_str, "09:05");
//! assert_eq!(parsed.minutes, 545);
//! ```

pub mod date;
pub mod number;
pub mod time;


pub use date::{days_since_epoch, format_date, parse_date, parse_datetime};
pub use number::{parse_integer_value, parse_number};
pub use time::{parse_optional_time, parse_time, ParsedTime};
