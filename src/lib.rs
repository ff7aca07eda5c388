//! Normalize URL query parameters into flat lists of typed filter clauses.
//!
//! ```
//! use qclause::{Comparator, RawParameters, parse_clauses};
//!
//! let params = RawParameters::from_query("price=gt:23&name=lk:john&id=1,2");
//! let clauses = parse_clauses(&params);
//! assert_eq!(clauses[0].comparator, Comparator::Gt);
//! assert_eq!(clauses.len(), 3);
//! ```

pub mod app;
pub mod clause;
pub mod config;
pub mod params;
pub mod sinks;

pub use clause::{
    Clause, ClauseParser, ClauseValue, Comparator, ComparatorTable, Scalar, coerce_scalar,
    is_ascii_alnum, is_ascii_numeric, parse_clauses,
};
pub use params::{RawParameters, RawValue};
