//! Query-parameter clause parser.
//!
//! Value syntax:
//!   23                      - `= 23`
//!   recent                  - `= "recent"`
//!   12,25,26                - `= [12, 25, 26]`
//!   gt:23, gte:, lt:, lte:  - `>`, `>=`, `<`, `<=`
//!   df:recent, eq:recent    - `!=`, `=`
//!   lk:john                 - `LIKE "%john%"`
//!
//! Purely numeric operands (digits with at most one `.`) become integers
//! or floats; everything else stays text.

mod ast;
mod charset;
mod lexer;
mod parser;

pub use ast::*;
pub use charset::{coerce_scalar, is_ascii_alnum, is_ascii_numeric};
pub use lexer::{split_list, split_operator};
pub use parser::{ClauseParser, parse_clauses};
