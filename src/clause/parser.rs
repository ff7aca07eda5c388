//! Turns raw request parameters into clauses.
//!
//! Each value string is read in priority order:
//!
//! 1. `token:operand` where `token` is in the comparator table. `lk`
//!    operands become `%operand%`, others are coerced.
//! 2. `a,b,c` becomes a list of coerced items with `=`.
//! 3. Anything else is coerced as a single scalar with `=`.
//!
//! An unknown prefix before a colon is not an operator: the whole string,
//! colon included, goes through rules 2 and 3.

use super::ast::{Clause, ClauseValue, Comparator, ComparatorTable, Scalar};
use super::charset::{coerce_scalar, is_ascii_alnum};
use super::lexer::{split_list, split_operator};
use crate::params::RawParameters;

/// Stateless parser bound to a comparator table.
#[derive(Debug, Clone, Copy)]
pub struct ClauseParser<'t> {
    table: &'t ComparatorTable,
}

impl Default for ClauseParser<'static> {
    fn default() -> Self {
        ClauseParser::new(ComparatorTable::standard())
    }
}

impl<'t> ClauseParser<'t> {
    pub fn new(table: &'t ComparatorTable) -> Self {
        ClauseParser { table }
    }

    /// Parse every value of every parameter, in order.
    ///
    /// Entries with invalid keys are dropped; nothing else is rejected.
    pub fn parse(&self, params: &RawParameters) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(params.value_count());

        for (key, raw) in params.iter() {
            if !is_ascii_alnum(key) {
                tracing::debug!("Skipping parameter with invalid key {:?}", key);
                continue;
            }
            for value in raw.values() {
                let clause = self.parse_entry(key, value);
                tracing::trace!("{} {} {:?}", clause.key, clause.comparator, clause.value);
                clauses.push(clause);
            }
        }

        clauses
    }

    /// Parse a single `key=value` pair. `None` if the key is invalid.
    pub fn parse_value(&self, key: &str, value: &str) -> Option<Clause> {
        is_ascii_alnum(key).then(|| self.parse_entry(key, value))
    }

    fn parse_entry(&self, key: &str, value: &str) -> Clause {
        let (comparator, value) = self.tokenize(value);
        Clause::new(key, comparator, value)
    }

    fn tokenize(&self, value: &str) -> (Comparator, ClauseValue) {
        if let Some((prefix, operand)) = split_operator(value) {
            match self.table.lookup(prefix) {
                Some(Comparator::Like) => {
                    let pattern = format!("%{}%", operand);
                    return (Comparator::Like, ClauseValue::Scalar(Scalar::Text(pattern)));
                }
                Some(comparator) => {
                    return (comparator, ClauseValue::Scalar(coerce_scalar(operand)));
                }
                None => {
                    tracing::debug!("Unknown comparator token {:?}, reading value as-is", prefix);
                }
            }
        }

        match split_list(value) {
            Some(items) => (
                Comparator::Eq,
                ClauseValue::List(items.into_iter().map(coerce_scalar).collect()),
            ),
            None => (Comparator::Eq, ClauseValue::Scalar(coerce_scalar(value))),
        }
    }
}

/// Parse with the standard comparator table.
pub fn parse_clauses(params: &RawParameters) -> Vec<Clause> {
    ClauseParser::default().parse(params)
}
