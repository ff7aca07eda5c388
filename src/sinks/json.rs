use super::{ClauseSink, SinkWriter, open_writer};
use crate::clause::Clause;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Writes all clauses as one JSON array.
pub struct JsonSink {
    writer: SinkWriter,
    pretty: bool,
    first_clause: bool,
}

impl JsonSink {
    pub fn new<P: AsRef<Path>>(path: P, pretty: bool) -> Result<Self> {
        let mut writer = open_writer(path.as_ref())?;
        writeln!(writer, "[")?;

        Ok(Self {
            writer,
            pretty,
            first_clause: true,
        })
    }
}

impl ClauseSink for JsonSink {
    fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if !self.first_clause {
            writeln!(self.writer, ",")?;
        }
        self.first_clause = false;

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, clause)?;
        } else {
            write!(self.writer, "  ")?;
            serde_json::to_writer(&mut self.writer, clause)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.first_clause {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseValue, Comparator, Scalar};
    use tempfile::NamedTempFile;

    fn read_array(temp_file: &NamedTempFile) -> Vec<serde_json::Value> {
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        parsed.as_array().unwrap().clone()
    }

    #[test]
    fn writes_empty_array() {
        let temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let mut sink = JsonSink::new(temp_file.path(), false).unwrap();
        sink.finish().unwrap();

        assert!(read_array(&temp_file).is_empty());
    }

    #[test]
    fn writes_multiple_clauses_with_commas() {
        let temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let mut sink = JsonSink::new(temp_file.path(), false).unwrap();

        sink.add_clause(&Clause::new("price", Comparator::Gt, ClauseValue::from(23i64)))
            .unwrap();
        sink.add_clause(&Clause::new(
            "id",
            Comparator::Eq,
            ClauseValue::List(vec![Scalar::Int(1), Scalar::Int(2)]),
        ))
        .unwrap();
        sink.finish().unwrap();

        let clauses = read_array(&temp_file);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0]["comparator"], ">");
        assert_eq!(clauses[1]["value"], serde_json::json!([1, 2]));
    }

    #[test]
    fn pretty_output_is_valid_json() {
        let temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let mut sink = JsonSink::new(temp_file.path(), true).unwrap();

        sink.add_clause(&Clause::new("name", Comparator::Like, ClauseValue::from("%jo%")))
            .unwrap();
        sink.add_clause(&Clause::new("page", Comparator::Eq, ClauseValue::from(2i64)))
            .unwrap();
        sink.finish().unwrap();

        let clauses = read_array(&temp_file);
        assert_eq!(clauses[0]["comparator"], "LIKE");
        assert_eq!(clauses[0]["value"], "%jo%");
        assert_eq!(clauses[1]["key"], "page");
    }
}
