use super::{ClauseSink, SinkWriter, open_writer};
use crate::clause::Clause;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Writes one JSON clause per line.
pub struct JsonlSink {
    writer: SinkWriter,
}

impl JsonlSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: open_writer(path.as_ref())?,
        })
    }
}

impl ClauseSink for JsonlSink {
    fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        serde_json::to_writer(&mut self.writer, clause)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
