use crate::clause::Clause;
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod json;
pub mod jsonl;

pub use self::json::JsonSink;
pub use self::jsonl::JsonlSink;

pub type SinkWriter = BufWriter<Box<dyn Write + Send>>;

pub trait ClauseSink: Send {
    fn add_clause(&mut self, clause: &Clause) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Buffered writer for a file path, or stdout for `-`.
pub fn open_writer(path: &Path) -> Result<SinkWriter> {
    if path == Path::new("-") {
        return Ok(BufWriter::new(Box::new(std::io::stdout())));
    }
    let file = File::create(path)?;
    Ok(BufWriter::new(Box::new(file)))
}
