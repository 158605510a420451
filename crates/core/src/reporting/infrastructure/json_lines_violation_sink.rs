use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::reporting::domain::violation_sink::{FrameReport, ViolationSink};

/// Writes one JSON object per frame that produced at least one violation.
pub struct JsonLinesViolationSink<W: Write + Send> {
    writer: BufWriter<W>,
}

impl JsonLinesViolationSink<File> {
    pub fn create(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::create(path)
            .map_err(|e| format!("failed to create {}: {e}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> JsonLinesViolationSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, Box<dyn std::error::Error>> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write + Send> ViolationSink for JsonLinesViolationSink<W> {
    fn report(&mut self, report: &FrameReport) -> Result<(), Box<dyn std::error::Error>> {
        if report.violations.is_empty() {
            return Ok(());
        }
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }
}
