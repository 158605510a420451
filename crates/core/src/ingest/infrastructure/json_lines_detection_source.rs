use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::ingest::domain::detection_source::{DetectionFrame, DetectionSource};

/// Replays recorded detections: one `DetectionFrame` JSON object per line.
///
/// Blank lines are skipped. A malformed line ends iteration with an error
/// naming its line number.
pub struct JsonLinesDetectionSource<R: Read + Send> {
    reader: BufReader<R>,
    line_number: usize,
}

impl JsonLinesDetectionSource<File> {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)
            .map_err(|e| format!("failed to open detections {}: {e}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<R: Read + Send> JsonLinesDetectionSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    fn next_frame(&mut self) -> Option<Result<DetectionFrame, Box<dyn std::error::Error>>> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_number += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) if line.trim().is_empty() => continue,
                Ok(_) => {
                    let parsed: Result<DetectionFrame, Box<dyn std::error::Error>> =
                        serde_json::from_str(&line).map_err(|e| {
                            format!("invalid detection frame on line {}: {e}", self.line_number)
                                .into()
                        });
                    return Some(parsed);
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

impl<R: Read + Send> DetectionSource for JsonLinesDetectionSource<R> {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_> {
        Box::new(std::iter::from_fn(move || self.next_frame()))
    }
}
