//! JSON Lines event source: one event object per line.
//!
//! ```text
//! {"kinematics": {"InclusiveKinematicsElectron": [{"Q2": 25.0, "x": 0.1}], ...},
//!  "particles": {"ReconstructedBreitFrameParticles": [{"energy": 10.0, "momentum": {"x": 0.0, "y": 6.0, "z": 8.0}}], ...}}
//! ```
//!
//! Blank lines are skipped. A malformed line aborts the read.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use nec_core::{Error, Event, EventSource, Result};

pub struct JsonLinesSource<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::ResourceUnavailable(format!("cannot open input {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0 }
    }
}

impl<R: BufRead> EventSource for JsonLinesSource<R> {
    fn next_event(&mut self) -> Result<Option<Event>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let ev = serde_json::from_str(&line).map_err(|e| {
                Error::Validation(format!("malformed event on line {}: {e}", self.line_no))
            })?;
            return Ok(Some(ev));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EVENTS: &str = r#"
{"kinematics": {"InclusiveKinematicsElectron": [{"Q2": 25.0, "x": 0.1}]}}

{"particles": {"GeneratedBreitFrameParticles": [{"energy": 5.0, "momentum": {"x": 0.0, "y": 0.0, "z": 5.0}}]}}
"#;

    #[test]
    fn reads_events_and_skips_blank_lines() {
        let mut src = JsonLinesSource::new(TWO_EVENTS.as_bytes());
        let events = src.collect_events(None).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].first_kinematics("InclusiveKinematicsElectron").map(|k| k.q2),
            Some(25.0)
        );
        assert_eq!(events[1].particles("GeneratedBreitFrameParticles").len(), 1);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let text = "{}\n{\"kinematics\": 3}\n";
        let mut src = JsonLinesSource::new(text.as_bytes());
        assert!(src.next_event().unwrap().is_some());
        let err = src.next_event().unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn missing_file_is_resource_unavailable() {
        let err = JsonLinesSource::open(Path::new("/definitely/not/here.jsonl")).err().unwrap();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
    }
}
