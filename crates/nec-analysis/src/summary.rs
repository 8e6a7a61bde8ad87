//! Per-event outcomes and run counters.

use serde::{Deserialize, Serialize};

/// What happened to one event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Passed both gates and was accumulated.
    Accepted,
    /// Rejected by the availability gate; carries the first empty collection.
    MissingCollection(String),
    /// Rejected by the selection gate; carries the reconstructed Q².
    OutOfRange(f64),
}

impl EventOutcome {
    /// Whether the event contributed to any histogram.
    pub fn is_accepted(&self) -> bool {
        matches!(self, EventOutcome::Accepted)
    }
}

/// Diagnostic counters for a run.
///
/// These never influence the result; they are reported and stored in the
/// output artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Events pulled from the source.
    pub events_read: u64,
    /// Events that passed both gates.
    pub events_accepted: u64,
    /// Events with an empty required collection.
    pub skipped_missing_collection: u64,
    /// Events with reconstructed Q² outside the window.
    pub skipped_out_of_range: u64,
    /// Fills dropped because the value was undefined.
    pub domain_anomalies: u64,
}

impl RunSummary {
    /// Count one processed event.
    pub fn record(&mut self, outcome: &EventOutcome) {
        self.events_read += 1;
        match outcome {
            EventOutcome::Accepted => self.events_accepted += 1,
            EventOutcome::MissingCollection(_) => self.skipped_missing_collection += 1,
            EventOutcome::OutOfRange(_) => self.skipped_out_of_range += 1,
        }
    }

    /// Sum of two partial summaries.
    pub fn merge(&mut self, other: &RunSummary) {
        self.events_read += other.events_read;
        self.events_accepted += other.events_accepted;
        self.skipped_missing_collection += other.skipped_missing_collection;
        self.skipped_out_of_range += other.skipped_out_of_range;
        self.domain_anomalies += other.domain_anomalies;
    }

    /// Events rejected by either gate.
    pub fn events_skipped(&self) -> u64 {
        self.skipped_missing_collection + self.skipped_out_of_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_merge() {
        let mut a = RunSummary::default();
        a.record(&EventOutcome::Accepted);
        a.record(&EventOutcome::OutOfRange(150.0));
        let mut b = RunSummary::default();
        b.record(&EventOutcome::MissingCollection("GeneratedBreitFrameParticles".into()));
        b.domain_anomalies = 2;
        a.merge(&b);
        assert_eq!(a.events_read, 3);
        assert_eq!(a.events_accepted, 1);
        assert_eq!(a.events_skipped(), 2);
        assert_eq!(a.domain_anomalies, 2);
    }
}
