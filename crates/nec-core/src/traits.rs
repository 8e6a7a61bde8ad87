//! Core traits for NEC analysis
//!
//! The analysis never cares where events come from; it pulls them through
//! [`EventSource`]. Concrete readers (JSON Lines files, in-memory fixtures)
//! live with their callers.

use crate::Result;
use crate::types::Event;

/// Sequential source of events.
pub trait EventSource {
    /// Next event, or `None` once the source is exhausted.
    fn next_event(&mut self) -> Result<Option<Event>>;

    /// Number of events still to come, if known.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Drain the source into memory, stopping after `limit` events if given.
    fn collect_events(&mut self, limit: Option<usize>) -> Result<Vec<Event>> {
        let mut out = Vec::with_capacity(self.size_hint().unwrap_or(0));
        while limit.is_none_or(|max| out.len() < max) {
            match self.next_event()? {
                Some(ev) => out.push(ev),
                None => break,
            }
        }
        Ok(out)
    }
}

/// In-memory event source.
#[derive(Debug, Clone, Default)]
pub struct VecEventSource {
    events: std::collections::VecDeque<Event>,
}

impl VecEventSource {
    /// Wrap a vector of events.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events: events.into() }
    }
}

impl EventSource for VecEventSource {
    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.events.pop_front())
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.events.len())
    }
}
