//! Transient message bar text.

use std::time::{Duration, Instant};

/// A bounded status message with the time it was set.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
    capacity: usize,
}

impl StatusMessage {
    /// An empty message holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            set_at: None,
            capacity,
        }
    }

    /// Replace the message, truncating it to the capacity on a character boundary.
    pub fn set(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if text.len() > self.capacity {
            let mut end = self.capacity;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        self.text = text;
        self.set_at = Some(Instant::now());
    }

    /// Remove the message.
    pub fn clear(&mut self) {
        self.text.clear();
        self.set_at = None;
    }

    /// Message text regardless of age.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Message text if it was set less than `timeout` before `now`.
    pub fn visible_at(&self, now: Instant, timeout: Duration) -> Option<&str> {
        let set_at = self.set_at?;
        (!self.text.is_empty() && now.saturating_duration_since(set_at) < timeout)
            .then_some(self.text.as_str())
    }
}
