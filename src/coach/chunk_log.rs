// ABOUTME: Append-only log of streamed reply chunks
// ABOUTME: The final reply text is a single reduction over the log in arrival order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Deltas received for one reply, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkLog {
    chunks: Vec<String>,
}

impl ChunkLog {
    /// Empty log
    #[must_use]
    pub const fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Append one delta
    pub fn push(&mut self, delta: impl Into<String>) {
        self.chunks.push(delta.into());
    }

    /// Deltas received so far
    #[must_use]
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Number of deltas received
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing has arrived
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenation of every delta
    #[must_use]
    pub fn final_text(&self) -> String {
        self.chunks.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_text_concatenates_in_order() {
        let mut log = ChunkLog::new();
        log.push("Drink ");
        log.push("more ");
        log.push("water.");
        assert_eq!(log.len(), 3);
        assert_eq!(log.final_text(), "Drink more water.");
    }
}
