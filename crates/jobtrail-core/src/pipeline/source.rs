//! Inbound side: where raw messages come from.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::decode::RawMessage;
use crate::error::Result;

/// A stream of raw messages, pulled one at a time.
///
/// An `Err` reports a single unreadable message; the pipeline logs it and asks
/// for the next one, so implementations must advance past the failing item.
/// `Ok(None)` ends the run.
#[async_trait]
pub trait MessageSource: Send {
    /// Returns the next message, or `None` when exhausted.
    async fn next_message(&mut self) -> Result<Option<RawMessage>>;
}

/// A source over messages already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    messages: VecDeque<RawMessage>,
}

impl MemorySource {
    /// Creates a source yielding `messages` in order.
    #[must_use]
    pub fn new(messages: impl IntoIterator<Item = RawMessage>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
        }
    }

    /// Messages not yet pulled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.messages.len()
    }
}

#[async_trait]
impl MessageSource for MemorySource {
    async fn next_message(&mut self) -> Result<Option<RawMessage>> {
        Ok(self.messages.pop_front())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_drains_in_order() {
        let mut source = MemorySource::new([RawMessage::new("a", ""), RawMessage::new("b", "")]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_message().await.unwrap().unwrap().subject, "a");
        assert_eq!(source.next_message().await.unwrap().unwrap().subject, "b");
        assert!(source.next_message().await.unwrap().is_none());
    }
}
