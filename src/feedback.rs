use std::{collections::VecDeque, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A short-lived notice telling the player what just happened
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMessage {
    pub text: String,
    pub severity: Severity,
    pub remaining: Duration,
}

impl FeedbackMessage {
    /// Create a message, lifetime is assigned when it's pushed to a queue
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            remaining: Duration::ZERO,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }
}

/// Messages in the order they were pushed, each decaying until it's removed
#[derive(Debug)]
pub struct FeedbackQueue {
    messages: VecDeque<FeedbackMessage>,
    lifetime: Duration,
    capacity: Option<usize>,
}

impl FeedbackQueue {
    pub fn new(lifetime: Duration, capacity: Option<usize>) -> Self {
        Self {
            messages: VecDeque::new(),
            lifetime,
            capacity,
        }
    }

    /// Add a message with the default lifetime
    pub fn push(&mut self, message: FeedbackMessage) {
        self.push_with_lifetime(message, self.lifetime);
    }

    pub fn push_with_lifetime(&mut self, mut message: FeedbackMessage, lifetime: Duration) {
        log::debug!("Feedback: {:?} {:?}", message.severity, message.text);
        message.remaining = lifetime;

        if let Some(capacity) = self.capacity {
            while self.messages.len() >= capacity.max(1) {
                self.messages.pop_front();
            }
        }
        self.messages.push_back(message);
    }

    /// Age every message by `dt`, dropping the ones that have run out
    pub fn tick(&mut self, dt: Duration) {
        self.messages.iter_mut().for_each(|m| {
            m.remaining = m.remaining.saturating_sub(dt);
        });
        self.messages.retain(|m| !m.remaining.is_zero());
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackMessage> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&FeedbackMessage> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{FeedbackMessage, FeedbackQueue, Severity};

    fn texts(queue: &FeedbackQueue) -> Vec<&str> {
        queue.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_push_keeps_order() {
        let mut queue = FeedbackQueue::new(Duration::from_secs(3), None);
        queue.push(FeedbackMessage::info("a"));
        queue.push(FeedbackMessage::error("b"));
        queue.push(FeedbackMessage::success("c"));

        assert_eq!(texts(&queue), ["a", "b", "c"]);
        assert_eq!(queue.latest().unwrap().severity, Severity::Success);
        assert!(queue.iter().all(|m| m.remaining == Duration::from_secs(3)));
    }

    #[test]
    fn test_tick_removes_expired() {
        let lifetime = Duration::from_secs(3);
        let mut queue = FeedbackQueue::new(lifetime, None);
        (0..5).for_each(|i| queue.push(FeedbackMessage::info(format!("{i}"))));

        queue.tick(Duration::from_secs(1));
        assert_eq!(queue.len(), 5);

        queue.tick(Duration::from_secs(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_longer_lifetimes_survive_in_order() {
        let mut queue = FeedbackQueue::new(Duration::from_secs(3), None);
        queue.push_with_lifetime(FeedbackMessage::info("long 1"), Duration::from_secs(10));
        queue.push(FeedbackMessage::info("short 1"));
        queue.push_with_lifetime(FeedbackMessage::warning("long 2"), Duration::from_secs(5));
        queue.push(FeedbackMessage::info("short 2"));

        queue.tick(Duration::from_secs(3));

        assert_eq!(texts(&queue), ["long 1", "long 2"]);
        assert_eq!(queue.iter().next().unwrap().remaining, Duration::from_secs(7));
    }

    #[test]
    fn test_tick_in_small_steps() {
        let mut queue = FeedbackQueue::new(Duration::from_millis(100), None);
        queue.push(FeedbackMessage::info("blink"));

        (0..6).for_each(|_| queue.tick(Duration::from_millis(16)));
        assert_eq!(queue.len(), 1);
        queue.tick(Duration::from_millis(16));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = FeedbackQueue::new(Duration::from_secs(3), Some(2));
        queue.push(FeedbackMessage::info("a"));
        queue.push(FeedbackMessage::info("b"));
        queue.push(FeedbackMessage::info("c"));

        assert_eq!(texts(&queue), ["b", "c"]);
    }
}
