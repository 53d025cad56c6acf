use std::time::Duration;

/// Strategy deciding how long to wait before a reconnect attempt.
///
/// The client schedules exactly one attempt per disconnect and asks the
/// policy for the delay; tests inject a zero-delay policy instead of waiting
/// on real timers.
pub trait ReconnectPolicy: Send {
    /// Delay before reconnect attempt number `attempt` (1-based, reset to 1
    /// after every successful connection).
    fn next_delay(&mut self, attempt: u32) -> Duration;
}

/// Always-retry policy with a constant delay and no attempt limit.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

impl ReconnectPolicy for FixedDelay {
    fn next_delay(&mut self, _attempt: u32) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delay_is_constant_across_attempts() {
        let mut policy = FixedDelay::new(Duration::from_millis(250));
        for attempt in 1..100 {
            assert_eq!(policy.next_delay(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn default_delay_is_five_seconds() {
        let mut policy = FixedDelay::default();
        assert_eq!(policy.next_delay(1), Duration::from_millis(5000));
    }
}
