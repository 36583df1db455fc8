//! Request pacing for remote feeds.

use std::time::{Duration, Instant};

/// Allows one request per `interval`, and none while one is in flight.
#[derive(Debug, Clone)]
pub struct PollGate {
    interval: Duration,
    last_request: Option<Instant>,
    in_flight: bool,
}

impl PollGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
            in_flight: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and marks a request in flight when one may start now.
    pub fn should_poll(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        let due = match self.last_request {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_request = Some(now);
            self.in_flight = true;
        }
        due
    }

    /// The in-flight request finished, successfully or not.
    pub fn complete(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_allowed() {
        let mut gate = PollGate::new(Duration::from_secs(2));
        assert!(gate.should_poll(Instant::now()));
    }

    #[test]
    fn test_blocked_while_in_flight() {
        let mut gate = PollGate::new(Duration::from_secs(2));
        let t0 = Instant::now();
        assert!(gate.should_poll(t0));
        assert!(!gate.should_poll(t0 + Duration::from_secs(10)));
        gate.complete();
        assert!(gate.should_poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_one_per_interval() {
        let mut gate = PollGate::new(Duration::from_secs(2));
        let t0 = Instant::now();
        assert!(gate.should_poll(t0));
        gate.complete();
        assert!(!gate.should_poll(t0 + Duration::from_millis(1500)));
        assert!(gate.should_poll(t0 + Duration::from_secs(2)));
    }
}
