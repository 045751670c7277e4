//! Generation tokens
//!
//! Every asynchronous operation is tagged with a token when it is issued.
//! When it completes, its token is compared against the latest one issued for
//! the same target to decide whether the result is still wanted.

/// Token identifying one issued operation. Later operations get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`Generation`] tokens
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    latest: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token; it becomes the latest one.
    pub fn issue(&mut self) -> Generation {
        self.latest = self.latest.wrapping_add(1);
        Generation(self.latest)
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        self.latest == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let mut counter = GenerationCounter::new();
        let first = counter.issue();
        let second = counter.issue();

        assert!(second > first);
        assert!(counter.is_latest(second));
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut counter = GenerationCounter::new();
        let first = counter.issue();
        assert!(counter.is_latest(first));

        let second = counter.issue();
        assert!(!counter.is_latest(first));
        assert!(counter.is_latest(second));
    }

    #[test]
    fn test_display() {
        let mut counter = GenerationCounter::new();
        assert_eq!(counter.issue().to_string(), "#1");
    }
}
