use std::sync::atomic::{AtomicU64, Ordering};

/// Count the visitor counter starts from.
pub const DEFAULT_VISITOR_SEED: u64 = 1248;

/// Process-wide visit counter, shared by reference.
#[derive(Debug)]
pub struct VisitorCounter {
    count: AtomicU64,
}

impl VisitorCounter {
    pub fn new(seed: u64) -> Self {
        VisitorCounter {
            count: AtomicU64::new(seed),
        }
    }

    /// Record a visit and return the updated count.
    pub fn visit(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for VisitorCounter {
    fn default() -> Self {
        VisitorCounter::new(DEFAULT_VISITOR_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_visit_increments() {
        let counter = VisitorCounter::default();
        assert_eq!(counter.count(), 1248);
        assert_eq!(counter.visit(), 1249);
        assert_eq!(counter.visit(), 1250);
        assert_eq!(counter.count(), 1250);
    }

    #[test]
    fn test_concurrent_visits() {
        let counter = Arc::new(VisitorCounter::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        counter.visit();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.count(), 800);
    }
}
