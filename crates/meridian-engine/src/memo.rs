//! Single-slot attribution cache with explicit staleness.

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use meridian_portfolio::ComponentReturns;

struct CachedAttribution {
    value: ComponentReturns,
    computed_at: Instant,
}

/// One-slot cache for a strategy's component returns.
///
/// The slot records when the value was computed and honors an optional
/// staleness threshold; with no threshold the first stored value lives
/// for the context's lifetime, matching the fetch-once contract. Tests
/// (and staleness policies) force recomputation with [`invalidate`].
///
/// [`invalidate`]: AttributionMemo::invalidate
pub struct AttributionMemo {
    slot: RwLock<Option<CachedAttribution>>,
    stale_after: Option<Duration>,
}

impl AttributionMemo {
    /// Create an empty memo. `stale_after: None` means never stale.
    #[must_use]
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            slot: RwLock::new(None),
            stale_after,
        }
    }

    /// The cached value, unless absent or past the staleness threshold.
    #[must_use]
    pub fn get(&self) -> Option<ComponentReturns> {
        let slot = self.slot.read();
        let cached = slot.as_ref()?;

        if let Some(threshold) = self.stale_after {
            if cached.computed_at.elapsed() > threshold {
                return None;
            }
        }
        Some(cached.value.clone())
    }

    /// Store a freshly computed value.
    pub fn store(&self, value: ComponentReturns) {
        *self.slot.write() = Some(CachedAttribution {
            value,
            computed_at: Instant::now(),
        });
    }

    /// Drop the cached value so the next access recomputes.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }
}

impl Default for AttributionMemo {
    fn default() -> Self {
        Self::new(None)
    }
}
