//! Shared availability latch for the remote completion endpoint.
//!
//! Starts available. The first transport failure latches it to unavailable and it
//! stays there until an explicit health check succeeds; completion calls never reset it.
//!
//! Every network attempt takes a `RequestTicket`. A failure is only latched when no
//! newer request (or health check) has started since the ticket was issued, so a late
//! failure from a superseded request cannot flip the flag under a newer one.
//! Between two requests that are both still live, the newest one wins.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

#[derive(Debug)]
struct AvailabilityState {
    available: AtomicBool,
    epoch: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Cloneable handle; clones share one flag. Construct one per independent client.
#[derive(Debug, Clone)]
pub struct ApiAvailability {
    inner: Arc<AvailabilityState>,
}

impl Default for ApiAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiAvailability {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AvailabilityState {
                available: AtomicBool::new(true),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket(self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Latches the flag to unavailable if `ticket` belongs to the latest request.
    /// Returns whether the failure was applied.
    pub fn record_failure(&self, ticket: RequestTicket) -> bool {
        let current = self.inner.epoch.load(Ordering::SeqCst);
        if current != ticket.0 {
            debug!(
                "Ignoring failure from superseded completion request {} (current {})",
                ticket.0, current
            );
            return false;
        }
        if self.inner.available.swap(false, Ordering::SeqCst) {
            warn!("Completion endpoint marked unavailable; serving local fallbacks until a health check succeeds");
        }
        true
    }

    /// Result of an explicit health check. The only path back to available.
    pub fn record_health_check(&self, reachable: bool) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        let was = self.inner.available.swap(reachable, Ordering::SeqCst);
        match (was, reachable) {
            (false, true) => info!("Completion endpoint reachable again"),
            (true, false) => warn!("Completion endpoint health check failed"),
            _ => {}
        }
    }
}
