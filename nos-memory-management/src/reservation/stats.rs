//! Observability surface (expansion: logging & metrics).
//!
//! `vm_reserv.c` exposes its counters as `SYSCTL`-visible globals
//! (`vm_reserv_broken`, `vm_reserv_freed`, `vm_reserv_reclaimed`); this
//! module keeps the same three counters as plain atomics and adds a
//! `dump_queues` helper in place of the original's `DB_SHOW_COMMAND`.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;
use core::sync::atomic::{AtomicU64, Ordering};

/// Lock-free lifetime counters mirroring `vm_reserv.c`'s `SYSCTL` counters.
#[derive(Default)]
pub struct Counters {
    broken: AtomicU64,
    freed: AtomicU64,
    reclaimed: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_broken(&self) {
        self.broken.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_freed(&self) {
        self.freed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reclaimed(&self) {
        self.reclaimed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ReservationStats {
        ReservationStats {
            broken: self.broken.load(Ordering::Relaxed),
            freed: self.freed.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of the lifetime reservation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationStats {
    pub broken: u64,
    pub freed: u64,
    pub reclaimed: u64,
}

impl core::fmt::Display for ReservationStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "broken={} freed={} reclaimed={}",
            self.broken, self.freed, self.reclaimed
        )
    }
}

/// Formats a queue for `DB_SHOW_COMMAND`-style inspection: one line per
/// member, in order.
pub fn dump_queue(label: &str, members: &[u32]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{label}:");
    for index in members {
        let _ = write!(out, " {index}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_snapshot_reports_increments() {
        let counters = Counters::new();
        counters.record_broken();
        counters.record_broken();
        counters.record_freed();
        let snap = counters.snapshot();
        assert_eq!(snap.broken, 2);
        assert_eq!(snap.freed, 1);
        assert_eq!(snap.reclaimed, 0);
    }

    #[test]
    fn dump_queue_formats_members() {
        assert_eq!(dump_queue("active", &[1, 2, 3]), "active: 1 2 3");
        assert_eq!(dump_queue("inactive", &[]), "inactive:");
    }
}
