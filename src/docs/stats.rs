//! Cache Statistics Module
//!
//! Tracks document cache activity: hits served from memory, disk reads,
//! evictions, and full refresh passes.

use serde::Serialize;

// == Cache Stats ==
/// Document cache activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Documents served from memory without touching the disk
    pub hits: u64,
    /// Documents read (or re-read) from disk
    pub disk_reads: u64,
    /// Entries dropped because the underlying file went missing
    pub evictions: u64,
    /// Completed full refresh passes
    pub refreshes: u64,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the disk-read counter.
    pub fn record_disk_read(&mut self) {
        self.disk_reads += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Increments the refresh counter.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }
}
