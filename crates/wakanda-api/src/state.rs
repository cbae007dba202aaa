//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use wakanda_core::{AnswerChain, AppConfig};

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Answer chain the question routes forward to
    pub chain: Arc<dyn AnswerChain>,
    /// Server start time
    pub start_time: Instant,
    /// Question requests received
    pub request_count: AtomicU64,
    /// Question requests whose chain call failed
    pub failure_count: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig, chain: Arc<dyn AnswerChain>) -> Self {
        Self {
            config,
            chain,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed)
    }

    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Increment chain failure counter
    pub fn record_failure(&self) -> u64 {
        self.failure_count.fetch_add(1, Ordering::Relaxed)
    }

    pub fn get_failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
