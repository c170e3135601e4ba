//! Run statistics and reporting.
//!
//! A `Stats` value is owned by the caller and updated explicitly at each
//! pipeline stage; the pipeline itself stays free of bookkeeping. The
//! struct is not thread-safe — each compression/decompression invocation
//! carries its own instance.

use std::time::{Duration, Instant};

/// Byte counts and timing for one pipeline run.
#[derive(Debug, Clone)]
pub struct Stats {
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    /// Total bytes read from the input
    pub input_bytes: u64,

    /// Total bytes written to the output
    pub output_bytes: u64,
}

impl Stats {
    /// Create new stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed time if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Output bytes per input byte (1.0 = no change, < 1.0 = smaller).
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }

    /// Percentage of input size saved by compression (negative if grown).
    pub fn space_saving_percent(&self) -> f64 {
        (1.0 - self.compression_ratio()) * 100.0
    }

    /// Input throughput in MiB/s.
    pub fn throughput_mib_s(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.input_bytes as f64 / (1024.0 * 1024.0) / secs
    }

    /// Print a human-readable summary, labeled by the operation name.
    pub fn print_summary(&self, label: &str) {
        println!("=== {} Summary ===", label);
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);
        println!(
            "Ratio: {:.4} ({:+.1}% space saving)",
            self.compression_ratio(),
            self.space_saving_percent()
        );
        println!(
            "Time: {:.2?} ({:.2} MiB/s)",
            self.duration(),
            self.throughput_mib_s()
        );
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
