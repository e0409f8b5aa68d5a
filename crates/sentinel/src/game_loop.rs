//! # SENTINEL Game Loop
//!
//! Fixed-rate frame driver for the watcher tick:
//! ```text
//! Frame N:
//! ┌──────────────────────────────────────────────────────────┐
//! │ 1. STOP REQUESTED?      └─ leave the loop                │
//! │ 2. TICK                 └─ caller's closure (engine tick)│
//! │ 3. RECORD               ├─ accumulate counters           │
//! │                         └─ publish FrameFired if needed  │
//! │ 4. SLEEP                └─ rest of the frame budget      │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use sentinel_core::{Scheduler, TickReport};

use crate::events::{EventSender, SentinelEvent};

/// Configuration for the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopConfig {
    /// Frames per second. `0` runs frames back to back.
    pub tick_rate: u32,
    /// Stop after this many frames. `None` runs until stopped.
    pub max_ticks: Option<u64>,
}

impl LoopConfig {
    /// Frame budget, or `None` when unthrottled.
    #[must_use]
    pub fn frame_time(&self) -> Option<Duration> {
        (self.tick_rate > 0).then(|| Duration::from_secs(1) / self.tick_rate)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_ticks: None,
        }
    }
}

/// Counters collected over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames run.
    pub frames: u64,
    /// Sum of every frame's tick counters.
    pub totals: TickReport,
    /// Frames in which something fired.
    pub frames_fired: u64,
    /// Frames whose tick took longer than the frame budget.
    pub frames_over_budget: u64,
    /// Longest tick, in microseconds.
    pub max_tick_us: u64,
}

impl LoopStats {
    fn record(&mut self, report: &TickReport, elapsed: Duration, budget: Option<Duration>) {
        self.frames += 1;
        self.totals.accumulate(report);
        if report.fired > 0 {
            self.frames_fired += 1;
        }
        if budget.is_some_and(|b| elapsed > b) {
            self.frames_over_budget += 1;
        }
        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.max_tick_us = self.max_tick_us.max(us);
    }
}

/// Fixed-rate loop.
#[derive(Debug)]
pub struct SentinelLoop {
    config: LoopConfig,
    stop: Arc<AtomicBool>,
    events: Option<EventSender>,
    stats: LoopStats,
}

impl SentinelLoop {
    /// Creates a loop.
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
            events: None,
            stats: LoopStats::default(),
        }
    }

    /// Publishes a [`SentinelEvent::FrameFired`] for every frame in which a
    /// watcher fired.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Flag that ends the loop at the next frame boundary when set.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Counters collected so far.
    #[must_use]
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    fn should_stop(&self, frame: u64) -> bool {
        self.stop.load(Ordering::Relaxed) || self.config.max_ticks.is_some_and(|max| frame >= max)
    }
}

impl Scheduler for SentinelLoop {
    fn run(&mut self, tick: &mut dyn FnMut(u64) -> TickReport) -> u64 {
        let budget = self.config.frame_time();
        let first = self.stats.frames;
        let mut frame = first;
        tracing::info!(
            "Sentinel loop started (tick rate: {}, max ticks: {:?})",
            self.config.tick_rate,
            self.config.max_ticks
        );

        while !self.should_stop(frame) {
            let start = Instant::now();
            let report = tick(frame);
            let elapsed = start.elapsed();
            self.stats.record(&report, elapsed, budget);

            if report.fired > 0 {
                if let Some(events) = &self.events {
                    events.send(SentinelEvent::FrameFired { frame, report });
                }
            }
            if let Some(budget) = budget {
                if elapsed > budget {
                    tracing::warn!("Frame {} exceeded budget: {:?} (target: {:?})", frame, elapsed, budget);
                } else {
                    std::thread::sleep(budget - elapsed);
                }
            }
            frame += 1;
        }

        tracing::info!(
            "Sentinel loop stopped after {} frames ({} reactions fired)",
            frame - first,
            self.stats.totals.fired
        );
        frame - first
    }
}
