use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::diagnostics::TickStats;
use crate::face::engine::ClockFace;
use crate::surface::DisplaySurface;
use crate::time_provider::TimeProvider;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Drives a ClockFace from a background thread. The face itself never stops;
// the handle exists so hosts and tests can shut the thread down cleanly.
pub struct TickRunner {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<TickStats>>,
}

impl TickRunner {
    pub fn spawn<S>(
        face: Arc<Mutex<ClockFace<S>>>,
        provider: Arc<dyn TimeProvider>,
        interval: Duration,
    ) -> Self
    where
        S: DisplaySurface + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut stats = TickStats::new(interval);
            let mut next_tick = Instant::now() + interval;
            while !stop_flag.load(Ordering::Relaxed) {
                wait_until(next_tick, &stop_flag);
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }

                let now = provider.now();
                let Ok(mut guard) = face.lock() else {
                    break;
                };
                guard.tick(now);
                drop(guard);
                stats.record_tick(Instant::now());

                next_tick += interval;
                let behind = Instant::now();
                if behind > next_tick + interval {
                    // Fell more than one whole interval behind; re-anchor
                    // rather than firing a burst of catch-up ticks.
                    next_tick = behind + interval;
                }
            }
            stats
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) -> TickStats {
        self.stop.store(true, Ordering::Relaxed);
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| TickStats::new(TICK_INTERVAL)),
            None => TickStats::new(TICK_INTERVAL),
        }
    }
}

impl Drop for TickRunner {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn wait_until(deadline: Instant, stop: &AtomicBool) {
    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        let remaining = deadline.saturating_duration_since(now);
        thread::sleep(remaining.min(Duration::from_millis(25)));
    }
}
