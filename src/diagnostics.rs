use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Result, ensure};

use crate::face::engine::ClockFace;
use crate::face::model::{AlarmInputError, DisplayFrame, Mode};
use crate::runner::TickRunner;
use crate::surface::SilentSurface;
use crate::time_provider::{LocalTimeProvider, TimeProvider};

const PACING_INTERVAL: Duration = Duration::from_millis(100);

pub struct TickStats {
    total_ticks: u64,
    late_ticks: u64,
    target: Duration,
    interval_sum: Duration,
    last_tick: Option<Instant>,
}

impl TickStats {
    pub fn new(target: Duration) -> Self {
        Self {
            total_ticks: 0,
            late_ticks: 0,
            target,
            interval_sum: Duration::ZERO,
            last_tick: None,
        }
    }

    pub fn record_tick(&mut self, now: Instant) {
        if let Some(previous) = self.last_tick {
            let interval = now.saturating_duration_since(previous);
            self.interval_sum += interval;
            if interval > self.target + self.target / 4 {
                self.late_ticks += 1;
            }
        }
        self.last_tick = Some(now);
        self.total_ticks += 1;
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn late_ticks(&self) -> u64 {
        self.late_ticks
    }

    pub fn mean_interval_ms(&self) -> f64 {
        let measured = self.total_ticks.saturating_sub(1);
        if measured == 0 {
            return 0.0;
        }
        self.interval_sum.as_secs_f64() * 1_000.0 / measured as f64
    }
}

pub fn run_self_check(check_ticks: u32) -> Result<()> {
    println!("SegClock self-check");
    println!("Scenario checks:");
    scenario_checks()?;
    pacing_run(check_ticks)?;
    Ok(())
}

fn scenario_checks() -> Result<()> {
    let provider = LocalTimeProvider;
    let mut face = ClockFace::new(SilentSurface);

    face.set_mode(Mode::Timer, provider.now());
    face.action();
    for _ in 0..3 {
        face.tick(provider.now());
    }
    ensure!(
        face.timer().elapsed_seconds == 3,
        "timer should count 3 ticks, saw {}",
        face.timer().elapsed_seconds
    );
    face.set_mode(Mode::Clock, provider.now());
    face.tick(provider.now());
    face.tick(provider.now());
    ensure!(
        face.timer().elapsed_seconds == 5,
        "timer should keep counting while the clock is displayed"
    );
    println!("  timer counts while another mode is displayed: OK");

    face.set_mode(Mode::Alarm, provider.now());
    face.submit_alarm_minutes("1")
        .map_err(|err| anyhow::anyhow!("arming a 1 minute countdown failed: {err}"))?;
    face.action();
    let mut ring_transitions = 0u32;
    for _ in 0..60 {
        let was_ringing = face.alarm().ringing;
        face.tick(provider.now());
        if !was_ringing && face.alarm().ringing {
            ring_transitions += 1;
        }
    }
    ensure!(
        ring_transitions == 1,
        "alarm should ring exactly once, saw {ring_transitions} transitions"
    );
    ensure!(
        !face.alarm().running && face.alarm().remaining_seconds == 0,
        "a ringing alarm should rest at zero with the countdown stopped"
    );
    face.tick(provider.now());
    ensure!(
        face.alarm().ringing,
        "the ring should persist until acknowledged"
    );
    println!("  alarm rings exactly once at the 1 -> 0 tick: OK");

    face.reset();
    ensure!(
        face.alarm().is_unset(),
        "reset while ringing should return the alarm to its unset state"
    );
    ensure!(
        DisplayFrame::from_counter(face.alarm().remaining_seconds).digits == ['0'; 6],
        "the rest frame should be all zeros"
    );
    face.set_mode(Mode::Timer, provider.now());
    face.reset();
    ensure!(
        face.timer().elapsed_seconds == 0 && !face.timer().running,
        "reset should stop and zero the timer"
    );
    println!("  reset returns the face to its rest state: OK");

    face.set_mode(Mode::Alarm, provider.now());
    ensure!(
        face.submit_alarm_minutes("0") == Err(AlarmInputError::NotPositive),
        "zero minutes should be rejected"
    );
    ensure!(
        face.submit_alarm_minutes("later") == Err(AlarmInputError::NotANumber),
        "non-numeric minutes should be rejected"
    );
    ensure!(
        face.alarm().is_unset(),
        "rejected input should leave the alarm untouched"
    );
    println!("  alarm input rejects bad minutes: OK");

    Ok(())
}

fn pacing_run(check_ticks: u32) -> Result<()> {
    println!(
        "Pacing run: {check_ticks} ticks at {} ms",
        PACING_INTERVAL.as_millis()
    );
    let face = Arc::new(Mutex::new(ClockFace::new(SilentSurface)));
    let provider: Arc<dyn TimeProvider> = Arc::new(LocalTimeProvider);
    let runner = TickRunner::spawn(Arc::clone(&face), provider, PACING_INTERVAL);

    std::thread::sleep(PACING_INTERVAL * check_ticks + PACING_INTERVAL / 2);
    let stats = runner.stop();

    ensure!(stats.total_ticks() > 0, "tick engine produced no ticks");
    println!("  ticks recorded: {}", stats.total_ticks());
    println!("  late ticks: {}", stats.late_ticks());
    println!("  mean interval: {:.1} ms", stats.mean_interval_ms());
    Ok(())
}
