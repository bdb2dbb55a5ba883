//! Cosmetic scan progress.
//!
//! The simulator advances a percentage on a fixed interval by a random step.
//! It has no connection to the real request; it only paces the indicator.

use numscope_core::ScanConfig;
use rand::Rng;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Upper bound of the progress value.
pub const PROGRESS_MAX: u8 = 100;

/// Shortest tick interval; `tokio::time::interval` rejects a zero period.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Pacing of the simulated progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSettings {
    /// Interval between ticks
    pub tick: Duration,
    /// Largest step added per tick (at least 1)
    pub max_increment: u8,
}

impl From<&ScanConfig> for ProgressSettings {
    fn from(config: &ScanConfig) -> Self {
        Self {
            tick: config.progress_tick(),
            max_increment: config.progress_max_increment,
        }
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

/// Starts progress timers.
pub struct ProgressSimulator;

impl ProgressSimulator {
    /// Start a timer that reports each new value to `on_tick`.
    ///
    /// Must be called from within a tokio runtime. The value starts at 0,
    /// never decreases, and stops changing at [`PROGRESS_MAX`]. `on_tick` is
    /// only invoked when the value changes. A zero tick is raised to 1 ms and
    /// a zero increment to 1.
    pub fn start<F>(settings: ProgressSettings, on_tick: F) -> ProgressHandle
    where
        F: Fn(u8) + Send + 'static,
    {
        let value = Arc::new(AtomicU8::new(0));
        let max_increment = settings.max_increment.max(1);
        let tick = settings.tick.max(MIN_TICK);
        let shared = value.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                let current = shared.load(Ordering::SeqCst);
                if current >= PROGRESS_MAX {
                    continue;
                }

                let step = rand::thread_rng().gen_range(1..=max_increment);
                let next = current.saturating_add(step).min(PROGRESS_MAX);
                shared.store(next, Ordering::SeqCst);
                on_tick(next);
            }
        });

        ProgressHandle {
            value,
            task: Some(task),
        }
    }
}

/// Owner of a running progress timer.
///
/// The timer is stopped by [`ProgressHandle::stop`] or when the handle is
/// dropped.
#[derive(Debug)]
pub struct ProgressHandle {
    value: Arc<AtomicU8>,
    task: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    /// Current progress value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value.load(Ordering::SeqCst)
    }

    /// Whether the timer is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the timer. Calling this more than once is a no-op.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn settings() -> ProgressSettings {
        ProgressSettings {
            tick: Duration::from_millis(300),
            max_increment: 15,
        }
    }

    fn recording() -> (Arc<Mutex<Vec<u8>>>, impl Fn(u8) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v| sink.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_capped() {
        let (seen, on_tick) = recording();
        let handle = ProgressSimulator::start(settings(), on_tick);

        // 100 / 1 is the slowest possible climb
        tokio::time::sleep(Duration::from_millis(300 * 120)).await;

        let values = seen.lock().unwrap().clone();
        assert!(!values.is_empty());
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|v| (1..=PROGRESS_MAX).contains(v)));
        assert_eq!(values.last().copied(), Some(PROGRESS_MAX));
        assert_eq!(handle.value(), PROGRESS_MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_tick_steps_within_bounds() {
        let (seen, on_tick) = recording();
        let _handle = ProgressSimulator::start(settings(), on_tick);

        tokio::time::sleep(Duration::from_millis(300 * 3 + 50)).await;

        let values = seen.lock().unwrap().clone();
        assert_eq!(values.len(), 3);
        let mut previous = 0;
        for v in values {
            assert!(v > previous && v - previous <= 15);
            previous = v;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_updates() {
        let (seen, on_tick) = recording();
        let mut handle = ProgressSimulator::start(settings(), on_tick);

        tokio::time::sleep(Duration::from_millis(650)).await;
        handle.stop();
        handle.stop();
        tokio::task::yield_now().await;
        let frozen = handle.value();
        let count = seen.lock().unwrap().len();

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(!handle.is_running());
        assert_eq!(handle.value(), frozen);
        assert_eq!(seen.lock().unwrap().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let (seen, on_tick) = recording();
        let handle = ProgressSimulator::start(settings(), on_tick);
        drop(handle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_settings_still_advance() {
        let (seen, on_tick) = recording();
        let handle = ProgressSimulator::start(
            ProgressSettings {
                tick: Duration::ZERO,
                max_increment: 0,
            },
            on_tick,
        );

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(handle.is_running());
        let values = seen.lock().unwrap().clone();
        assert!(!values.is_empty());
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_settings_from_config() {
        let config = ScanConfig {
            progress_tick_ms: 250,
            progress_max_increment: 10,
            ..ScanConfig::default()
        };
        let settings = ProgressSettings::from(&config);
        assert_eq!(settings.tick, Duration::from_millis(250));
        assert_eq!(settings.max_increment, 10);
    }
}
