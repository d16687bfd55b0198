use parking_lot::{Condvar, Mutex};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// One-shot stop notification shared between a [`Sweeper`] and its thread.
#[derive(Debug, Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    /// Blocks for at most `interval`. Returns `true` once stop has been requested.
    fn wait(&self, interval: Duration) -> bool {
        let mut stopped = self.stopped.lock();
        if !*stopped {
            self.wake.wait_for(&mut stopped, interval);
        }
        *stopped
    }

    /// Requests stop. Returns `true` only for the call that flipped the flag.
    fn stop(&self) -> bool {
        let mut stopped = self.stopped.lock();
        if *stopped {
            return false;
        }
        *stopped = true;
        self.wake.notify_all();
        true
    }

    fn is_stopped(&self) -> bool {
        *self.stopped.lock()
    }
}

/// A background thread that runs a task on a fixed interval until stopped.
///
/// The thread sleeps on a condition variable, so [`stop`](Sweeper::stop) wakes it
/// immediately instead of waiting out the current interval. Stopping is idempotent and
/// joins the thread, so once `stop` returns no further tick runs.
///
/// Dropping a `Sweeper` stops it.
#[derive(Debug)]
pub(crate) struct Sweeper {
    signal: Arc<StopSignal>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns a thread named `name` that calls `tick` every `interval`.
    pub(crate) fn spawn<F>(name: &str, interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let signal = Arc::new(StopSignal::default());
        let thread_signal = Arc::clone(&signal);

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while !thread_signal.wait(interval) {
                    tick();
                }
            })?;

        debug!(thread = name, ?interval, "started sweeper");
        Ok(Self {
            signal,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Stops the thread and waits for it to exit.
    ///
    /// Concurrent callers all block until the thread has been joined. Calls after that
    /// return immediately.
    pub(crate) fn stop(&self) {
        // Held through the join; the thread never takes this lock.
        let mut handle = self.handle.lock();
        self.signal.stop();

        if let Some(handle) = handle.take() {
            let name = handle.thread().name().unwrap_or("sweeper").to_string();
            if handle.join().is_err() {
                warn!(thread = %name, "sweeper thread panicked before shutdown");
            } else {
                debug!(thread = %name, "stopped sweeper");
            }
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.signal.is_stopped()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Instant;

    #[test]
    fn test_sweeper_ticks_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let sweeper = Sweeper::spawn("test-sweeper", Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(100));
        sweeper.stop();
        let after_stop = ticks.load(Ordering::SeqCst);
        assert!(after_stop > 0);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
        assert!(!sweeper.is_running());
    }

    #[test]
    fn test_stop_wakes_thread_immediately() {
        let sweeper = Sweeper::spawn("test-sweeper", Duration::from_secs(3600), || {}).unwrap();
        let started = Instant::now();
        sweeper.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let sweeper = Sweeper::spawn("test-sweeper", Duration::from_millis(5), || {}).unwrap();
        assert!(sweeper.is_running());
        sweeper.stop();
        sweeper.stop();
        assert!(!sweeper.is_running());
    }

    #[test]
    fn test_concurrent_stop_waits_for_running_tick() {
        let in_tick = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&in_tick);
        let sweeper = Arc::new(
            Sweeper::spawn("test-sweeper", Duration::from_millis(1), move || {
                flag.store(true, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(300));
                flag.store(false, Ordering::SeqCst);
            })
            .unwrap(),
        );

        let deadline = Instant::now() + Duration::from_secs(5);
        while !in_tick.load(Ordering::SeqCst) {
            assert!(Instant::now() < deadline, "tick never started");
            thread::sleep(Duration::from_millis(1));
        }

        let first = {
            let sweeper = Arc::clone(&sweeper);
            thread::spawn(move || sweeper.stop())
        };
        thread::sleep(Duration::from_millis(20));

        // The first caller is still joining; this one must wait for it too.
        sweeper.stop();
        assert!(!in_tick.load(Ordering::SeqCst));
        assert!(!sweeper.is_running());
        first.join().unwrap();
    }

    #[test]
    fn test_drop_stops_thread() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let sweeper = Sweeper::spawn("test-sweeper", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(30));
        drop(sweeper);

        let after_drop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn test_stop_signal_flips_once() {
        let signal = StopSignal::default();
        assert!(signal.stop());
        assert!(!signal.stop());
        assert!(signal.wait(Duration::from_secs(60)));
    }
}
