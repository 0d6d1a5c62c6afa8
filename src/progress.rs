//! Live status line. A background thread samples the incidental path counter
//! and enforces an optional time limit; the search itself never reads it.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{info, warn};
use parking_lot::{Condvar, Mutex};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const UPDATE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct MonitorOptions {
    /// Print the status line; otherwise only the time limit is enforced.
    pub display: bool,
    pub time_limit: Option<Duration>,
    /// Raised when the time limit passes.
    pub cancel: Option<Arc<AtomicBool>>,
}

pub struct ProgressMonitor {
    stop: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressMonitor {
    pub fn spawn(paths: Arc<AtomicU64>, options: MonitorOptions) -> io::Result<Self> {
        let stop = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("progress".into())
            .spawn(move || run(&signal, &paths, &options))?;
        Ok(ProgressMonitor {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the sampler and waits for it to exit.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let (lock, cvar) = &*self.stop;
        *lock.lock() = true;
        cvar.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("progress thread panicked");
            }
        }
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(stop: &(Mutex<bool>, Condvar), paths: &AtomicU64, options: &MonitorOptions) {
    let (lock, cvar) = stop;
    let start = Instant::now();
    let deadline = options.time_limit.map(|limit| start + limit);
    let mut last_update = start;

    let mut stopped = lock.lock();
    while !*stopped {
        cvar.wait_for(&mut stopped, POLL_INTERVAL);
        if *stopped {
            break;
        }

        let now = Instant::now();
        if let (Some(deadline), Some(cancel)) = (deadline, &options.cancel) {
            if now >= deadline && !cancel.swap(true, Ordering::Relaxed) {
                info!("time limit reached, cancelling search");
            }
        }

        if options.display && now.duration_since(last_update) >= UPDATE_INTERVAL {
            let line = status_line(paths.load(Ordering::Relaxed), now.duration_since(start));
            let mut out = io::stdout().lock();
            // A failed refresh only costs one status line.
            let _ = write!(out, "\r{line}").and_then(|_| out.flush());
            last_update = now;
        }
    }
}

pub fn status_line(paths: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let rate = if secs > 0 { paths / secs } else { 0 };
    format!(
        "Paths found: {}, Time elapsed: {}s, Paths/second: {}",
        group_thousands(paths),
        secs,
        group_thousands(rate)
    )
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
