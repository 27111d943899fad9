//! Watch session
//!
//! `start_watching` wires a `ChangeSource` to the router, the debouncer and a
//! single regeneration worker:
//!
//! - the source's callback thread only forwards batches over a channel
//! - the loop thread owns routing and the debouncer
//! - the worker thread runs `on_regenerate`, one job at a time
//!
//! A debounced fire that finds a regeneration in flight or queued is dropped,
//! not queued. Config reloads are never dropped. Only the loop thread adds
//! jobs, so the pending count it reads cannot grow behind its back.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::ResolvedConfig;
use crate::domain::ports::{ChangeBatch, ChangeEvent, ChangeSource, Subscription};
use crate::error::BarrelResult;

use super::debounce::Debouncer;
use super::event::WatchOptions;
use super::router::{Routed, Router};
use super::tracker::SelfWriteTracker;

/// Idle wake-up interval of the loop thread
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The live configuration; reloads swap the inner `Arc` whole
pub type SharedConfig = Arc<RwLock<Arc<ResolvedConfig>>>;

pub fn shared_config(config: ResolvedConfig) -> SharedConfig {
    Arc::new(RwLock::new(Arc::new(config)))
}

/// Consistent snapshot of the live configuration
pub fn snapshot(config: &SharedConfig) -> Arc<ResolvedConfig> {
    config
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the live configuration
pub fn replace(config: &SharedConfig, next: ResolvedConfig) {
    *config.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
}

/// Work handed to `on_regenerate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Regeneration {
    /// The config file changed; reload it, plan nothing
    ConfigChanged,
    /// Debounced affected directories, sorted. Informational: the pass
    /// replans every rule.
    Directories(Vec<PathBuf>),
}

/// Running watch session
pub struct WatchHandle {
    stop: Arc<AtomicBool>,
    subscription: Option<Box<dyn Subscription>>,
    loop_thread: Option<JoinHandle<()>>,
    worker_thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// Stop delivery and wait for an in-flight regeneration to finish
    pub fn unsubscribe(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::SeqCst)
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        for handle in [self.loop_thread.take(), self.worker_thread.take()]
            .into_iter()
            .flatten()
        {
            if handle.join().is_err() {
                tracing::warn!("watch thread panicked");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Subscribe to `source` under `cwd` and call `on_regenerate` for config
/// changes and debounced directory changes until the handle is unsubscribed.
pub fn start_watching<S, R>(
    source: &S,
    cwd: &Path,
    config: SharedConfig,
    tracker: SelfWriteTracker,
    options: &WatchOptions,
    on_regenerate: R,
) -> BarrelResult<WatchHandle>
where
    S: ChangeSource + ?Sized,
    R: Fn(Regeneration) + Send + 'static,
{
    let (batch_tx, batch_rx) = mpsc::channel::<ChangeBatch>();
    let batch_tx = Mutex::new(batch_tx);
    let subscription = source.subscribe(
        cwd,
        &options.ignore,
        Box::new(move |batch| {
            let sender = batch_tx.lock().unwrap_or_else(PoisonError::into_inner);
            // the loop is gone once the session stops
            let _ = sender.send(batch);
        }),
    )?;

    let stop = Arc::new(AtomicBool::new(false));
    let pending = Arc::new(AtomicUsize::new(0));
    let (job_tx, job_rx) = mpsc::channel::<Regeneration>();

    let worker_thread = {
        let pending = pending.clone();
        thread::Builder::new()
            .name("barrelsmith-regenerate".into())
            .spawn(move || run_worker(job_rx, pending, on_regenerate))?
    };

    let loop_thread = {
        let session = LoopState {
            router: Router::new(cwd, options.config_path.as_deref()),
            debouncer: Debouncer::new(options.debounce),
            config,
            tracker,
            pending,
            jobs: job_tx,
        };
        let stop = stop.clone();
        thread::Builder::new()
            .name("barrelsmith-watch".into())
            .spawn(move || session.run(batch_rx, stop))?
    };

    Ok(WatchHandle {
        stop,
        subscription: Some(subscription),
        loop_thread: Some(loop_thread),
        worker_thread: Some(worker_thread),
    })
}

fn run_worker<R>(jobs: Receiver<Regeneration>, pending: Arc<AtomicUsize>, on_regenerate: R)
where
    R: Fn(Regeneration),
{
    for job in jobs {
        tracing::debug!(?job, "regeneration started");
        on_regenerate(job);
        pending.fetch_sub(1, Ordering::SeqCst);
    }
}

struct LoopState {
    router: Router,
    debouncer: Debouncer,
    config: SharedConfig,
    tracker: SelfWriteTracker,
    /// Jobs dispatched and not yet finished by the worker
    pending: Arc<AtomicUsize>,
    jobs: Sender<Regeneration>,
}

impl LoopState {
    fn run(mut self, batches: Receiver<ChangeBatch>, stop: Arc<AtomicBool>) {
        while !stop.load(Ordering::SeqCst) {
            let wait = self
                .debouncer
                .time_until_fire(Instant::now())
                .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

            match batches.recv_timeout(wait) {
                Ok(Ok(events)) => self.on_batch(&events),
                Ok(Err(message)) => tracing::warn!("change source error: {message}"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            self.tracker.expire(now);
            if let Some(dirs) = self.debouncer.poll(now) {
                self.fire(dirs);
            }
        }
        tracing::debug!(root = %self.router.root().display(), "watch loop stopped");
    }

    fn on_batch(&mut self, events: &[ChangeEvent]) {
        let config = snapshot(&self.config);
        match self.router.route(events, &self.tracker, &config) {
            Routed::Nothing => {}
            Routed::ConfigChanged => {
                tracing::info!("config changed");
                self.dispatch(Regeneration::ConfigChanged);
            }
            Routed::Directories(dirs) => self.debouncer.add(dirs, Instant::now()),
        }
    }

    fn fire(&mut self, dirs: Vec<PathBuf>) {
        if self.pending.load(Ordering::SeqCst) > 0 {
            tracing::debug!(dirs = dirs.len(), "regeneration in flight, dropping fire");
            return;
        }
        self.dispatch(Regeneration::Directories(dirs));
    }

    fn dispatch(&self, job: Regeneration) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.jobs.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!("regeneration worker stopped");
        }
    }
}
