//! Watch Use Case
//!
//! Initial generation, then a watch session whose regenerations replan every
//! rule against the live config, write through the self-write tracker and
//! report progress as `WatchEvent`s.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::{load_config, ResolvedConfig};
use crate::domain::entities::{ActionKind, ScanCache};
use crate::domain::ports::{ChangeSource, FileSystem};
use crate::domain::services::{execute, plan_cached};
use crate::domain::value_objects::globs::relative_slash_path;
use crate::error::BarrelResult;
use crate::infrastructure::formatter::{format_or_warn, resolve_formatter};
use crate::infrastructure::repositories::JsonCacheRepository;
use crate::infrastructure::{LocalFs, NotifyChangeSource};

use super::event::{WatchEvent, WatchOptions};
use super::session::{
    replace, shared_config, snapshot, start_watching, Regeneration, SharedConfig, WatchHandle,
};
use super::tracker::SelfWriteTracker;

/// Reloads and resolves the config after a config-file change
pub type ConfigReloader = Arc<dyn Fn() -> BarrelResult<ResolvedConfig> + Send + Sync>;

/// Result of a single regeneration pass
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub conflicts: usize,
    pub errors: Vec<String>,
    pub elapsed: Duration,
}

impl PassSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Everything a regeneration needs, shared with the worker thread
#[derive(Clone)]
struct PassRunner<FS> {
    fs: FS,
    cwd: PathBuf,
    config: SharedConfig,
    tracker: SelfWriteTracker,
    cache: Arc<Mutex<Option<ScanCache>>>,
    use_cache: bool,
    format: bool,
    reloader: ConfigReloader,
}

impl<FS: FileSystem> PassRunner<FS> {
    fn run_pass(&self) -> PassSummary {
        let started = Instant::now();
        let config = snapshot(&self.config);
        let repo = JsonCacheRepository::with_fs(&self.fs, &self.cwd);

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let (plan, next) = plan_cached(&config, &self.cwd, &self.fs, cache.as_ref());

        let mut summary = PassSummary {
            skipped: plan.count(ActionKind::Skip),
            conflicts: plan.count(ActionKind::Conflict),
            errors: plan
                .errors
                .iter()
                .map(|e| format!("{}: {}", self.display(&e.directory), e.error))
                .collect(),
            ..PassSummary::default()
        };

        let tracker = self.tracker.clone();
        let register = move |path: &Path| tracker.track(path);
        match execute(&plan, &self.fs, Some(&register)) {
            Ok(written) => summary.written = written,
            Err(e) => summary.errors.push(e.to_string()),
        }

        if self.use_cache {
            repo.save_or_warn(&next);
        }
        *cache = Some(next);
        drop(cache);

        if self.format && !summary.written.is_empty() {
            if let Some(tool) = resolve_formatter(config.formatter, &self.cwd, &self.fs) {
                for path in &summary.written {
                    self.tracker.track(path);
                }
                format_or_warn(tool, &summary.written, &self.cwd);
            }
        }

        summary.elapsed = started.elapsed();
        summary
    }

    fn reload(&self) -> BarrelResult<usize> {
        let next = (self.reloader)()?;
        let rules = next.rules.len();
        replace(&self.config, next);
        Ok(rules)
    }

    fn display(&self, path: &Path) -> String {
        relative_slash_path(&self.cwd, path).unwrap_or_else(|| path.display().to_string())
    }

    fn report(&self, summary: &PassSummary, on_event: &dyn Fn(WatchEvent)) {
        for message in &summary.errors {
            tracing::warn!("regeneration error: {message}");
            on_event(WatchEvent::Error {
                message: message.clone(),
            });
        }
        on_event(WatchEvent::RegenerationComplete {
            written: summary.written.iter().map(|p| self.display(p)).collect(),
            skipped: summary.skipped,
            conflicts: summary.conflicts,
            errors: summary.errors.len(),
            elapsed_ms: summary.elapsed.as_millis() as u64,
        });
    }
}

/// Watch Use Case
pub struct WatchUseCase<S: ChangeSource, FS: FileSystem> {
    source: S,
    runner: PassRunner<FS>,
    options: WatchOptions,
    config_label: String,
}

impl WatchUseCase<NotifyChangeSource, LocalFs> {
    /// Watch `cwd` on the local disk with notify
    pub fn new(cwd: &Path, config: ResolvedConfig, options: WatchOptions) -> Self {
        let cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
        Self::with_parts(NotifyChangeSource::new(), LocalFs::new(), &cwd, config, options)
    }
}

impl<S, FS> WatchUseCase<S, FS>
where
    S: ChangeSource,
    FS: FileSystem + Clone + Send + Sync + 'static,
{
    /// Create with a custom change source and file system (for testing)
    pub fn with_parts(
        source: S,
        fs: FS,
        cwd: &Path,
        config: ResolvedConfig,
        options: WatchOptions,
    ) -> Self {
        let reload_cwd = cwd.to_path_buf();
        let reload_path = options.config_path.clone();
        let reloader: ConfigReloader = Arc::new(move || {
            load_config(&reload_cwd, reload_path.as_deref()).map(|loaded| loaded.config)
        });
        let cache = if options.use_cache {
            JsonCacheRepository::with_fs(&fs, cwd).load()
        } else {
            None
        };
        let config_label = options
            .config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "barrelsmith.toml".to_string());

        Self {
            source,
            runner: PassRunner {
                fs,
                cwd: cwd.to_path_buf(),
                config: shared_config(config),
                tracker: SelfWriteTracker::new(),
                cache: Arc::new(Mutex::new(cache)),
                use_cache: options.use_cache,
                format: options.format,
                reloader,
            },
            options,
            config_label,
        }
    }

    /// Replace how the config is reloaded on change
    pub fn with_reloader<R>(mut self, reloader: R) -> Self
    where
        R: Fn() -> BarrelResult<ResolvedConfig> + Send + Sync + 'static,
    {
        self.runner.reloader = Arc::new(reloader);
        self
    }

    /// Label shown for the config file in the started event
    pub fn with_config_label(mut self, label: impl Into<String>) -> Self {
        self.config_label = label.into();
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.runner.cwd
    }

    pub fn tracker(&self) -> &SelfWriteTracker {
        &self.runner.tracker
    }

    pub fn config(&self) -> Arc<ResolvedConfig> {
        snapshot(&self.runner.config)
    }

    /// One full pass over the current config
    pub fn regenerate(&self) -> PassSummary {
        self.runner.run_pass()
    }

    /// Initial pass, then subscribe. Returns once the session is live.
    pub fn spawn<F>(&self, on_event: F) -> BarrelResult<WatchHandle>
    where
        F: Fn(WatchEvent) + Send + Sync + 'static,
    {
        let on_event = Arc::new(on_event);
        let initial = self.runner.run_pass();
        // nothing is subscribed yet to observe these writes
        self.runner.tracker.clear();
        self.runner.report(&initial, &*on_event);

        let runner = self.runner.clone();
        let events = on_event.clone();
        let handle = start_watching(
            &self.source,
            &self.runner.cwd,
            self.runner.config.clone(),
            self.runner.tracker.clone(),
            &self.options,
            move |job| match job {
                Regeneration::ConfigChanged => match runner.reload() {
                    Ok(rules) => {
                        tracing::info!(rules, "config reloaded");
                        events(WatchEvent::ConfigReloaded { rules });
                    }
                    Err(e) => {
                        tracing::warn!("config reload failed: {e}");
                        events(WatchEvent::Error {
                            message: format!("config reload failed: {e}"),
                        });
                    }
                },
                Regeneration::Directories(dirs) => {
                    events(WatchEvent::ChangesDetected {
                        directories: dirs.iter().map(|d| runner.display(d)).collect(),
                    });
                    let summary = runner.run_pass();
                    runner.report(&summary, &*events);
                }
            },
        )?;

        on_event(WatchEvent::WatchStarted {
            root: self.runner.cwd.display().to_string(),
            config: self.config_label.clone(),
            rules: self.config().rules.len(),
        });
        Ok(handle)
    }

    /// Start watching (blocking)
    ///
    /// Blocks until the running flag is set to false.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> BarrelResult<()>
    where
        F: Fn(WatchEvent) + Send + Sync + 'static,
    {
        let on_event = Arc::new(on_event);
        let events = on_event.clone();
        let handle = self.spawn(move |event| events(event))?;

        while running.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(50));
        }

        handle.unsubscribe();
        on_event(WatchEvent::Shutdown);
        Ok(())
    }
}
