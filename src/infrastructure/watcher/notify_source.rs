//! notify-backed ChangeSource
//!
//! Watches the root recursively with the platform's recommended backend and
//! forwards one `ChangeBatch` per notify event. A rename reported with both
//! paths becomes one delete of the source and one create of the target.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeCallback, ChangeEvent, ChangeKind, ChangeSource, Subscription};
use crate::domain::value_objects::globs::relative_slash_path;
use crate::error::{BarrelError, BarrelResult};

/// Change source backed by `notify::RecommendedWatcher`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyChangeSource;

impl NotifyChangeSource {
    pub fn new() -> Self {
        Self
    }
}

struct NotifySubscription {
    _watcher: RecommendedWatcher,
}

impl Subscription for NotifySubscription {
    fn unsubscribe(self: Box<Self>) {
        tracing::debug!("change source unsubscribed");
    }
}

impl ChangeSource for NotifyChangeSource {
    fn subscribe(
        &self,
        root: &Path,
        ignore: &[String],
        callback: ChangeCallback,
    ) -> BarrelResult<Box<dyn Subscription>> {
        let ignore = compile_ignore(ignore)?;
        let root_buf = root.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let events = translate(&root_buf, &ignore, event);
                if !events.is_empty() {
                    callback(Ok(events));
                }
            }
            Err(e) => callback(Err(e.to_string())),
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        tracing::debug!(root = %root.display(), "watching");

        Ok(Box::new(NotifySubscription { _watcher: watcher }))
    }
}

fn compile_ignore(patterns: &[String]) -> BarrelResult<GlobSet> {
    let invalid = |pattern: &str, e: globset::Error| BarrelError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.kind().to_string(),
    };
    let mut builder = GlobSetBuilder::new();
    for raw in patterns {
        builder.add(Glob::new(raw).map_err(|e| invalid(raw, e))?);
    }
    builder.build().map_err(|e| invalid(&patterns.join(", "), e))
}

fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Remove(_) => Some(ChangeKind::Delete),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(ChangeKind::Delete),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(ChangeKind::Create),
        EventKind::Modify(_) => Some(ChangeKind::Update),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}

fn is_ignored(root: &Path, ignore: &GlobSet, path: &Path) -> bool {
    match relative_slash_path(root, path) {
        Some(rel) => ignore.is_match(&rel),
        None => true,
    }
}

fn translate(root: &Path, ignore: &GlobSet, event: Event) -> Vec<ChangeEvent> {
    let changes: Vec<(PathBuf, ChangeKind)> =
        if let EventKind::Modify(ModifyKind::Name(RenameMode::Both)) = event.kind {
            // paths are [from, to]
            let mut paths = event.paths.into_iter();
            paths
                .next()
                .map(|from| (from, ChangeKind::Delete))
                .into_iter()
                .chain(paths.next().map(|to| (to, ChangeKind::Create)))
                .collect()
        } else {
            let Some(kind) = change_kind(&event.kind) else {
                return Vec::new();
            };
            event.paths.into_iter().map(|path| (path, kind)).collect()
        };

    changes
        .into_iter()
        .filter(|(path, _)| !is_ignored(root, ignore, path))
        .map(|(path, kind)| ChangeEvent::new(path, kind))
        .collect()
}
