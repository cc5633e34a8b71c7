//! Transaction controller.
//!
//! A run walks `Idle → Running → Committing → Done`, or falls into
//! `Aborting → Failed`. Original target files are only written during
//! `Committing`, which starts once every target has a complete temp file.
//!
//! ```rust,no_run
//! use langsync::{NoopObserver, Synchronizer};
//!
//! let mut sync = Synchronizer::new(
//!     "res/values/strings.xml",
//!     ["res/values-fr/strings.xml", "res/values-de/strings.xml"],
//! );
//! let outcome = sync.run(&mut NoopObserver);
//! assert!(outcome.is_success());
//! ```

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    check::check_source_document,
    error::Error,
    index::build_index,
    locale::locale_from_path,
    merge::{MergeStats, merge_to_file},
    traits::TextSource,
    types::SourceDocument,
};

/// Name of the scratch file written next to each target.
pub const DEFAULT_TEMP_FILE_NAME: &str = ".tmp.xml";

/// Knobs for a synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// File name of the per-directory temp artifact.
    pub temp_file_name: String,
    /// Delay between consecutive targets, for hosts that animate progress.
    pub pace: Option<Duration>,
    /// Refuse sources that [`check_source_document`] rejects.
    pub check_source: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            temp_file_name: DEFAULT_TEMP_FILE_NAME.to_string(),
            pace: None,
            check_source: false,
        }
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temp_file_name(mut self, name: impl Into<String>) -> Self {
        self.temp_file_name = name.into();
        self
    }

    pub fn with_pace(mut self, pace: Option<Duration>) -> Self {
        self.pace = pace;
        self
    }

    pub fn with_check_source(mut self, check_source: bool) -> Self {
        self.check_source = check_source;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Idle,
    Running,
    Committing,
    Done,
    Aborting,
    Failed,
}

/// Receives lifecycle events of a run.
///
/// `on_started` fires first; `on_progress` fires once per staged target and
/// once per committed target; exactly one of `on_failed` / `on_succeeded`
/// ends the run. Events are delivered on the thread driving the run.
pub trait SyncObserver {
    fn on_started(&mut self, _message: &str) {}
    fn on_progress(&mut self, _message: &str) {}
    fn on_failed(&mut self, _message: &str) {}
    fn on_succeeded(&mut self, _message: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// Per-target result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub path: PathBuf,
    pub locale: Option<String>,
    #[serde(flatten)]
    pub stats: MergeStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Synced {
        source: PathBuf,
        targets: Vec<TargetReport>,
    },
    Failed {
        reason: String,
        /// Targets whose content is exactly what it was before the run.
        untouched: Vec<PathBuf>,
        /// Targets already replaced when a commit-stage failure struck.
        committed: Vec<PathBuf>,
    },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    /// Paths that now hold merged content.
    pub fn finalized(&self) -> Vec<&Path> {
        match self {
            SyncOutcome::Synced { targets, .. } => {
                targets.iter().map(|t| t.path.as_path()).collect()
            }
            SyncOutcome::Failed { committed, .. } => {
                committed.iter().map(PathBuf::as_path).collect()
            }
        }
    }
}

struct Staged {
    target: PathBuf,
    temp: PathBuf,
    stats: MergeStats,
}

/// Drives one source file into a set of target files.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    source: PathBuf,
    targets: Vec<PathBuf>,
    options: SyncOptions,
    state: SyncState,
}

impl Synchronizer {
    pub fn new<S, I, T>(source: S, targets: I) -> Self
    where
        S: Into<PathBuf>,
        I: IntoIterator<Item = T>,
        T: Into<PathBuf>,
    {
        Synchronizer {
            source: source.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            options: SyncOptions::default(),
            state: SyncState::Idle,
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// State reached by the most recent run, or `Idle` before the first one.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Temp artifact path used for `target`.
    pub fn temp_path_for(&self, target: &Path) -> PathBuf {
        parent_dir(target).join(&self.options.temp_file_name)
    }

    /// Runs the synchronization to completion.
    ///
    /// Never panics on I/O or input errors; every failure ends in
    /// [`SyncOutcome::Failed`] and one `on_failed` event.
    pub fn run(&mut self, observer: &mut dyn SyncObserver) -> SyncOutcome {
        self.state = SyncState::Idle;
        self.transition(SyncState::Running);
        observer.on_started(&format!("start from {}", self.source.display()));

        let mut created = Vec::new();
        match self.stage(observer, &mut created) {
            Ok(staged) => self.commit(observer, staged),
            Err(error) => self.abort(observer, &created, error),
        }
    }

    fn transition(&mut self, next: SyncState) {
        debug!("sync state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn validate(&self) -> Result<(), Error> {
        let name = self.options.temp_file_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::validation_error(format!(
                "temp file name `{}` must be a plain file name",
                name
            )));
        }

        let mut owners: HashMap<PathBuf, &Path> = HashMap::new();
        for target in &self.targets {
            if target.file_name().is_some_and(|n| n == name) {
                return Err(Error::TargetConflict(format!(
                    "target `{}` has the temp file name `{}`",
                    target.display(),
                    name
                )));
            }
            // symlinks and `..` must not hide two targets sharing a directory
            let dir = parent_dir(target);
            let temp = fs::canonicalize(dir)
                .map_err(|e| Error::io_at(dir, e))?
                .join(name);
            if let Some(previous) = owners.insert(temp.clone(), target) {
                return Err(Error::TargetConflict(format!(
                    "`{}` and `{}` would share the temp file `{}`",
                    previous.display(),
                    target.display(),
                    temp.display()
                )));
            }
        }
        Ok(())
    }

    fn stage(
        &self,
        observer: &mut dyn SyncObserver,
        created: &mut Vec<PathBuf>,
    ) -> Result<Vec<Staged>, Error> {
        self.validate()?;

        let source = SourceDocument::read_from(&self.source)?;
        if self.options.check_source {
            let check = check_source_document(&source)?;
            if !check.is_valid() {
                return Err(Error::InvalidResource(format!(
                    "{}: {}",
                    self.source.display(),
                    check
                )));
            }
        }

        let mut staged = Vec::with_capacity(self.targets.len());
        for (position, target) in self.targets.iter().enumerate() {
            if let Some(pace) = self.options.pace.filter(|_| position > 0) {
                thread::sleep(pace);
            }

            let index = build_index(target)?;
            let temp = self.temp_path_for(target);
            created.push(temp.clone());
            let stats = merge_to_file(&source, &index, &temp)?;
            // rename keeps the temp file's mode, so carry the original's over
            let permissions = fs::metadata(target)
                .map_err(|e| Error::io_at(target, e))?
                .permissions();
            fs::set_permissions(&temp, permissions).map_err(|e| Error::io_at(&temp, e))?;

            observer.on_progress(&target.display().to_string());
            staged.push(Staged {
                target: target.clone(),
                temp,
                stats,
            });
        }
        Ok(staged)
    }

    fn commit(&mut self, observer: &mut dyn SyncObserver, staged: Vec<Staged>) -> SyncOutcome {
        self.transition(SyncState::Committing);

        let mut reports = Vec::with_capacity(staged.len());
        let mut pending = staged.into_iter();
        while let Some(item) = pending.next() {
            // rename replaces the original in one step
            if let Err(e) = fs::rename(&item.temp, &item.target) {
                let error = Error::io_at(&item.target, e);
                let remaining: Vec<Staged> = std::iter::once(item).chain(pending).collect();
                return self.abort_commit(observer, reports, remaining, error);
            }

            observer.on_progress(&format!("committed {}", item.target.display()));
            reports.push(TargetReport {
                locale: locale_from_path(&item.target),
                path: item.target,
                stats: item.stats,
            });
        }

        self.transition(SyncState::Done);
        let message = format!(
            "synced {} target(s) from {}",
            reports.len(),
            self.source.display()
        );
        info!("{}", message);
        observer.on_succeeded(&message);
        SyncOutcome::Synced {
            source: self.source.clone(),
            targets: reports,
        }
    }

    fn abort(
        &mut self,
        observer: &mut dyn SyncObserver,
        created: &[PathBuf],
        error: Error,
    ) -> SyncOutcome {
        self.transition(SyncState::Aborting);
        discard(created);
        self.transition(SyncState::Failed);

        let reason = error.to_string();
        warn!("sync aborted: {}", reason);
        observer.on_failed(&format!(
            "sync failed; every target file was left in its pre-sync state\n{}",
            reason
        ));
        SyncOutcome::Failed {
            reason,
            untouched: self.targets.clone(),
            committed: Vec::new(),
        }
    }

    fn abort_commit(
        &mut self,
        observer: &mut dyn SyncObserver,
        committed: Vec<TargetReport>,
        remaining: Vec<Staged>,
        error: Error,
    ) -> SyncOutcome {
        self.transition(SyncState::Aborting);
        let temps: Vec<PathBuf> = remaining.iter().map(|s| s.temp.clone()).collect();
        discard(&temps);
        self.transition(SyncState::Failed);

        let reason = error.to_string();
        warn!(
            "commit stopped after {} of {} target(s): {}",
            committed.len(),
            committed.len() + remaining.len(),
            reason
        );
        observer.on_failed(&format!(
            "sync failed while committing; {} target(s) were already replaced, the rest were left untouched\n{}",
            committed.len(),
            reason
        ));
        SyncOutcome::Failed {
            reason,
            untouched: remaining.into_iter().map(|s| s.target).collect(),
            committed: committed.into_iter().map(|r| r.path).collect(),
        }
    }
}

/// Synchronizes `targets` from `source` with default options.
pub fn sync<S, I, T>(source: S, targets: I, observer: &mut dyn SyncObserver) -> SyncOutcome
where
    S: Into<PathBuf>,
    I: IntoIterator<Item = T>,
    T: Into<PathBuf>,
{
    Synchronizer::new(source, targets).run(observer)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn discard(temps: &[PathBuf]) {
    for temp in temps {
        match fs::remove_file(temp) {
            Ok(()) => debug!("removed {}", temp.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", temp.display(), e),
        }
    }
}
