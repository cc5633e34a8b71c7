use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use langsync::locale::locale_from_path;
use langsync::{SyncObserver, SyncOptions as LibSyncOptions, SyncOutcome, Synchronizer};
use serde_json::json;

use crate::config::load_config;
use crate::discover::discover_targets;
use crate::path_glob::expand_target_globs;
use crate::validation::{validate_file_path, validate_output_path, validate_target_path};

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub source: String,
    pub targets: Vec<String>,
    pub strict: bool,
    pub pace_ms: Option<u64>,
    pub report_json: Option<String>,
    pub config: Option<String>,
}

/// Renders run events as a progress bar: one tick per staged target and one
/// per committed target.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(target_count: usize) -> Self {
        let bar = ProgressBar::new((target_count * 2) as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        ProgressObserver { bar }
    }
}

impl SyncObserver for ProgressObserver {
    fn on_started(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn on_progress(&mut self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    fn on_failed(&mut self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    fn on_succeeded(&mut self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Targets from the command line, then the config file, then discovery.
fn resolve_targets(
    opts: &SyncOptions,
    config_targets: Vec<String>,
) -> Result<Vec<PathBuf>, String> {
    let patterns = if !opts.targets.is_empty() {
        opts.targets.clone()
    } else {
        config_targets
    };

    let targets = if patterns.is_empty() {
        discover_targets(Path::new(&opts.source))?
    } else {
        expand_target_globs(&patterns)?
    };

    // the source itself is never a target
    let source = Path::new(&opts.source);
    let source_canonical = source.canonicalize().ok();
    Ok(targets
        .into_iter()
        .filter(|target| {
            target.as_path() != source
                && (source_canonical.is_none() || target.canonicalize().ok() != source_canonical)
        })
        .collect())
}

fn write_report(
    path: &str,
    opts: &SyncOptions,
    strict: bool,
    outcome: &SyncOutcome,
) -> Result<(), String> {
    let payload = json!({
        "source": opts.source,
        "strict": strict,
        "result": outcome,
    });

    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

pub fn run_sync_command(opts: SyncOptions) -> Result<(), String> {
    validate_file_path(&opts.source)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let config = load_config(opts.config.as_deref())?;
    let strict = opts.strict || config.sync.strict;
    let pace_ms = opts.pace_ms.or(config.sync.pace_ms);

    let targets = resolve_targets(&opts, config.targets())?;
    if targets.is_empty() {
        println!("No target files to sync for {}; nothing to do", opts.source);
        return Ok(());
    }
    for target in &targets {
        validate_target_path(&target.to_string_lossy())?;
    }

    let mut lib_options = LibSyncOptions::new()
        .with_check_source(strict)
        .with_pace(pace_ms.map(Duration::from_millis));
    if let Some(name) = &config.sync.temp_file_name {
        lib_options = lib_options.with_temp_file_name(name.clone());
    }

    let mut observer = ProgressObserver::new(targets.len());
    let outcome = Synchronizer::new(&opts.source, &targets)
        .with_options(lib_options)
        .run(&mut observer);

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &opts, strict, &outcome)?;
        println!("Report JSON written: {}", report_path);
    }

    match outcome {
        SyncOutcome::Synced { targets, .. } => {
            for report in &targets {
                println!(
                    "{} [{}]: {} preserved, {} placeholder(s), {} dropped",
                    report.path.display(),
                    report.locale.as_deref().unwrap_or("-"),
                    report.stats.preserved,
                    report.stats.placeholders,
                    report.stats.dropped
                );
            }
            println!("✅ Sync complete: {} target file(s)", targets.len());
            Ok(())
        }
        SyncOutcome::Failed {
            reason, committed, ..
        } => {
            if committed.is_empty() {
                eprintln!("All target files were left unchanged.");
            } else {
                for path in &committed {
                    eprintln!(
                        "Already replaced: {} [{}]",
                        path.display(),
                        locale_from_path(path).as_deref().unwrap_or("-")
                    );
                }
            }
            Err(format!("Sync failed: {}", reason))
        }
    }
}
