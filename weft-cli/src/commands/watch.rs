//! Watch command implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use weft::errors::{Result, WeftError};
use weft::interface::{build_all, Context};

/// Options for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Debounce delay in milliseconds; the configured one when zero.
    pub debounce_ms: u64,
}

/// Checks whether a path matches any of the exclude patterns.
fn is_excluded(path: &Path, base_dir: &Path, exclude_patterns: &[glob::Pattern]) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let rel_str = relative.to_string_lossy();
    exclude_patterns.iter().any(|glob| glob.matches(&rel_str))
}

/// Files to watch, with the directories holding them.
fn watch_targets(ctx: &Context) -> Result<(HashSet<PathBuf>, Vec<PathBuf>)> {
    let exclude = ctx.config.watch.exclude_patterns()?;
    let files: HashSet<PathBuf> = ctx
        .input_files()
        .into_iter()
        .filter(|p| !is_excluded(p, &ctx.base_dir, &exclude))
        .map(|p| normalize(&p))
        .collect();

    let mut dirs: Vec<PathBuf> = files
        .iter()
        .filter_map(|p| p.parent().map(normalize))
        .collect();
    dirs.sort();
    dirs.dedup();
    Ok((files, dirs))
}

fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn rebuild(ctx: &Context) {
    match build_all(ctx).and_then(|tx| tx.execute()) {
        Ok(()) => tracing::info!("Build finished"),
        Err(e) => eprintln!("Build error: {}", e),
    }
}

/// Executes the watch command.
pub fn watch(ctx: &Context, options: WatchOptions) -> Result<()> {
    let debounce = if options.debounce_ms > 0 {
        options.debounce_ms
    } else {
        ctx.config.watch.debounce_ms
    };

    let (files, dirs) = watch_targets(ctx)?;
    tracing::debug!("Watching {} files in {} directories", files.len(), dirs.len());

    println!("Watching for changes (debounce: {}ms)...", debounce);
    println!("Press Ctrl+C to stop.");

    // Initial build
    rebuild(ctx);

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )
    .map_err(|e| WeftError::Watch(e.to_string()))?;

    for dir in dirs.iter().filter(|d| d.is_dir()) {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| WeftError::Watch(e.to_string()))?;
    }

    let is_relevant = |event: &notify::Event| {
        event
            .paths
            .iter()
            .any(|p| files.contains(&normalize(p)) || files.contains(p))
    };

    // Event loop
    loop {
        let event = rx
            .recv()
            .map_err(|e| WeftError::Watch(format!("Watch error: {}", e)))?;
        if !is_relevant(&event) {
            continue;
        }
        tracing::debug!("File changed: {:?}", event.paths);

        // Collapse the burst of events an editor save produces
        while rx.recv_timeout(Duration::from_millis(debounce)).is_ok() {}

        rebuild(ctx);
    }
}
