//! Planned output actions.
//!
//! A build first collects everything it is going to do into a
//! [`Transaction`], which can then be listed (dry run) or executed.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{Result, WeftError};

/// An action that can be executed as part of a transaction.
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Returns the file this action produces.
    fn target(&self) -> &Path;

    /// Executes the action.
    fn execute(&self) -> Result<()>;

    /// Returns a description of this action.
    fn describe(&self) -> String;
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WeftError::file(parent, e))?;
    }
    Ok(())
}

/// Write generated content to a file.
#[derive(Debug)]
pub struct WriteFile {
    pub path: PathBuf,
    pub content: String,
}

impl WriteFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl Action for WriteFile {
    fn target(&self) -> &Path {
        &self.path
    }

    fn execute(&self) -> Result<()> {
        ensure_parent(&self.path)?;
        atomic_write(&self.path, &self.content).map_err(|e| WeftError::file(&self.path, e))
    }

    fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }
}

/// Copy an existing file.
#[derive(Debug)]
pub struct CopyFile {
    pub source: PathBuf,
    pub path: PathBuf,
}

impl CopyFile {
    pub fn new(source: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            path: path.into(),
        }
    }
}

impl Action for CopyFile {
    fn target(&self) -> &Path {
        &self.path
    }

    fn execute(&self) -> Result<()> {
        ensure_parent(&self.path)?;
        fs::copy(&self.source, &self.path).map_err(|e| WeftError::file(&self.source, e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("copy {} -> {}", self.source.display(), self.path.display())
    }
}

/// Run an external tool that produces `output`.
#[derive(Debug)]
pub struct RunTool {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub output: PathBuf,
    pub working_dir: Option<PathBuf>,
}

impl RunTool {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            output: output.into(),
            working_dir: None,
        }
    }

    /// Runs the tool from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Action for RunTool {
    fn target(&self) -> &Path {
        &self.output
    }

    fn execute(&self) -> Result<()> {
        ensure_parent(&self.output)?;
        tracing::debug!("running {}", self.command_line());

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        let status = command
            .status()
            .map_err(|e| WeftError::file(&self.program, e))?;

        if !status.success() {
            return Err(WeftError::ToolFailed {
                program: self.program.display().to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("run {}", self.command_line())
    }
}

/// An ordered list of actions.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<Box<dyn Action>>,
}

impl Transaction {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action to the transaction.
    pub fn add(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Adds a write action.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.add(WriteFile::new(path, content));
    }

    /// Adds a copy action.
    pub fn copy(&mut self, source: impl Into<PathBuf>, path: impl Into<PathBuf>) {
        self.add(CopyFile::new(source, path));
    }

    /// Adds a tool invocation.
    pub fn run_tool(&mut self, tool: RunTool) {
        self.add(tool);
    }

    /// Appends all actions of `other`.
    pub fn extend(&mut self, other: Transaction) {
        self.actions.extend(other.actions);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.describe()).collect()
    }

    /// Returns the files the actions produce, in order.
    pub fn targets(&self) -> Vec<&Path> {
        self.actions.iter().map(|a| a.target()).collect()
    }

    /// Executes all actions in order, stopping at the first failure.
    pub fn execute(&self) -> Result<()> {
        for action in &self.actions {
            tracing::info!("{}", action.describe());
            action.execute()?;
        }
        Ok(())
    }
}

/// Counter for unique temp file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes content to a file atomically using a temp file.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".weft-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("tutorial_triangle.html");

        WriteFile::new(&path, "<html/>").execute().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<html/>");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.js");
        fs::write(&path, "old").unwrap();

        WriteFile::new(&path, "new").execute().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_copy() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("filament.wasm");
        fs::write(&source, b"\0asm").unwrap();
        let target = dir.path().join("out").join("filament.wasm");

        CopyFile::new(&source, &target).execute().unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"\0asm");
    }

    #[test]
    fn test_copy_missing_source_names_file() {
        let dir = tempdir().unwrap();
        let err = CopyFile::new(dir.path().join("missing.js"), dir.path().join("x.js"))
            .execute()
            .unwrap_err();
        assert!(err.to_string().contains("missing.js"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_tool_success_and_failure() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out").join("done.txt");

        let ok = RunTool::new("sh", vec!["-c".into(), "exit 0".into()], &output);
        ok.execute().unwrap();
        assert!(output.parent().unwrap().is_dir());

        let failing = RunTool::new("sh", vec!["-c".into(), "exit 3".into()], &output);
        match failing.execute() {
            Err(WeftError::ToolFailed { program, code }) => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected tool failure, got {:?}", other),
        }
    }

    #[test]
    fn test_run_tool_missing_program() {
        let dir = tempdir().unwrap();
        let tool = RunTool::new(dir.path().join("no-such-matc"), Vec::new(), dir.path().join("x"));
        assert!(matches!(tool.execute(), Err(WeftError::File { .. })));
    }

    #[test]
    fn test_transaction_describe_and_execute() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");

        let mut tx = Transaction::new();
        tx.write(&a, "content a");
        tx.copy(&a, &b);

        assert_eq!(tx.len(), 2);
        let description = tx.describe();
        assert!(description[0].starts_with("write "));
        assert!(description[1].starts_with("copy "));
        assert_eq!(tx.targets(), vec![a.as_path(), b.as_path()]);

        tx.execute().unwrap();
        assert_eq!(fs::read_to_string(&b).unwrap(), "content a");
    }

    #[test]
    fn test_transaction_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        let after = dir.path().join("after.txt");

        let mut tx = Transaction::new();
        tx.copy(dir.path().join("missing"), dir.path().join("copy"));
        tx.write(&after, "never");

        assert!(tx.execute().is_err());
        assert!(!after.exists());
    }

    #[test]
    fn test_extend() {
        let mut first = Transaction::new();
        first.write("a", "");
        let mut second = Transaction::new();
        second.write("b", "");
        first.extend(second);
        assert_eq!(first.describe(), vec!["write a", "write b"]);
    }
}
