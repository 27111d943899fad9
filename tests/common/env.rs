//! Isolated test environment for running the barrelsmith binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a barrelsmith CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// A throwaway TypeScript project
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("create temp project"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_barrelsmith")),
        }
    }

    /// Project pre-populated with `files` (relative path, content)
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let env = Self::new();
        for (path, content) in files {
            env.write(path, content);
        }
        env
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture");
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.project_path(relative)).ok()
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.project_path(relative)).expect("remove fixture");
    }

    /// Run barrelsmith in the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(self.root())
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("BARRELSMITH_LOG")
            .env_remove("BARRELSMITH_EXTENSIONS")
            .env_remove("BARRELSMITH_FORMATTER")
            .output()
            .expect("Failed to execute barrelsmith");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
