//! Helpers shared by integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Write documents named `names` into `dir`, each containing its own name
pub fn write_documents(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create document directory");
        }
        fs::write(&path, format!("%PDF-1.7 {}", name)).expect("Failed to write document");
    }
}

/// Isolated HOME plus a document directory
pub struct CliEnv {
    pub home: TempDir,
    pub docs: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create temp home"),
            docs: TempDir::new().expect("Failed to create temp docs"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.home
            .path()
            .join(".config")
            .join("docview")
            .join("config.toml")
    }

    /// Write a config file into the isolated HOME
    pub fn write_config(&self, contents: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Run docview and capture (stdout, stderr, exit code)
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_docview"))
            .args(args)
            .env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("DOCVIEW_LOG")
            .output()
            .expect("Failed to execute docview");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        (stdout, stderr, exit_code)
    }
}
