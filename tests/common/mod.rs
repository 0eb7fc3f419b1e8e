//! Shared fixtures for casecheck integration tests.
//!
//! A fixture owns a scratch directory with a `cases/` folder and a fake
//! subject script. The script exits with whatever number the case file holds,
//! or sleeps when the case file says `sleep`. A `linger` case leaves a
//! backgrounded subshell that touches `<case>.late` after one second unless it
//! is killed first.

#![allow(dead_code)]

use std::{
    ffi::OsStr,
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

const FAKE_SUBJECT: &str = r#"#!/bin/sh
[ "$1" = "--silent" ] || exit 99
content=$(cat "$2")
case "$content" in
  sleep*) sleep 5; exit 0 ;;
  linger*) ( sleep 1; touch "$2.late" ) & sleep 5; exit 0 ;;
esac
exit "$content"
"#;

pub struct Fixture {
    root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create scratch directory");
        fs::create_dir(root.path().join("cases")).expect("create cases directory");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn cases_dir(&self) -> PathBuf {
        self.root.path().join("cases")
    }

    /// Adds a case whose subject run will exit with `status`.
    pub fn add_case(&self, name: &str, status: i32) -> &Self {
        self.write_case(OsStr::new(name), &status.to_string())
    }

    /// Like [`Fixture::add_case`] for names that need not be UTF-8.
    pub fn add_case_os(&self, name: &OsStr, status: i32) -> &Self {
        self.write_case(name, &status.to_string())
    }

    /// Adds a case whose subject run sleeps well past any test timeout.
    pub fn add_sleeping_case(&self, name: &str) -> &Self {
        self.write_case(OsStr::new(name), "sleep")
    }

    /// Adds a case whose subject leaves a child process behind.
    pub fn add_lingering_case(&self, name: &str) -> &Self {
        self.write_case(OsStr::new(name), "linger")
    }

    fn write_case(&self, name: &OsStr, content: &str) -> &Self {
        fs::write(self.cases_dir().join(name), format!("{content}\n")).expect("write case");
        self
    }

    /// Writes the fake subject and returns its path.
    pub fn subject(&self) -> PathBuf {
        let path = self.root.path().join("fake-subject");
        fs::write(&path, FAKE_SUBJECT).expect("write fake subject");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("make fake subject executable");
        path
    }
}
