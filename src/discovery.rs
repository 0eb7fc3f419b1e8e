use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::errors::{CaseError, Result};

/// A single test case: one entry of the case directory.
///
/// `file_name` is the entry exactly as the filesystem returned it; `name` is
/// its lossy UTF-8 rendering, used only for reports and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub file_name: OsString,
}

impl TestCase {
    pub fn new(file_name: impl Into<OsString>) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
        }
    }

    /// Path handed to the subject: `<directory>/<file_name>`.
    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(&self.file_name)
    }
}

/// Lists the cases held by a case directory.
#[derive(Debug)]
pub struct CaseDiscoverer;

impl CaseDiscoverer {
    /// Lists the direct entries of `directory` as test cases.
    ///
    /// The listing is not recursive and applies no extension filter. Hidden
    /// entries (leading `.`) are skipped. Cases are sorted by file name so
    /// that two runs over the same directory visit cases in the same order.
    pub fn discover_cases<P: AsRef<Path>>(directory: P) -> Result<Vec<TestCase>> {
        let directory = directory.as_ref();
        let metadata =
            fs::metadata(directory).map_err(|e| CaseError::discovery(directory, e))?;
        if !metadata.is_dir() {
            return Err(CaseError::discovery(
                directory,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        let walker = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut cases = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                CaseError::discovery(directory, source)
            })?;

            let case = TestCase::new(entry.file_name());
            if Self::is_hidden(&case.name) {
                continue;
            }
            cases.push(case);
        }

        tracing::debug!(
            directory = %directory.display(),
            count = cases.len(),
            "discovered cases"
        );
        Ok(cases)
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }
}
