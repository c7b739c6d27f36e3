use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use jsv_valid::Validator;
use tracing::debug;

use crate::{CaseFile, TestFailure, TestResults};

pub struct TestRunner {
    cases_dir: PathBuf,
    filter: Option<String>,
    validator: Validator,
}

impl TestRunner {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
            filter: None,
            validator: Validator::default(),
        }
    }

    /// Only run files whose name contains `filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Discover and run all test cases
    pub fn run_all(&self) -> Result<TestResults> {
        let mut results = TestResults::new();

        for path in self.discover_test_files()? {
            let file_name = self.file_name(&path);
            match CaseFile::load(&path) {
                Ok(case_file) => {
                    debug!("running {}", file_name);
                    results.record(&file_name, case_file.run(&self.validator));
                }
                Err(e) => {
                    results.add_failure(TestFailure::new(file_name, format!("{e:#}")));
                }
            }
        }

        Ok(results)
    }

    /// Discover all .json case files, sorted by path
    pub fn discover_test_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk_directory(&self.cases_dir, &mut files)?;
        files.sort();
        if let Some(filter) = &self.filter {
            files.retain(|path| self.file_name(path).contains(filter.as_str()));
        }
        Ok(files)
    }

    /// Path relative to the cases directory, without extension
    pub fn file_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.cases_dir)
            .unwrap_or(path)
            .with_extension("")
            .display()
            .to_string()
    }

    fn walk_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                self.walk_directory(&path, files)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }

        Ok(())
    }
}
