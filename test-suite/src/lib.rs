use std::path::PathBuf;

pub mod case;
pub mod runner;

pub use case::{CaseFile, CaseGroup, CaseOutcome, CaseTest};
pub use runner::TestRunner;

/// Directory holding the bundled case files.
pub fn cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cases")
}

/// The result of running all test cases
#[derive(Debug)]
pub struct TestResults {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<TestFailure>,
}

impl TestResults {
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn add_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn add_failure(&mut self, failure: TestFailure) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Fold one file's outcomes in, naming failures after the file.
    pub fn record(&mut self, file_name: &str, outcomes: Vec<CaseOutcome>) {
        for outcome in outcomes {
            if outcome.passed {
                self.add_pass();
            } else {
                self.add_failure(TestFailure::new(
                    format!("{file_name}: {}", outcome.name),
                    outcome.error.unwrap_or_default(),
                ));
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl Default for TestResults {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct TestFailure {
    pub test_name: String,
    pub error: String,
}

impl TestFailure {
    pub fn new(test_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            error: error.into(),
        }
    }
}
