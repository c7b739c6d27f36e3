use test_suite::{TestRunner, cases_dir};
use tracing_subscriber::EnvFilter;

#[test]
fn run_all_test_cases() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let runner = TestRunner::new(cases_dir());
    let results = runner.run_all().expect("Failed to run test suite");

    // Print results
    println!("\n=== Test Suite Results ===");
    println!("Total: {}", results.total);
    println!("Passed: {}", results.passed);
    println!("Failed: {}", results.failed);

    if !results.failures.is_empty() {
        println!("\n=== Failures ===");
        for failure in &results.failures {
            println!("\n[FAIL] {}", failure.test_name);
            println!("  {}", failure.error);
        }
    }

    assert!(results.total > 0, "no test cases found");
    assert!(
        results.is_success(),
        "Test suite failed with {} failures",
        results.failed
    );
}
