use std::path::PathBuf;

use procgate::{Diagnostic, unlogged_diagnostic};
use procgate_test_utils::capture_logs;

fn failed_false() -> Diagnostic {
    Diagnostic {
        command: "false".to_string(),
        cwd: PathBuf::from("/tmp"),
        exit_code: 1,
        stdout: String::new(),
        stderr: "boom\n".to_string(),
    }
}

#[test]
fn diagnostic_is_not_repeated_when_already_logged() {
    let (_logs, _guard) = capture_logs(tracing::Level::INFO);

    assert_eq!(unlogged_diagnostic(&failed_false()), None);
}

#[test]
fn diagnostic_is_printed_when_info_is_filtered_out() {
    let (_logs, _guard) = capture_logs(tracing::Level::WARN);

    let block = unlogged_diagnostic(&failed_false()).unwrap();

    assert!(block.starts_with("$ false\n"));
    assert!(block.contains("==> exit code: 1 <=="));
    assert!(block.contains("boom"));
}
