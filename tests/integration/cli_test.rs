use std::process::{Command, Output};

fn run_finder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_finder"))
        .args(args)
        .output()
        .expect("Failed to execute finder")
}

#[test]
fn test_help_flags() {
    for flag in ["-h", "-?", "--help"] {
        let output = run_finder(&[flag]);
        assert!(output.status.success(), "{} should exit successfully", flag);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage"), "{} should print usage", flag);
        assert!(stdout.contains("BASE"), "{} should mention BASE", flag);
        assert!(!stdout.contains("Found"), "{} should not search", flag);
    }
}

#[test]
fn test_help_wins_over_other_arguments() {
    let output = run_finder(&["10", "-t", "2", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(!stdout.contains("Found"));
}

#[test]
fn test_version_flags() {
    for flag in ["-v", "--version"] {
        let output = run_finder(&[flag]);
        assert!(output.status.success(), "{} should exit successfully", flag);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.starts_with("finder version "),
            "{} should print the banner, got: {}",
            flag,
            stdout
        );
        assert!(stdout.contains("license"));
    }
}

#[test]
fn test_missing_base() {
    let output = run_finder(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_argument_errors() {
    let cases: &[(&[&str], &str)] = &[
        (&["ten"], "could not parse base"),
        (&["1"], "base out of range"),
        (&["10", "-t"], "NTHREADS"),
        (&["10", "-t", "0"], "number of threads out of range"),
        (&["10", "-t", "x"], "could not parse number of threads"),
        (&["10", "-t", "2", "-t", "3"], "-t"),
        (&["10", "12"], "12"),
    ];

    for (args, message) in cases {
        let output = run_finder(args);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(!output.status.success(), "{:?} should fail", args);
        assert!(
            stderr.contains(message),
            "{:?} should report '{}', got: {}",
            args,
            message,
            stderr
        );
        assert!(
            !String::from_utf8_lossy(&output.stdout).contains("Found"),
            "{:?} should not search",
            args
        );
    }
}

#[test]
fn test_base_10_search() {
    let output = run_finder(&["10", "-t", "4"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Found [3:8:1:6:5:4:7:2:9]",
            "1 pandivisible number found in base 10."
        ]
    );
}

#[test]
fn test_base_in_hex() {
    let output = run_finder(&["0x6"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found [1:4:3:2:5]"));
    assert!(stdout.contains("Found [5:4:3:2:1]"));
    assert!(stdout.contains("2 pandivisible numbers found in base 6."));
}

#[test]
fn test_odd_base_reports_nothing() {
    let output = run_finder(&["11", "-t", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "No pandivisible numbers found in base 11.");
}
