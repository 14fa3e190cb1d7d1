use std::process::Command;

/// Run a search and return the `Found` lines (sorted) and the summary line.
fn search(base: &str, threads: &str) -> (Vec<String>, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_finder"))
        .args([base, "-t", threads])
        .output()
        .expect("Failed to execute finder");

    assert!(
        output.status.success(),
        "finder {} -t {} failed: {}",
        base,
        threads,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let mut lines: Vec<String> = stdout.lines().map(str::to_owned).collect();
    let summary = lines.pop().expect("missing summary line");
    lines.sort();
    (lines, summary)
}

#[test]
fn test_base_2() {
    let (found, summary) = search("2", "1");
    assert_eq!(found, vec!["Found [1]"]);
    assert_eq!(summary, "1 pandivisible number found in base 2.");
}

#[test]
fn test_base_4() {
    let (found, summary) = search("4", "2");
    assert_eq!(found, vec!["Found [1:2:3]", "Found [3:2:1]"]);
    assert_eq!(summary, "2 pandivisible numbers found in base 4.");
}

#[test]
fn test_base_8_contains_known_solution() {
    let (found, summary) = search("8", "3");
    assert!(found.contains(&"Found [3:2:5:4:1:6:7]".to_string()));
    assert_eq!(
        summary,
        format!("{} pandivisible numbers found in base 8.", found.len())
    );
}

#[test]
fn test_thread_count_does_not_change_results() {
    let single = search("12", "1");
    for threads in ["2", "5", "16"] {
        assert_eq!(search("12", threads), single, "{} threads", threads);
    }
}

#[test]
fn test_found_lines_are_not_interleaved() {
    let (found, _) = search("10", "16");
    for line in &found {
        assert!(line.starts_with("Found ["), "malformed line: {}", line);
        assert!(line.ends_with(']'), "malformed line: {}", line);
    }
}
