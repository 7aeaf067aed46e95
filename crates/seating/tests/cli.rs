//! CLI integration tests: run the binary with instant visits.

use std::process::{Command, Output};

fn run_seating(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_seating");
    Command::new(bin)
        .args(args)
        .env_remove("SEATING_TABLES")
        .env_remove("SEATING_SEED")
        .env_remove("SEATING_MIN_SECS")
        .env_remove("SEATING_MAX_SECS")
        .env_remove("SEATING_POLL_MS")
        .env_remove("RUST_LOG")
        .env("SEATING_LOG", "error")
        .output()
        .expect("failed to run seating binary")
}

fn count_lines(stdout: &str, needle: &str) -> usize {
    stdout.lines().filter(|line| line.contains(needle)).count()
}

#[test]
fn serves_every_guest_and_frees_every_table() {
    let output = run_seating(&[
        "--tables",
        "2",
        "--min-secs",
        "0",
        "--max-secs",
        "0",
        "--poll-ms",
        "5",
        "Maria",
        "Oleg",
        "Darya",
    ]);
    assert!(
        output.status.success(),
        "seating exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "Maria sat at table number 1");
    assert_eq!(lines[1], "Oleg sat at table number 2");
    assert_eq!(lines[2], "Darya is in queue");

    assert_eq!(count_lines(&stdout, "finished and left"), 3);
    assert_eq!(count_lines(&stdout, " is free"), 3);
    assert_eq!(count_lines(&stdout, "Darya left the queue and sat at table number"), 1);
}

#[test]
fn zero_tables_queues_everyone() {
    let output = run_seating(&["--tables", "0", "Ilya", "Pavel", "Galina"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(count_lines(&stdout, "is in queue"), 3);
    assert_eq!(count_lines(&stdout, "sat at table"), 0);
}

#[test]
fn negative_tables_queues_everyone() {
    let output = run_seating(&["--tables", "-2", "Ilya", "Pavel"]);
    assert!(
        output.status.success(),
        "seating exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(count_lines(&stdout, "is in queue"), 2);
    assert_eq!(count_lines(&stdout, "sat at table"), 0);
}

#[test]
fn json_format_emits_one_object_per_event() {
    let output = run_seating(&[
        "--tables",
        "1",
        "--min-secs",
        "0",
        "--max-secs",
        "0",
        "--poll-ms",
        "5",
        "--format",
        "json",
        "Arman",
        "Vitoria",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let kinds: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("each line should be JSON");
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["seated", "queued", "departed", "promoted", "departed"]
    );
}

#[test]
fn unknown_flag_exits_with_usage() {
    let output = run_seating(&["--bogus"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown flag: --bogus"));
    assert!(stderr.contains("Usage: seating"));
}

#[test]
fn inverted_service_range_is_rejected() {
    let output = run_seating(&["--min-secs", "9", "--max-secs", "2"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: invalid service time"));
}
