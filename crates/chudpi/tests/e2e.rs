//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

const PI_100: &str = "3.141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117067";

fn chudpi() -> Command {
    let mut cmd = Command::cargo_bin("chudpi").expect("binary not found");
    cmd.env_remove("CHUDPI_DIGITS").env_remove("CHUDPI_THREADS");
    cmd
}

#[test]
fn help_flag() {
    chudpi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chudnovsky"));
}

#[test]
fn version_flag() {
    chudpi()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chudpi"));
}

#[test]
fn hundred_digits_quiet() {
    chudpi()
        .args(["-n", "100", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn hundred_digits_on_four_threads() {
    chudpi()
        .args(["-n", "100", "-t", "4", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn all_cores() {
    chudpi()
        .args(["-n", "100", "-t", "0", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn thousand_digits_ends_correctly() {
    chudpi()
        .args(["-n", "1000", "-t", "2", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("613001927876611195909216420198\n"));
}

#[test]
fn short_request() {
    chudpi()
        .args(["-n", "5", "-c", "-q"])
        .assert()
        .success()
        .stdout("3.1415\n");
}

#[test]
fn report_mode() {
    chudpi()
        .env("NO_COLOR", "1")
        .args(["-n", "100", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Terms:"))
        .stdout(predicate::str::contains("Depth:"))
        .stdout(predicate::str::contains("pi = 3.14159"));
}

#[test]
fn details_mode() {
    chudpi()
        .env("NO_COLOR", "1")
        .args(["-n", "100", "-c", "-d", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P size:"))
        .stdout(predicate::str::contains("pi(0,7)="))
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn verbose_mode() {
    chudpi()
        .args(["-n", "300", "-c", "-v"])
        .assert()
        .success();
}

#[test]
fn progress_mode() {
    chudpi()
        .args(["-n", "2000", "-t", "2", "--progress"])
        .assert()
        .success();
}

#[test]
fn json_output() {
    let output = chudpi()
        .args(["-n", "50", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["backend"], "Chudnovsky");
    assert_eq!(parsed[0]["result"]["digits"], 50);
    assert_eq!(parsed[0]["result"]["terms"], 3);
    assert_eq!(
        parsed[0]["result"]["value"],
        "3.1415926535897932384626433832795028841971693993751"
    );
}

#[test]
fn bigint_alias() {
    chudpi()
        .args(["-n", "100", "--backend", "bigint", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn all_backends_agree() {
    chudpi()
        .args(["-n", "500", "--backend", "all", "-c", "-q"])
        .assert()
        .success();
}

#[test]
fn invalid_backend() {
    chudpi()
        .args(["-n", "100", "--backend", "abacus", "-c"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown calculator"));
}

#[test]
fn zero_digits_fails() {
    chudpi()
        .args(["-n", "0", "-c", "-q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn invalid_split_ratio() {
    chudpi()
        .args(["--split-ratio", "0"])
        .assert()
        .code(4);
}

#[test]
fn custom_split_ratio_same_digits() {
    chudpi()
        .args(["-n", "100", "--split-ratio", "0.3", "--parallel-threshold", "2", "-t", "3", "-c", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PI_100));
}

#[test]
fn memory_limit_sufficient() {
    chudpi()
        .args(["-n", "1000", "--memory-limit", "64M", "-c", "-q"])
        .assert()
        .success();
}

#[test]
fn memory_limit_exceeded() {
    chudpi()
        .args(["-n", "1000000", "--memory-limit", "1K", "-c", "-q"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("exceeds limit"));
}

#[test]
fn memory_limit_rejects_largest_digit_count() {
    chudpi()
        .args(["-n", "18446744073709551615", "--memory-limit", "1G", "-q"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("exceeds limit"));
}

#[test]
fn output_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("pi.txt");
    chudpi()
        .args(["-n", "100", "-q", "-o", path.to_str().unwrap()])
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), PI_100);
}

#[test]
fn env_var_digits() {
    chudpi()
        .env("CHUDPI_DIGITS", "20")
        .args(["-c", "-q"])
        .assert()
        .success()
        .stdout("3.1415926535897932384\n");
}

#[test]
fn shell_completion_bash() {
    chudpi()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chudpi"));
}

#[test]
fn shell_completion_zsh() {
    chudpi()
        .args(["--completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chudpi"));
}
