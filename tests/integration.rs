use std::process::Command;

fn versekey_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_versekey"))
}

#[test]
fn parse_prints_canonical_and_short_forms() {
    let output = versekey_cmd()
        .args(["parse", "SA2_19:12!b"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "SA2_19:12!b = SA2 19:12b");
}

#[test]
fn expand_lists_each_verse() {
    let output = versekey_cmd()
        .args(["expand", "GEN_1:1,3-4"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "expand failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["GEN_1:1", "GEN_1:3", "GEN_1:4"]);
}

#[test]
fn osis_flag_switches_notation() {
    let output = versekey_cmd()
        .args(["parse", "--osis", "Gen.1.1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "GEN_1:1 = GEN 1:1");
}

#[test]
fn bad_reference_fails_with_an_error() {
    let output = versekey_cmd()
        .args(["parse", "MAT_1:1234"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn strict_flag_rejects_backwards_ranges() {
    let output = versekey_cmd()
        .args(["expand", "--strict", "SA2_19:19-12"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let lenient = versekey_cmd()
        .args(["expand", "SA2_19:19-12"])
        .output()
        .unwrap();
    assert!(lenient.status.success());
}
