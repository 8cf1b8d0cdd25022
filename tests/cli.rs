use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_guesstree"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("guesstree should launch")
}

fn workspace(words: &str) -> TempDir {
    let dir = TempDir::new().expect("tmp");
    std::fs::write(dir.path().join("words.txt"), words).expect("write words");
    dir
}

#[test]
fn measure_prints_report() {
    let dir = workspace("ab\ncd\nab\nhello\n");
    let output = run(&["measure"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 21);
    assert!(lines[0].starts_with("word_length,alphabet_scan,"));
    assert!(lines[0].ends_with(",merge_tree"));
    assert_eq!(lines[1], "1,0,0,0,0,0,0");
    assert!(lines[2].starts_with("2,"));
    assert!(lines[2].contains(",12.00,"));
}

#[test]
fn build_then_measure_with_saved_tree() {
    let dir = workspace("the\nquick\nbrown\nfox\n");
    let output = run(&["build", "--show"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.lines().next().expect("root line").ends_with("(100.00%)"));
    assert!(stdout.contains("serialized to huffman.json"));
    assert!(dir.path().join("huffman.json").exists());

    let shown = run(&["show"], dir.path());
    assert!(shown.status.success());
    assert_eq!(String::from_utf8(shown.stdout).expect("utf8").lines().count(), 51);

    let measured = run(
        &["measure", "--tree", "huffman.json", "--window", "auto", "--jobs", "2"],
        dir.path(),
    );
    assert!(measured.status.success(), "{}", String::from_utf8_lossy(&measured.stderr));
    assert_eq!(String::from_utf8(measured.stdout).expect("utf8").lines().count(), 6);
}

#[test]
fn frequencies_lists_every_letter() {
    let dir = workspace("aab\n");
    let output = run(&["frequencies"], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 27);
    assert_eq!(lines[1], "a,0.66667");
    assert_eq!(lines[2], "b,0.33333");
}

#[test]
fn invalid_word_fails_without_partial_report() {
    let dir = workspace("good\nBad\n");
    let output = run(&["measure"], dir.path());

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside the alphabet"), "{stderr}");
}

#[test]
fn missing_word_list_is_reported() {
    let dir = TempDir::new().expect("tmp");
    let output = run(&["measure", "--words", "absent.txt"], dir.path());

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read corpus"));
}
