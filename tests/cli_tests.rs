//! End-to-end tests for the `keyvox` command-line interface.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Path to the keyvox binary
fn keyvox_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyvox")
}

/// Creates an asset tree with empty (but present) audio files.
fn create_assets(root: &Path, files: &[(&str, &str)]) {
    for (lang, basename) in files {
        let dir = root.join(lang);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{basename}.wav")), b"").unwrap();
    }
}

#[test]
fn test_langs_lists_all_languages() {
    let output = Command::new(keyvox_bin())
        .args(["langs"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("en"));
    assert!(stdout.contains("ru"));
    assert!(stdout.contains("ar"));
    assert!(stdout.contains("English"));
}

#[test]
fn test_langs_json() {
    let output = Command::new(keyvox_bin())
        .args(["langs", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let langs: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON output");
    let langs = langs.as_array().expect("Should be an array");
    assert_eq!(langs.len(), 3);
    assert_eq!(langs[0]["code"], "en");
    assert!(langs.iter().all(|l| l["keys"].as_u64().unwrap() > 40));
}

#[test]
fn test_show_json_exposes_view_models() {
    let output = Command::new(keyvox_bin())
        .args(["show", "--lang", "ru", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON output");
    let rows = rows.as_array().expect("Should be an array of rows");
    assert!(rows.len() >= 6);

    let key_q = rows
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .find(|key| key["code"] == "KeyQ")
        .expect("KeyQ should be present");

    // Cyrillic is an uppercase-inversion language: the main slot shows the
    // capital and the shifted slot stays empty.
    assert_eq!(key_q["mainLabel"], "Й");
    assert_eq!(key_q["shiftedLabel"], "");
    assert_eq!(key_q["isShiftKey"], false);
    assert_eq!(key_q["isActive"], false);
}

#[test]
fn test_show_unknown_language_fails() {
    let output = Command::new(keyvox_bin())
        .args(["show", "--lang", "xx"])
        .output()
        .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xx"), "stderr should name the language: {stderr}");
}

#[test]
fn test_play_resolves_and_reports_spoken_name() {
    let temp = tempfile::tempdir().unwrap();
    create_assets(temp.path(), &[("en", "exclamation mark")]);

    let output = Command::new(keyvox_bin())
        .args([
            "--no-audio",
            "--assets",
            temp.path().to_str().unwrap(),
            "play",
            "Digit1",
            "--shift",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("exclamation mark"),
        "shifted Digit1 speaks its override name: {stdout}"
    );
}

#[test]
fn test_play_unknown_code_fails() {
    let output = Command::new(keyvox_bin())
        .args(["--no-audio", "play", "NoSuchKey"])
        .output()
        .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_play_missing_asset_still_succeeds() {
    // No assets at all: primary and fallback both fail, but the policy
    // swallows playback errors and the command completes.
    let temp = tempfile::tempdir().unwrap();

    let output = Command::new(keyvox_bin())
        .args([
            "--no-audio",
            "--assets",
            temp.path().to_str().unwrap(),
            "play",
            "KeyQ",
            "--lang",
            "ru",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_spell_reports_played_and_skipped() {
    let temp = tempfile::tempdir().unwrap();
    create_assets(temp.path(), &[("en", "h"), ("en", "i")]);

    let output = Command::new(keyvox_bin())
        .args([
            "--no-audio",
            "--assets",
            temp.path().to_str().unwrap(),
            "spell",
            "hi§",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 keys"), "stdout: {stdout}");
    assert!(stdout.contains("skipped"), "'§' has no key: {stdout}");
}
