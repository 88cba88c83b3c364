use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn markup_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write markup");
    file
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn tokens_are_listed() {
    let file = markup_file("[b]hi[/b]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("tokens").arg(file.path());
    cmd.assert()
        .success()
        .stdout("OPEN b\nCONTENT \"hi\"\nCLOSE b\n");
}

#[test]
fn tokens_as_json() {
    let file = markup_file("[i]x[/i]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("tokens").arg(file.path()).arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"OpenTag\"").and(predicate::str::contains("\"value\": \"i\"")));
}

#[test]
fn tree_is_drawn() {
    let file = markup_file("[b]x[/b]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("tree").arg(file.path());
    cmd.assert()
        .success()
        .stdout("⧉ document\n└─ 𝐁 b\n  └─ ◦ \"x\"\n");
}

#[test]
fn export_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("export").arg("-").write_stdin("[STRONG]a[/strong][i]b");
    cmd.assert().success().stdout("[b]a[/b][i]b[/i]");
}

#[test]
fn toggle_prints_markup() {
    let file = markup_file("[b]hello[/b]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("toggle")
        .arg(file.path())
        .arg("--trait")
        .arg("bold")
        .arg("--range")
        .arg("1..3");
    cmd.assert().success().stdout("[b]h[/b]el[b]lo[/b]");
}

#[test]
fn toggle_respects_readonly_config() {
    let file = markup_file("hello");
    let config = config_file("[features]\nenabled = [\"all\", \"readonly\"]\n");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("--config")
        .arg(config.path())
        .arg("toggle")
        .arg(file.path())
        .arg("--trait")
        .arg("italic")
        .arg("--range")
        .arg("0..2");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not accept formatting changes"));
}

#[test]
fn buffer_as_yaml() {
    let file = markup_file("[u]x[/u]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("buffer").arg(file.path()).arg("-f").arg("yaml");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("text: x").and(predicate::str::contains("UNDERLINE")));
}

#[test]
fn detect_lists_detected_links() {
    let file = markup_file("call 555-1234 or visit www.example.com");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("detect").arg(file.path()).arg("--kinds").arg("link,phone");
    cmd.assert().success().stdout(
        predicate::str::contains("-> tel:5551234 (phone)")
            .and(predicate::str::contains("-> http://www.example.com (link)")),
    );
}

#[test]
fn render_emits_ansi_attributes() {
    let file = markup_file("[b]hi[/b]");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("render").arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[1m").and(predicate::str::contains("hi")));
}

#[test]
fn invalid_config_values_fail() {
    let file = markup_file("x");
    let config = config_file("[colors]\nhighlight = \"blue\"\n");
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("--config").arg(config.path()).arg("export").arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("colors.highlight"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("bbtext");
    cmd.arg("export").arg("does-not-exist.bb");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
