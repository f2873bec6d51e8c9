use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("fixtures").join("svg").join(name)
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("svgnode-cli"))
}

#[test]
fn render_matches_golden() {
    let golden = fs::read_to_string(fixture("regions.golden.svg")).expect("read golden");
    let output = cli()
        .arg(fixture("regions.svg"))
        .output()
        .expect("run svgnode-cli");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), golden);
}

#[test]
fn rescale_and_recolor_write_to_out_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");

    cli()
        .args([
            "recolor",
            "--factor",
            "0.5",
            "--fill",
            "north=#00AA00",
            "--fill",
            "south=#0000FF",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("regions.svg").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&out).expect("read output");
    assert!(text.contains("width=\"148.50000mm\""), "{text}");
    assert!(text.contains("style=\"fill:#00aa00;"), "{text}");
    assert!(text.contains("style=\"fill:#0000ff;"), "{text}");
}

#[test]
fn reads_stdin_and_respects_root() {
    let input = fs::read_to_string(fixture("regions.svg")).unwrap();
    cli()
        .args(["outline", "--root", "text", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("text -> label-north \ntspan -> tspan-north \n#text -> North \ntspan -> tspan-coast \n#text -> coast line \n");
}

#[test]
fn outline_json_nests_children() {
    let output = cli()
        .args(["outline", "--json"])
        .arg(fixture("regions.svg"))
        .output()
        .expect("run svgnode-cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["tag"], "svg");
    assert_eq!(value["id"], "svg8");
    assert_eq!(value["children"][0]["children"][0]["id"], "north");
    assert_eq!(value["children"][1]["children"][0]["children"][0]["children"][0]["text"], "North");
}

#[test]
fn outline_json_honors_out_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("outline.json");
    cli()
        .args(["outline", "--json", "--out", out.to_string_lossy().as_ref()])
        .arg(fixture("regions.svg"))
        .assert()
        .success()
        .stdout("");

    let text = fs::read_to_string(&out).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["id"], "svg8");
}

#[test]
fn json_outside_outline_is_a_usage_error() {
    cli()
        .args(["render", "--json"])
        .arg(fixture("regions.svg"))
        .assert()
        .code(2);
}

#[test]
fn unknown_path_exits_with_3() {
    cli()
        .args(["recolor", "--fill", "reef=#123456"])
        .arg(fixture("regions.svg"))
        .assert()
        .code(3);
}

#[test]
fn unsupported_element_exits_with_1() {
    cli().arg(fixture("unsupported_rect.svg")).assert().code(1);
}

#[test]
fn usage_errors_exit_with_2() {
    cli().args(["rescale"]).assert().code(2);
    cli().args(["--help"]).assert().code(2);
}
