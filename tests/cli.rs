//! 命令行参数与退出码

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn flowcut(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flowcut"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run flowcut")
}

fn line_graph() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1 5").unwrap();
    writeln!(file, "2 3").unwrap();
    file
}

#[test]
fn test_missing_arguments_are_usage_errors() {
    let graph = line_graph();
    let path = graph.path().to_str().unwrap();

    for args in [
        vec!["-b", path, "0"],
        vec!["-f", path, "0"],
        vec!["-i", "in.pgm"],
        vec![],
    ] {
        let output = flowcut(&args);
        assert!(!output.status.success(), "accepted {:?}", args);
        assert_eq!(output.status.code(), Some(2), "args {:?}", args);
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_flow_defaults_to_first_and_last_node() {
    let graph = line_graph();
    let output = flowcut(&["-f", graph.path().to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success());
    let flow: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(flow["source"], 0);
    assert_eq!(flow["sink"], 2);
    assert_eq!(flow["value"], 3);
}

#[test]
fn test_flow_with_explicit_endpoints() {
    let graph = line_graph();
    let output = flowcut(&["-f", graph.path().to_str().unwrap(), "0", "1", "--format", "json"]);

    assert!(output.status.success());
    let flow: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(flow["value"], 5);
}

#[test]
fn test_missing_graph_file_fails() {
    let output = flowcut(&["-f", "/nonexistent/flowcut/graph.txt"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
