//! CLI tests for the docview binary

use crate::helpers::{write_documents, CliEnv};

#[test]
fn help_lists_subcommands() {
    let env = CliEnv::new();
    let (stdout, _, code) = env.run(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("preview"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("completions"));
}

#[test]
fn preview_prints_display_references() {
    let env = CliEnv::new();
    write_documents(env.docs.path(), &["cv.pdf", "transcript.pdf"]);
    let dir = env.docs.path().to_string_lossy().to_string();

    let (stdout, stderr, code) = env.run(&["preview", "--dir", &dir, "cv.pdf", "transcript.pdf"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("cv.pdf"));
    assert!(stdout.contains("blob:docview/1#toolbar=0&navpanes=0"));
    assert!(stdout.contains("blob:docview/2#toolbar=0&navpanes=0"));
    assert!(stdout.contains("Cache: 2/20 previews"));
}

#[test]
fn preview_evicts_with_small_capacity() {
    let env = CliEnv::new();
    write_documents(env.docs.path(), &["a.pdf", "b.pdf", "c.pdf"]);
    let dir = env.docs.path().to_string_lossy().to_string();

    let (stdout, stderr, code) = env.run(&[
        "preview", "--dir", &dir, "--capacity", "2", "a.pdf", "b.pdf", "a.pdf", "c.pdf",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Evictions: 1"));
    assert!(stdout.contains("Cached (oldest first): a.pdf, c.pdf"));
}

#[test]
fn preview_reports_missing_document() {
    let env = CliEnv::new();
    let dir = env.docs.path().to_string_lossy().to_string();

    let (stdout, _, code) = env.run(&["preview", "--dir", &dir, "nope.pdf"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("preview unavailable: Document not found"));
}

#[test]
fn preview_json_output_parses() {
    let env = CliEnv::new();
    write_documents(env.docs.path(), &["cv.pdf"]);
    let dir = env.docs.path().to_string_lossy().to_string();

    let (stdout, stderr, code) = env.run(&["preview", "--json", "--dir", &dir, "cv.pdf"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["documents"][0]["status"], "ready");
    assert_eq!(report["documents"][0]["id"], "cv.pdf");
    assert_eq!(report["stats"]["entries"], 1);
    assert_eq!(report["cached"][0], "cv.pdf");
}

#[test]
fn preview_uses_configured_viewer_fragment() {
    let env = CliEnv::new();
    env.write_config("[viewer]\ntoolbar = true\nnavpanes = true\n");
    write_documents(env.docs.path(), &["cv.pdf"]);
    let dir = env.docs.path().to_string_lossy().to_string();

    let (stdout, stderr, code) = env.run(&["preview", "--dir", &dir, "cv.pdf"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("#toolbar=1&navpanes=1"));
}

#[test]
fn invalid_config_fails_preview() {
    let env = CliEnv::new();
    env.write_config("[cache]\nmax_size = 0\n");
    let dir = env.docs.path().to_string_lossy().to_string();

    let (_, stderr, code) = env.run(&["preview", "--dir", &dir, "cv.pdf"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("cache.max_size"));
}

#[test]
fn zero_capacity_flag_is_rejected() {
    let env = CliEnv::new();
    let dir = env.docs.path().to_string_lossy().to_string();

    let (_, stderr, code) = env.run(&["preview", "--dir", &dir, "--capacity", "0", "cv.pdf"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid options"));
}

#[test]
fn config_show_prints_defaults() {
    let env = CliEnv::new();
    let (stdout, _, code) = env.run(&["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("max_size = 20"));
    assert!(stdout.contains("backend = \"memory\""));
}

#[test]
fn config_path_points_into_home() {
    let env = CliEnv::new();
    let (stdout, _, code) = env.run(&["config", "path"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), env.config_path().to_string_lossy());
}

#[test]
fn completions_generate_for_bash() {
    let env = CliEnv::new();
    let (stdout, _, code) = env.run(&["completions", "--shell", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("docview"));
}
