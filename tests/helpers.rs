//! Integration tests for the build helpers
//!
//! These tests drive the public API against a scratch directory and the
//! system `sh`/`find`.

use build_utils::{
    Args, CopySpec, Encoding, Error, ExecOptions, FileItem, FormatOptions, Rewritten, ShellCmd,
    args, clean, copy, copy_json, exec, modify, rm,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

/// Create a scratch tree:
///
/// ```text
/// root/a.log
/// root/keep.txt
/// root/sub/b.log
/// root/sub/deeper/c.log
/// root/logs.log/        (directory matching the pattern)
/// ```
fn create_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("sub/deeper")).unwrap();
    std::fs::create_dir_all(root.join("logs.log")).unwrap();
    std::fs::write(root.join("a.log"), "a").unwrap();
    std::fs::write(root.join("keep.txt"), "k").unwrap();
    std::fs::write(root.join("sub/b.log"), "b").unwrap();
    std::fs::write(root.join("sub/deeper/c.log"), "c").unwrap();
    dir
}

// =============================================================================
// Command Runner
// =============================================================================

#[tokio::test]
async fn test_exec_stdout_and_args() {
    let flags = Args::new().set("-n", true).set("--ignored", false);
    let cmd = format!("echo {} hi", args(&flags, &FormatOptions::default()));
    assert_eq!(cmd, "echo -n hi");

    let out = exec(&cmd, &ExecOptions::default()).await.unwrap();
    assert_eq!(out, "hi");
}

#[tokio::test]
async fn test_exec_missing_command_reports_stderr() {
    let err = exec("definitely-not-a-real-command-xyz", &ExecOptions::default())
        .await
        .unwrap_err();
    let stderr = err.stderr().expect("should carry stderr");
    assert!(!stderr.is_empty());
}

// =============================================================================
// Directory Cleaner
// =============================================================================

#[tokio::test]
async fn test_clean_respects_depth() {
    let dir = create_tree();
    let root = dir.path();

    clean(root, "*.log", Some(2), &ExecOptions::default())
        .await
        .unwrap();

    assert!(!root.join("a.log").exists());
    assert!(!root.join("sub/b.log").exists());
    assert!(root.join("sub/deeper/c.log").exists());
    assert!(root.join("keep.txt").exists());
    assert!(root.join("logs.log").is_dir());
}

#[tokio::test]
async fn test_clean_default_depth_is_top_level_only() {
    let dir = create_tree();
    let root = dir.path();

    clean(root, "*.log", None, &ExecOptions::default())
        .await
        .unwrap();

    assert!(!root.join("a.log").exists());
    assert!(root.join("sub/b.log").exists());
}

#[tokio::test]
async fn test_clean_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let err = clean(dir.path().join("missing"), "*", None, &ExecOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CommandFailed { .. }));
    assert!(err.stderr().unwrap().contains("missing"));
}

// =============================================================================
// Remover
// =============================================================================

#[tokio::test]
async fn test_rm_twice_is_ok() {
    let dir = create_tree();
    let sub = dir.path().join("sub");

    rm(&sub).await.unwrap();
    assert!(!sub.exists());
    rm(&sub).await.unwrap();
}

// =============================================================================
// Copier
// =============================================================================

#[tokio::test]
async fn test_copy_list_creates_all_targets() {
    let dir = create_tree();
    let root = dir.path();
    let dest = root.join("dist");

    copy(
        vec![
            CopySpec::from(root.join("keep.txt")),
            CopySpec::from((root.join("sub/b.log"), Path::new("nested/x/b.log"))),
            CopySpec::from((root.join("sub/deeper/c.log"), Path::new("c.txt"))),
        ],
        &dest,
    )
    .await
    .unwrap();

    assert_eq!(std::fs::read(dest.join("keep.txt")).unwrap(), b"k");
    assert_eq!(std::fs::read(dest.join("nested/x/b.log")).unwrap(), b"b");
    assert_eq!(std::fs::read(dest.join("c.txt")).unwrap(), b"c");
}

#[tokio::test]
async fn test_copy_batch_fails_when_one_source_is_missing() {
    let dir = create_tree();
    let root = dir.path();
    let missing = root.join("nope.txt");

    let err = copy(
        vec![CopySpec::from(root.join("keep.txt")), CopySpec::from(missing.clone())],
        root.join("dist"),
    )
    .await
    .unwrap_err();

    match err {
        Error::Copy { src, .. } => assert_eq!(src, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_shell_cmd_output_all_dry_run() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("marker");

    let out = ShellCmd::new(format!("touch '{}'", marker.display()))
        .dry_run(true)
        .output_all()
        .await
        .unwrap();

    assert!(out.success);
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_copy_binary_content_exact() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("blob.bin");
    let bytes: Vec<u8> = (0..=255).collect();
    std::fs::write(&src, &bytes).unwrap();

    copy([src.as_path()], dir.path().join("out")).await.unwrap();

    assert_eq!(std::fs::read(dir.path().join("out/blob.bin")).unwrap(), bytes);
}

#[tokio::test]
async fn test_copy_json_invalid_entry_copies_nothing() {
    let dir = create_tree();
    let root = dir.path();
    let dest = root.join("dist");
    let specs = json!([
        root.join("keep.txt").to_string_lossy(),
        {"src": root.join("a.log").to_string_lossy(), "dst": "a.log"},
        true,
    ]);

    let err = copy_json(&specs, &dest).await.unwrap_err();

    assert!(matches!(err, Error::InvalidCopySpec { index: 2, .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_copy_json_single_object() {
    let dir = create_tree();
    let root = dir.path();
    let dest = root.join("dist");
    let spec = json!({"src": root.join("a.log").to_string_lossy(), "dst": "logs/a.log"});

    copy_json(&spec, &dest).await.unwrap();

    assert_eq!(std::fs::read_to_string(dest.join("logs/a.log")).unwrap(), "a");
}

// =============================================================================
// Content Transform
// =============================================================================

#[tokio::test]
async fn test_modify_pipeline() {
    let version = "1.2.0".to_string();
    let stage = modify(move |text, _| {
        let version = version.clone();
        if text.contains("@ASYNC@") {
            Rewritten::pending(async move { Ok(text.replace("@ASYNC@", &version)) })
        } else {
            text.replace("@VERSION@", &version).into()
        }
    });
    let items = vec![
        FileItem::new("a.txt", "v@VERSION@"),
        FileItem::new("b.txt", "v@ASYNC@"),
        FileItem::new("c.txt", vec![0x40, 0x56]).with_encoding(Encoding::Latin1),
    ];

    let out: Vec<FileItem> = stage
        .apply(stream::iter(items))
        .try_collect()
        .await
        .unwrap();

    let paths: Vec<_> = out.iter().map(|i| i.path.to_string_lossy().into_owned()).collect();
    assert_eq!(paths, ["a.txt", "b.txt", "c.txt"]);
    assert_eq!(out[0].text(), "v1.2.0");
    assert_eq!(out[1].text(), "v1.2.0");
    assert_eq!(out[2].contents, b"@V");
    assert_eq!(out[2].encoding, Encoding::Latin1);
}

#[tokio::test]
async fn test_modify_reports_each_failure() {
    let stage = modify(|_, _| Rewritten::pending(async { anyhow::bail!("nope") }));
    let items = vec![FileItem::new("a", "1"), FileItem::new("b", "2")];

    let out: Vec<_> = stage.apply(stream::iter(items)).collect().await;

    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|r| matches!(r, Err(Error::Rewrite { .. }))));
}
