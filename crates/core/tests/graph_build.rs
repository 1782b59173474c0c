use notegraph_core::markdown_ast::LinkKind;
use notegraph_core::{DepthLimit, GraphBuilder, NoteError, build_graph};
use rstest::rstest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_note(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// root/top.md, root/one/mid.md, root/one/two/deep.md
fn create_nested_notes() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write_note(root, "top.md", "# Top\n\n[[mid]]");
    write_note(root, "one/mid.md", "# Mid\n\n[[deep]]");
    write_note(root, "one/two/deep.md", "# Deep");

    dir
}

#[tokio::test]
async fn builds_two_linked_notes() {
    let dir = TempDir::new().unwrap();
    let a = write_note(dir.path(), "a.md", "# Alpha\n\nSee [b](b.md).");
    let b = write_note(dir.path(), "b.md", "# Beta");

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    assert_eq!(graph.len(), 2);

    let alpha = graph.get(&a).unwrap();
    assert_eq!(alpha.title(), "Alpha");
    assert_eq!(alpha.links().len(), 1);
    assert_eq!(alpha.links()[0].target, "b.md");
    assert_eq!(alpha.links()[0].kind, LinkKind::Markdown);
    assert_eq!(alpha.raw_text(), "# Alpha\n\nSee [b](b.md).");

    let beta = graph.get(&b).unwrap();
    assert_eq!(beta.title(), "Beta");
    assert!(beta.links().is_empty());
}

#[tokio::test]
async fn skips_hidden_and_non_markdown_files() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "notes.txt", "# Not markdown");
    write_note(dir.path(), ".hidden.md", "# Hidden");

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    assert!(graph.is_empty());
}

#[tokio::test]
async fn keys_are_joined_from_the_root() {
    let vault = create_nested_notes();
    let root = vault.path();

    let graph = GraphBuilder::new(root).build().await.unwrap();

    assert_eq!(
        graph.paths(),
        vec![
            root.join("one").join("mid.md").as_path(),
            root.join("one").join("two").join("deep.md").as_path(),
            root.join("top.md").as_path(),
        ]
    );
}

#[rstest]
#[case::root_only(DepthLimit::Limited(0), &["top.md"])]
#[case::one_level(DepthLimit::Limited(1), &["one/mid.md", "top.md"])]
#[case::two_levels(DepthLimit::Limited(2), &["one/mid.md", "one/two/deep.md", "top.md"])]
#[case::unbounded(DepthLimit::Unbounded, &["one/mid.md", "one/two/deep.md", "top.md"])]
#[tokio::test]
async fn depth_limit_bounds_the_walk(#[case] limit: DepthLimit, #[case] expected: &[&str]) {
    let vault = create_nested_notes();
    let root = vault.path();

    let graph = build_graph(root, limit).await.unwrap();

    let expected: Vec<PathBuf> = expected.iter().map(|p| root.join(p)).collect();
    let actual: Vec<PathBuf> = graph.paths().into_iter().map(Path::to_path_buf).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn notes_beyond_depth_are_never_loaded() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "ok.md", "# Ok");
    write_note(dir.path(), "sub/broken.md", "no title here");

    let graph = build_graph(dir.path(), DepthLimit::Limited(0)).await.unwrap();
    assert_eq!(graph.len(), 1);

    let err = build_graph(dir.path(), DepthLimit::Limited(1)).await.unwrap_err();
    assert!(matches!(err, NoteError::MissingTitle { .. }));
}

#[tokio::test]
async fn missing_title_fails_the_whole_build() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "good.md", "# Good");
    write_note(dir.path(), "also-good.md", "# Also good\n\n[[good]]");
    let bad = write_note(dir.path(), "bad.md", "## Only a subheading\n\nbody");

    let err = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap_err();

    match err {
        NoteError::MissingTitle { ref path } => assert_eq!(path, &bad),
        other => panic!("expected MissingTitle, got {other:?}"),
    }
    assert!(err.to_string().contains("bad.md"));
}

#[tokio::test]
async fn missing_title_in_subdirectory_fails_the_build() {
    let vault = create_nested_notes();
    let bad = write_note(vault.path(), "one/two/untitled.md", "plain text");

    let err = build_graph(vault.path(), DepthLimit::Unbounded).await.unwrap_err();

    assert_eq!(err.path(), bad.as_path());
}

#[tokio::test]
async fn invalid_utf8_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.md");
    fs::write(&path, [0x23, 0x20, 0xff, 0xfe, 0x0a]).unwrap();

    let err = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap_err();

    match err {
        NoteError::Io { path: ref failed, ref source } => {
            assert_eq!(failed, &path);
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_root_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = build_graph(&missing, DepthLimit::Unbounded).await.unwrap_err();

    match err {
        NoteError::Io { ref path, ref source } => {
            assert_eq!(path, &missing);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[tokio::test]
async fn directories_are_walked_regardless_of_name() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), ".archive/old.md", "# Old");
    write_note(dir.path(), "notes.md/inner.md", "# Inner");

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    assert_eq!(graph.len(), 2);
    assert!(graph.contains(dir.path().join(".archive/old.md")));
    assert!(graph.contains(dir.path().join("notes.md/inner.md")));
}

#[cfg(unix)]
#[tokio::test]
async fn symlinks_are_skipped() {
    let dir = TempDir::new().unwrap();
    let target = write_note(dir.path(), "real/target.md", "# Target");
    std::os::unix::fs::symlink(&target, dir.path().join("alias.md")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linked-dir"))
        .unwrap();

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    assert_eq!(graph.paths(), vec![target.as_path()]);
}

#[tokio::test]
async fn building_twice_yields_identical_graphs() {
    let vault = create_nested_notes();
    for i in 0..20 {
        let content = format!("# N{i}\n\n[[top]] [[n{}]]", i + 1);
        write_note(vault.path(), &format!("one/n{i}.md"), &content);
    }

    let first = build_graph(vault.path(), DepthLimit::Unbounded).await.unwrap();
    let second = build_graph(vault.path(), DepthLimit::Unbounded).await.unwrap();

    assert_eq!(first.len(), 23);
    assert_eq!(first, second);
}

#[tokio::test]
async fn links_follow_document_order() {
    let dir = TempDir::new().unwrap();
    let content = "# Order\n\n[[c]] then [a](a.md)\n\n- [[b]]\n";
    let path = write_note(dir.path(), "order.md", content);

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    let targets: Vec<_> =
        graph.get(&path).unwrap().links().iter().map(|l| l.target.as_str()).collect();
    assert_eq!(targets, vec!["c", "a.md", "b"]);
}

#[tokio::test]
async fn deeply_nested_note_builds() {
    let dir = TempDir::new().unwrap();
    let depth = 50_000;
    let deep = write_note(
        dir.path(),
        "deep.md",
        &format!("# Title\n\n{}[[inner]]", "> ".repeat(depth)),
    );
    write_note(dir.path(), "flat.md", "# Flat");

    let graph = build_graph(dir.path(), DepthLimit::Unbounded).await.unwrap();

    assert_eq!(graph.len(), 2);
    let note = graph.get(&deep).unwrap();
    assert_eq!(note.title(), "Title");
    assert_eq!(note.links()[0].target, "inner");
    assert!(note.syntax_tree().len() > depth);
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_subdirectory_fails_the_build() {
    use std::os::unix::fs::PermissionsExt;

    let vault = create_nested_notes();
    let locked = vault.path().join("one").join("two");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list it anyway; nothing to check then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = build_graph(vault.path(), DepthLimit::Unbounded).await;
    // Depth 2 is beyond the limit, so the locked directory is never listed.
    let shallow = build_graph(vault.path(), DepthLimit::Limited(1)).await;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match result.unwrap_err() {
        NoteError::Io { ref path, ref source } => {
            assert_eq!(path, &locked);
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert_eq!(shallow.unwrap().len(), 2);
}
