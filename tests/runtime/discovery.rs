//! Input discovery.

use declc_foundation::ErrorKind;
use declc_runtime::{DEFAULT_EXTENSION, discover};

use crate::project;

#[test]
fn mixes_files_and_directories() {
    let dir = project(&[
        ("model/user.decl", ""),
        ("model/deep/order.decl", ""),
        ("model/readme.md", ""),
        ("extra.txt", ""),
    ]);
    let root = dir.path();

    let files = discover(
        &[root.join("model"), root.join("extra.txt")],
        DEFAULT_EXTENSION,
    )
    .unwrap();
    assert_eq!(
        files,
        vec![
            root.join("extra.txt"),
            root.join("model/deep/order.decl"),
            root.join("model/user.decl"),
        ]
    );
}

#[test]
fn overlapping_inputs_are_listed_once() {
    let dir = project(&[("a.decl", ""), ("sub/b.decl", "")]);
    let root = dir.path();

    let files = discover(&[root.to_path_buf(), root.join("sub"), root.join("a.decl")], "decl").unwrap();
    assert_eq!(files, vec![root.join("a.decl"), root.join("sub/b.decl")]);
}

#[test]
fn custom_extension() {
    let dir = project(&[("a.decl", ""), ("b.fpp", "")]);
    let files = discover(&[dir.path()], ".fpp").unwrap();
    assert_eq!(files, vec![dir.path().join("b.fpp")]);
}

#[test]
fn empty_directory_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover(&[dir.path()], "decl").unwrap().is_empty());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = discover(&[&missing], "decl").unwrap_err();
    match err.kind {
        ErrorKind::Io { path, .. } => assert_eq!(path, missing.display().to_string()),
        other => panic!("expected Io, got {other:?}"),
    }
}
