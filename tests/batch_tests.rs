mod common;

use std::fs;
use std::path::Path;

use common::*;
use jast::ast::SourceId;
use jast::batch::{collect_java_files, parse_files, BatchSummary, FileOutcome};
use jast::{Config, Error, LanguageLevel};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, contents).expect("write source");
}

#[test]
fn test_collect_java_files_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "b/B.java", "class B {}");
    write(dir.path(), "a/A.java", "class A {}");
    write(dir.path(), "a/notes.txt", "not java");
    write(dir.path(), "Z.java", "class Z {}");

    let files = collect_java_files(dir.path()).expect("walk");
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).expect("under root").to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["Z.java", "a/A.java", "b/B.java"]);

    let single = collect_java_files(&dir.path().join("Z.java")).expect("single file");
    assert_eq!(single, vec![dir.path().join("Z.java")]);
}

#[test]
fn test_parse_files_keeps_order_and_isolates_failures() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "A.java", "class A { void f() {} }");
    write(dir.path(), "Broken.java", "class Broken { void f( }");
    write(dir.path(), "C.java", "record C(int x) {}");

    let paths = vec![dir.path().join("A.java"), dir.path().join("Broken.java"), dir.path().join("C.java")];
    let results = parse_files(&paths, Config::default());
    assert_eq!(results.len(), 3);
    for (result, path) in results.iter().zip(&paths) {
        assert_eq!(&result.path, path);
    }
    assert!(results[0].is_parsed());
    assert!(!results[1].is_parsed());
    assert!(results[2].is_parsed());

    match &results[1].outcome {
        FileOutcome::Unparseable(err @ Error::ParseFile { .. }) => {
            assert!(err.as_parse_error().is_some_and(|e| e.is_illegal_token()));
            assert!(err.to_string().contains("Broken.java"));
        }
        other => panic!("expected a parse failure, got {:?}", other),
    }

    let unit = results[0].unit().expect("parsed unit");
    assert_eq!(unit.source, SourceId::from_path(&paths[0]));

    assert_eq!(BatchSummary::of(&results), BatchSummary { parsed: 2, unparseable: 1 });
    assert_eq!(BatchSummary::of(&results).total(), 3);
}

#[test]
fn test_parse_files_honours_language_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "R.java", "record R(int x) {}");
    let files = collect_java_files(dir.path()).expect("walk");

    let results = parse_files(&files, Config::new(LanguageLevel::Java11));
    let err = results[0].error().expect("records rejected at Java 11");
    assert!(err.as_parse_error().is_some_and(|e| e.is_grammar_violation()));
}

#[test]
fn test_empty_batch() {
    let results = parse_files::<&Path>(&[], Config::default());
    assert!(results.is_empty());
    assert_eq!(BatchSummary::of(&results).total(), 0);
}
