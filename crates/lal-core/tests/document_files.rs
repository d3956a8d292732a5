use lal_core::{Document, Entry, LalError, Record};
use std::fs;

#[test]
fn save_and_open_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logins.lal");

    let mut document = Document::new();
    document.push(Record::comment("// work"));
    document.push(
        Entry::new("user", "pass")
            .with_display_name("display")
            .with_email("email")
            .with_old_password("oldpass")
            .with_invalid(true),
    );
    document.push(Record::entry("other", "pw"));
    document.save(&path).expect("save");

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "// work\n.user:pass (display) {email} [oldpass]\nother:pw\n"
    );

    let reopened = Document::open(&path).expect("open");
    assert_eq!(reopened.len(), document.len());
    for (a, b) in reopened.iter().zip(document.iter()) {
        assert!(a.strict_eq(b));
    }
}

#[test]
fn save_of_empty_document_creates_empty_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.lal");

    Document::new().save(&path).expect("save");
    assert_eq!(fs::read_to_string(&path).expect("read"), "");
}

#[test]
fn unencodable_record_leaves_file_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.lal");

    let document: Document = vec![Record::entry("user", "")].into_iter().collect();
    let err = document.save(&path).expect_err("save should fail");
    assert!(matches!(err, LalError::MissingCredentials));
    assert!(!path.exists());
}

#[test]
fn open_missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.lal");

    match Document::open(&path) {
        Err(LalError::File { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected file error, got {other:?}"),
    }
}

#[test]
fn open_tolerates_malformed_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mixed.lal");
    fs::write(&path, "// note\r\nuser:pass\r\n\r\n???\r\n").expect("write");

    let document = Document::open(&path).expect("open");
    assert_eq!(
        document.records(),
        &[Record::comment("// note"), Record::entry("user", "pass")]
    );
}
