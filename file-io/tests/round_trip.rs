use approx::assert_relative_eq;
use assert_cmd::Command;
use file_io::{Document, FileFormat, SomeData, Storage};
use predicates::prelude::*;
use std::f64::consts::PI;

fn round_trip(name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let written = file_io::write_some_stuff(&path).unwrap();
    assert_eq!(Storage::read(&path).unwrap(), written, "{}", name);
    let back = file_io::read_some_stuff(&path).unwrap();
    assert_eq!(back.some_integer, 100);
    assert_relative_eq!(back.some_data.a_double, PI);
    assert_eq!(back.some_data.a_string, "mydata1234");
    assert_eq!(back.no_thing, SomeData::default());
    assert_eq!(
        back.uchar_eye.to_matrix().unwrap(),
        nalgebra::DMatrix::<u8>::identity(3, 3)
    );
}

#[test]
fn yaml_round_trip() {
    round_trip("somedata.yaml");
}

#[test]
fn json_round_trip() {
    round_trip("somedata.json");
}

#[test]
fn gzipped_round_trips() {
    round_trip("somedata.yaml.gz");
    round_trip("somedata.json.gz");
    round_trip("somedata.gz");
}

#[test]
fn gzipped_file_is_compressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("somedata.gz");
    file_io::write_some_stuff(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    assert!(FileFormat::from_path(&path).unwrap().compressed);
}

#[test]
fn yaml_file_is_readable_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("somedata.yaml");
    file_io::write_some_stuff(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("someInteger: 100"));
    assert!(text.contains("aString: mydata1234"));
}

#[test]
fn string_to_int_map_keeps_written_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = Storage::sample();
    storage.string_to_int_map = [("Two", 2), ("One", 1), ("Three", 3)]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.into()))
        .collect();
    for name in ["unsorted.yaml", "unsorted.json"] {
        let path = dir.path().join(name);
        storage.write(&path).unwrap();
        let back = Storage::read(&path).unwrap();
        let keys: Vec<_> = back.string_to_int_map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Two", "One", "Three"], "{}", name);
        let read = Document::load(&path).unwrap().read_back().unwrap();
        assert_eq!(
            read.string_to_int_map,
            [
                ("Two".to_owned(), 2),
                ("One".to_owned(), 1),
                ("Three".to_owned(), 3)
            ]
        );
    }
}

#[test]
fn verify_reports_a_changed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("somedata.json");
    let written = file_io::write_some_stuff(&path).unwrap();
    assert_eq!(
        file_io::verify_some_stuff(&path, &written).unwrap().some_integer,
        100
    );

    let mut changed = written.clone();
    changed.some_integer = 101;
    changed.write(&path).unwrap();
    assert!(matches!(
        file_io::verify_some_stuff(&path, &written),
        Err(file_io::Error::Mismatch(_))
    ));
}

#[test]
fn missing_file_fails_to_open() {
    let err = Document::load("/nonexistent/somedata.yaml").unwrap_err();
    assert!(err.to_string().starts_with("Failed to open"));
}

#[test]
fn cli_round_trip_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("somedata.json.gz");
    Command::cargo_bin("file-io")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("someInteger = 100")
                .and(predicate::str::contains("stringToIntMap = { \"One\" 1, \"Two\" 2 }"))
                .and(predicate::str::contains("Tip: Open")),
        );
    assert_eq!(Storage::read(&path).unwrap(), Storage::sample());
}

#[test]
fn cli_without_arguments_prints_usage() {
    Command::cargo_bin("file-io")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("<file><ext>")));
}

#[test]
fn cli_rejects_xml() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("file-io")
        .unwrap()
        .arg(dir.path().join("somedata.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("XML is not supported"));
}

#[test]
fn cli_unwritable_path_fails() {
    Command::cargo_bin("file-io")
        .unwrap()
        .arg("/nonexistent/dir/somedata.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open"));
}
