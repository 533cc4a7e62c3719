//! Integration tests for scanning `.mpdmeta` files from disk
//!
//! Each test writes a real file into a temp directory and checks the exact
//! callback sequence the handler observes.

use chord_core::{TagHandler, TagType};
use chord_decoder::plugins::meta_source::{scan_file, scan_stream, scan_with_diagnostics};
use chord_decoder::Diagnostic;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Every callback, in order
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    TargetUri(String),
    Tag(TagType, String),
    Duration(u64),
    Pair(String, String),
}

#[derive(Default)]
struct CallLog {
    calls: Vec<Call>,
}

impl TagHandler for CallLog {
    fn on_target_uri(&mut self, uri: &str) {
        self.calls.push(Call::TargetUri(uri.to_string()));
    }

    fn on_tag(&mut self, kind: TagType, value: &str) {
        self.calls.push(Call::Tag(kind, value.to_string()));
    }

    fn on_duration(&mut self, duration: Duration) {
        self.calls.push(Call::Duration(duration.as_secs()));
    }

    fn on_pair(&mut self, key: &str, value: &str) {
        self.calls
            .push(Call::Pair(key.to_string(), value.to_string()));
    }
}

fn write_meta(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn scan_path(path: &Path) -> (bool, Vec<Call>) {
    let mut log = CallLog::default();
    let ok = scan_file(path, &mut log);
    (ok, log.calls)
}

#[test]
fn callbacks_follow_input_line_order() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(
        &dir,
        "radio.mpdmeta",
        "title: Foo\ngenre: Bar\nduration: 42\ntarget_uri: http://example/x\n",
    );

    let (ok, calls) = scan_path(&path);
    assert!(ok);
    assert_eq!(
        calls,
        vec![
            Call::Tag(TagType::Title, "Foo".into()),
            Call::Tag(TagType::Genre, "Bar".into()),
            Call::Duration(42),
            Call::TargetUri("http://example/x".into()),
        ]
    );
}

#[test]
fn missing_file_fails_without_callbacks() {
    let dir = TempDir::new().unwrap();
    let (ok, calls) = scan_path(&dir.path().join("nope.mpdmeta"));
    assert!(!ok);
    assert!(calls.is_empty());
}

#[test]
fn directory_is_not_a_readable_source() {
    let dir = TempDir::new().unwrap();
    let (ok, calls) = scan_path(dir.path());
    assert!(!ok);
    assert!(calls.is_empty());
}

#[test]
fn whitespace_and_case_variants_normalize() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(&dir, "v.mpdmeta", "title:   Foo  \nTITLE:Foo\n\tTitle\t:\tFoo\n");

    let (_, calls) = scan_path(&path);
    let expected = Call::Tag(TagType::Title, "Foo".into());
    assert_eq!(calls, vec![expected.clone(), expected.clone(), expected]);
}

#[test]
fn extension_fields_always_use_pairs() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(&dir, "p.mpdmeta", "CATEGORY: talk\nCountry: FR\n");

    let (_, calls) = scan_path(&path);
    assert_eq!(
        calls,
        vec![
            Call::Pair("category".into(), "talk".into()),
            Call::Pair("country".into(), "FR".into()),
        ]
    );
}

#[test]
fn comments_blanks_and_crlf_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(
        &dir,
        "c.mpdmeta",
        "# header\r\n\r\n   \r\n  # indented: comment\r\ngenre: Rock\r\n",
    );

    let (_, calls) = scan_path(&path);
    assert_eq!(calls, vec![Call::Tag(TagType::Genre, "Rock".into())]);
}

#[test]
fn unknown_lines_do_not_stop_the_scan() {
    let mut log = CallLog::default();
    let mut diagnostics = Vec::new();
    scan_with_diagnostics(
        Cursor::new("garbagehere\nalbum: Nope\ntitle: After\n"),
        &mut log,
        |d| diagnostics.push(d),
    );

    assert_eq!(log.calls, vec![Call::Tag(TagType::Title, "After".into())]);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics
        .iter()
        .all(|d| matches!(d, Diagnostic::UnrecognizedLine { .. })));
}

#[test]
fn repeated_tags_are_all_delivered() {
    let mut log = CallLog::default();
    scan_with_diagnostics(
        Cursor::new("genre: Jazz\ngenre: Blues\nduration: 1\nduration: 2\n"),
        &mut log,
        |_| {},
    );

    assert_eq!(
        log.calls,
        vec![
            Call::Tag(TagType::Genre, "Jazz".into()),
            Call::Tag(TagType::Genre, "Blues".into()),
            Call::Duration(1),
            Call::Duration(2),
        ]
    );
}

#[test]
fn truncated_final_line_is_still_parsed() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(&dir, "t.mpdmeta", "title: Foo\ntarget_uri: http://example/y");

    let (_, calls) = scan_path(&path);
    assert_eq!(calls.last(), Some(&Call::TargetUri("http://example/y".into())));
}

#[test]
fn empty_file_succeeds_with_no_callbacks() {
    let dir = TempDir::new().unwrap();
    let path = write_meta(&dir, "e.mpdmeta", "");

    let (ok, calls) = scan_path(&path);
    assert!(ok);
    assert!(calls.is_empty());
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn diagnostics_are_logged_as_structured_fields() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut log = CallLog::default();
        let mut stream = Cursor::new("title: Foo\nartist: Bar\nduration: soon\n");
        assert!(scan_stream(&mut stream, &mut log));
    });

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("WARN"));
    assert!(output.contains("Unrecognized line in meta source file"));
    assert!(output.contains("line_number=2"));
    assert!(output.contains("line=artist: Bar"));
    assert!(output.contains("Invalid duration in meta source file"));
    assert!(output.contains("line_number=3"));
    assert!(output.contains("value=soon"));
}
