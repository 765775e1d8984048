//! Document behavior tests: read fold, write unfold, cursor scoping,
//! dotted addressing, and the error surface.

use inikit_doc::{DocError, Direction, Document, LineIo};

// ============================================================================
// Test backends
// ============================================================================

/// Line source fed from a fixed script.
struct ScriptSource {
    lines: std::vec::IntoIter<String>,
}

impl ScriptSource {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineIo for ScriptSource {
    fn read_line(&mut self) -> Option<String> {
        self.lines.next()
    }
    fn write_line(&mut self, _line: &str) -> bool {
        false
    }
    fn is_open(&self, direction: Direction) -> bool {
        direction == Direction::Input
    }
    fn close(&mut self) {}
}

/// Line sink collecting output, optionally rejecting after a quota.
struct CollectSink {
    lines: Vec<String>,
    accept: Option<usize>,
}

impl CollectSink {
    fn new() -> Self {
        Self { lines: Vec::new(), accept: None }
    }
    fn rejecting_after(accept: usize) -> Self {
        Self { lines: Vec::new(), accept: Some(accept) }
    }
}

impl LineIo for CollectSink {
    fn read_line(&mut self) -> Option<String> {
        None
    }
    fn write_line(&mut self, line: &str) -> bool {
        if let Some(quota) = self.accept {
            if self.lines.len() >= quota {
                return false;
            }
        }
        self.lines.push(line.to_owned());
        true
    }
    fn is_open(&self, direction: Direction) -> bool {
        direction == Direction::Output
    }
    fn close(&mut self) {}
}

// ============================================================================
// Read fold
// ============================================================================

#[test]
fn read_folds_lines_into_groups() {
    let mut doc = Document::new();
    let mut source = ScriptSource::new(&[
        "; generated",
        "[net]",
        "host=localhost",
        "port=8080",
        "",
        "[app]",
        "name=\"demo app\"",
    ]);
    doc.read_from(&mut source).expect("read");

    assert_eq!(doc.value("net.host"), Some("localhost"));
    assert_eq!(doc.value("net.port"), Some("8080"));
    assert_eq!(doc.value("app.name"), Some("demo app"));
    assert_eq!(doc.group_names(), vec!["app".to_string(), "net".to_string()]);
}

#[test]
fn values_before_first_group_header_are_dropped() {
    let mut doc = Document::new();
    let mut source = ScriptSource::new(&["a=1", "[G]", "b=2"]);
    doc.read_from(&mut source).expect("read");

    assert!(!doc.contains("a"));
    assert!(doc.contains("G.b"));
    assert_eq!(doc.value("G.b"), Some("2"));
    assert_eq!(doc.groups().len(), 1);
}

#[test]
fn reassigned_keys_overwrite_not_duplicate() {
    let mut doc = Document::new();
    let mut source = ScriptSource::new(&["[g]", "k=1", "k=2"]);
    doc.read_from(&mut source).expect("read");

    assert_eq!(doc.value("g.k"), Some("2"));
    assert_eq!(doc["g"].len(), 1);
}

#[test]
fn repeated_group_headers_merge() {
    let mut doc = Document::new();
    let mut source = ScriptSource::new(&["[g]", "a=1", "[h]", "x=9", "[g]", "b=2"]);
    doc.read_from(&mut source).expect("read");

    assert_eq!(doc.value("g.a"), Some("1"));
    assert_eq!(doc.value("g.b"), Some("2"));
    assert_eq!(doc.value("h.x"), Some("9"));
}

#[test]
fn read_replaces_previous_contents() {
    let mut doc = Document::new();
    doc.set("old.key", "v");
    doc.begin_group("old");
    let mut source = ScriptSource::new(&["[new]", "k=1"]);
    doc.read_from(&mut source).expect("read");

    assert!(!doc.contains("old"));
    assert!(doc.contains("new.k"));
    // The cursor is cleared as well.
    assert_eq!(doc.current_group(), "");
}

#[test]
fn unreadable_garbage_yields_empty_document() {
    let mut doc = Document::new();
    let mut source = ScriptSource::new(&["just text", "   ", "k="]);
    doc.read_from(&mut source).expect("read");
    assert!(doc.groups().is_empty());
}

#[test]
fn read_without_bound_source_fails() {
    let mut doc = Document::new();
    assert!(matches!(doc.read(), Err(DocError::NoSource)));
}

// ============================================================================
// Write unfold
// ============================================================================

#[test]
fn write_emits_canonical_order() {
    let mut doc = Document::new();
    doc.add([("b.z", "3"), ("b.a", "2"), ("a.k", "1")]);
    doc.group_mut("empty");

    let mut sink = CollectSink::new();
    doc.write_to(&mut sink).expect("write");
    assert_eq!(
        sink.lines,
        vec!["[a]", "k=1", "[b]", "a=2", "z=3", "[empty]"]
    );
}

#[test]
fn write_resets_cursor_to_global_scope() {
    let mut doc = Document::new();
    doc.set("g.k", "v");
    doc.begin_group("g");
    let mut sink = CollectSink::new();
    doc.write_to(&mut sink).expect("write");
    assert_eq!(doc.current_group(), "");
}

#[test]
fn write_stops_at_first_rejected_line() {
    let mut doc = Document::new();
    doc.add([("g.a", "1"), ("g.b", "2")]);

    let mut sink = CollectSink::rejecting_after(2);
    let err = doc.write_to(&mut sink).expect_err("sink rejects");
    assert!(matches!(err, DocError::SinkRejected { ref line } if line.as_str() == "b=2"));
    // Output accepted before the failure stays written.
    assert_eq!(sink.lines, vec!["[g]", "a=1"]);
}

#[test]
fn write_without_bound_sink_fails() {
    let mut doc = Document::new();
    doc.set_write_on_close(false);
    assert!(matches!(doc.write(), Err(DocError::NoSink)));
}

// ============================================================================
// Cursor scoping and dotted addressing
// ============================================================================

#[test]
fn cursor_scopes_lookups_and_ignores_dots() {
    let mut doc = Document::new();
    doc.add([("first.val1", "42"), ("other.val", "x")]);

    doc.begin_group("first");
    assert!(doc.contains("val1"));
    assert_eq!(doc.value("val1"), Some("42"));
    // Under a cursor, a group name is just a (missing) key.
    assert!(!doc.contains("other"));
    assert!(!doc.contains("other.val"));
    doc.end_group();

    assert!(doc.contains("other"));
    assert!(doc.contains("other.val"));
}

#[test]
fn dotted_key_equals_cursor_scoped_access() {
    let mut doc = Document::new();
    doc.set("G.K", "v");

    let direct = doc.value("G.K").map(str::to_owned);
    doc.begin_group("G");
    let scoped = doc.value("K").map(str::to_owned);
    doc.end_group();
    assert_eq!(direct, scoped);
}

#[test]
fn begin_group_overwrites_without_stacking() {
    let mut doc = Document::new();
    doc.begin_group("outer");
    doc.begin_group("inner");
    assert_eq!(doc.current_group(), "inner");
    doc.end_group();
    assert_eq!(doc.current_group(), "");
}

#[test]
fn stale_cursor_reports_absent() {
    let mut doc = Document::new();
    doc.set("g.k", "v");
    doc.begin_group("g");
    assert!(doc.contains("k"));

    doc.remove_group("g");
    assert!(!doc.contains("k"));
    assert_eq!(doc.value("k"), None);
    assert_eq!(doc.values(), None);
}

#[test]
fn add_uses_dotted_addressing_regardless_of_cursor() {
    let mut doc = Document::new();
    doc.begin_group("somewhere");
    doc.add([("x.y", "1"), ("x.z", "2")]);
    doc.end_group();

    assert_eq!(doc.groups().len(), 1);
    assert_eq!(doc.value("x.y"), Some("1"));
    assert_eq!(doc.value("x.z"), Some("2"));
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn contains_distinguishes_group_and_key_queries() {
    let mut doc = Document::new();
    doc.set("G.k", "v");
    doc.group_mut("empty");

    assert!(doc.contains("G"));
    assert!(doc.contains("G.k"));
    assert!(doc.contains("empty"));
    assert!(!doc.contains("G.missing"));
    assert!(!doc.contains("NoSuchGroup"));
    assert!(!doc.contains("NoSuchGroup.k"));
}

#[test]
fn readonly_lookups_never_create() {
    let doc = Document::new();
    assert_eq!(doc.group("g"), None);
    assert_eq!(doc.value("g.k"), None);
    assert!(doc.groups().is_empty());
}

#[test]
fn group_lookup_rejects_empty_name() {
    let mut doc = Document::new();
    doc.add([(".orphan", "v")]);
    // The empty-named group exists, but the read-only accessor will not
    // hand it out.
    assert!(doc.groups().contains_key(""));
    assert_eq!(doc.group(""), None);
}

#[test]
fn value_mut_creates_group_and_entry() {
    let mut doc = Document::new();
    *doc.value_mut("g.k") = "v".to_owned();
    assert_eq!(doc.value("g.k"), Some("v"));

    doc.begin_group("fresh");
    *doc.value_mut("k2") = "w".to_owned();
    doc.end_group();
    assert_eq!(doc.value("fresh.k2"), Some("w"));
}

#[test]
fn values_accessors_follow_cursor() {
    let mut doc = Document::new();
    doc.add([("g.a", "1"), ("g.b", "2")]);

    assert_eq!(doc.values(), None);
    doc.begin_group("g");
    assert_eq!(doc.values().map(|v| v.len()), Some(2));

    doc.values_mut().insert("c".to_owned(), "3".to_owned());
    assert_eq!(doc.value("c"), Some("3"));
    doc.end_group();
}

#[test]
fn indexing_reads_existing_groups() {
    let mut doc = Document::new();
    doc.group_mut("g").insert("k".to_owned(), "v".to_owned());
    assert_eq!(doc["g"]["k"], "v");
}

#[test]
#[should_panic(expected = "no group named")]
fn indexing_a_missing_group_panics() {
    let doc = Document::new();
    let _ = &doc["missing"];
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn bound_source_feeds_read() {
    let source = ScriptSource::new(&["[g]", "k=v"]);
    let mut doc = Document::with_handler(Box::new(source));
    doc.set_write_on_close(false);

    doc.read().expect("read through bound handler");
    assert_eq!(doc.value("g.k"), Some("v"));

    // The handler stays bound; reading again from the drained source
    // clears the document rather than failing.
    doc.read().expect("second read");
    assert!(doc.groups().is_empty());
}

#[test]
fn with_handler_binds_and_keeps_flush_armed() {
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedSink(Rc<RefCell<Vec<String>>>);
    impl LineIo for SharedSink {
        fn read_line(&mut self) -> Option<String> {
            None
        }
        fn write_line(&mut self, line: &str) -> bool {
            self.0.borrow_mut().push(line.to_owned());
            true
        }
        fn is_open(&self, direction: Direction) -> bool {
            direction == Direction::Output
        }
        fn close(&mut self) {}
    }

    let lines = Rc::new(RefCell::new(Vec::new()));
    {
        let mut doc = Document::with_handler(Box::new(SharedSink(Rc::clone(&lines))));
        doc.set("g.k", "v");
        // Write-on-close stays at its default; dropping the document
        // flushes through the bound handler.
    }
    assert_eq!(*lines.borrow(), vec!["[g]", "k=v"]);
}

#[test]
fn take_handler_unbinds() {
    let source = ScriptSource::new(&["[g]", "k=v"]);
    let mut doc = Document::with_handler(Box::new(source));
    doc.set_write_on_close(false);

    assert!(doc.take_handler().is_some());
    assert!(matches!(doc.read(), Err(DocError::NoSource)));
}
