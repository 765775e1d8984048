//! End-to-end walkthrough of the inikit API.
//!
//! Builds a document through every mutation surface, writes it to an
//! in-memory backend, reopens the backend for input, and reads it back.
//!
//! Run with: cargo run --example end_to_end

use inikit_doc::{Direction, Document};
use inikit_io::MemoryLineIo;

fn main() {
    let mut handler = MemoryLineIo::with_capacity(32, Direction::Output);

    {
        let mut doc = Document::new();

        // Scoped assignment through the group cursor.
        doc.begin_group("MyGroup");
        doc.set("Some", "Forge");
        doc.set("Other", "pfff");
        doc.end_group();

        // Single dotted assignment under global scope.
        doc.set("AnotherGroup.Value1", "33");

        // Direct access to a group's value map.
        doc.group_mut("AnotherGroup")
            .insert("Value2".to_owned(), "36".to_owned());

        // Batch seeding across several groups.
        doc.add([("first.val1", "42"), ("second.val2", "33.12")]);

        doc.write_to(&mut handler).expect("write to memory backend");
    }

    println!("rendered lines:");
    for line in handler.lines() {
        println!("  {line}");
    }

    // Same buffer, now as a line source.
    handler.reopen(Direction::Input);
    let mut doc = Document::new();
    doc.read_from(&mut handler).expect("read back");

    assert_eq!(doc.value("AnotherGroup.Value1"), Some("33"));
    assert!(doc.contains("AnotherGroup"));
    assert!(!doc.contains("NonExisting"));

    doc.begin_group("first");
    assert_eq!(doc.value("val1"), Some("42"));
    doc.end_group();

    println!("\ngroups after round-trip: {:?}", doc.group_names());
}
