//! Scan behavior against in-memory fake providers.

use std::io;

use applist_scan::{
    scan, EntryOpenError, RawValue, UninstallEntry, UninstallRoot, ValueKind,
};

/// One fake child entry: either readable with a value list, or failing to
/// open.
enum Child {
    Readable(Vec<RawValue>),
    Unreadable,
}

struct FakeRoot {
    children: Vec<(String, Child)>,
    /// When set, the name walk fails after yielding every child name.
    walk_failure: Option<io::ErrorKind>,
}

impl FakeRoot {
    fn new(children: Vec<(String, Child)>) -> Self {
        Self {
            children,
            walk_failure: None,
        }
    }
}

impl UninstallRoot for FakeRoot {
    type Entry = FakeEntry;

    fn entry_names(&self) -> Box<dyn Iterator<Item = io::Result<String>> + '_> {
        let names: Vec<io::Result<String>> = self
            .children
            .iter()
            .map(|(name, _)| Ok(name.clone()))
            .collect();
        let tail: Option<io::Result<String>> =
            self.walk_failure.map(|kind| Err(io::Error::from(kind)));
        Box::new(names.into_iter().chain(tail))
    }

    fn open_entry(&self, name: &str) -> Result<Self::Entry, EntryOpenError> {
        let (_, child) = self
            .children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .expect("scan only opens names it was given");
        match child {
            Child::Readable(values) => Ok(FakeEntry {
                values: values.clone(),
            }),
            Child::Unreadable => Err(EntryOpenError {
                name: name.to_owned(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }),
        }
    }
}

struct FakeEntry {
    values: Vec<RawValue>,
}

impl UninstallEntry for FakeEntry {
    fn values(&self) -> Box<dyn Iterator<Item = RawValue> + '_> {
        Box::new(self.values.iter().cloned())
    }
}

/// A null-terminated plain-string value, the way the registry hands them
/// out.
fn sz(name: &str, text: &str) -> RawValue {
    let mut data = text.as_bytes().to_vec();
    data.push(0);
    RawValue {
        name: name.to_owned(),
        kind: ValueKind::Str,
        data,
    }
}

fn full_entry(name: &str, location: &str) -> Vec<RawValue> {
    vec![
        sz("DisplayName", name),
        sz("DisplayVersion", "1.0"),
        sz("InstallDate", "20210601"),
        sz("InstallLocation", location),
        sz("Publisher", "Acme"),
    ]
}

#[test]
fn complete_entry_yields_a_record_and_partial_ones_are_dropped() {
    let root = FakeRoot::new(vec![
        ("{foo}".to_owned(), Child::Readable(full_entry("Foo", "C:\\Foo"))),
        (
            "{bar}".to_owned(),
            Child::Readable(vec![sz("DisplayName", "Bar")]),
        ),
    ]);

    let records = scan(&root).expect("scan succeeds");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Foo");
    assert_eq!(records[0].version(), "1.0");
    assert_eq!(records[0].publisher(), "Acme");
    assert_eq!(records[0].install_date(), "2021/06/01");
    assert_eq!(records[0].location(), "C:\\Foo");
}

#[test]
fn extra_and_non_string_values_do_not_disturb_assembly() {
    let mut values = full_entry("Foo", "C:\\Foo");
    values.push(sz("UninstallString", "C:\\Foo\\unins.exe"));
    values.push(RawValue {
        name: "EstimatedSize".to_owned(),
        kind: ValueKind::Other,
        data: vec![0x10, 0x27, 0, 0],
    });
    let root = FakeRoot::new(vec![("{foo}".to_owned(), Child::Readable(values))]);

    let records = scan(&root).expect("scan succeeds");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Foo");
}

#[test]
fn unreadable_entry_is_skipped_not_fatal() {
    let root = FakeRoot::new(vec![
        ("{a}".to_owned(), Child::Readable(full_entry("A", "C:\\A"))),
        ("{denied}".to_owned(), Child::Unreadable),
        ("{b}".to_owned(), Child::Readable(full_entry("B", "C:\\B"))),
    ]);

    let records = scan(&root).expect("scan succeeds despite the bad entry");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "A");
    assert_eq!(records[1].name(), "B");
}

#[test]
fn records_keep_store_enumeration_order() {
    let root = FakeRoot::new(vec![
        ("{z}".to_owned(), Child::Readable(full_entry("Zed", "C:\\Z"))),
        ("{a}".to_owned(), Child::Readable(full_entry("Alpha", "C:\\A"))),
        ("{m}".to_owned(), Child::Readable(full_entry("Mid", "C:\\M"))),
    ]);

    let names: Vec<_> = scan(&root)
        .expect("scan succeeds")
        .iter()
        .map(|record| record.name().to_owned())
        .collect();
    assert_eq!(names, ["Zed", "Alpha", "Mid"]);
}

#[test]
fn broken_name_walk_aborts_the_scan() {
    let mut root = FakeRoot::new(vec![(
        "{foo}".to_owned(),
        Child::Readable(full_entry("Foo", "C:\\Foo")),
    )]);
    root.walk_failure = Some(io::ErrorKind::Other);

    let err = scan(&root).expect_err("walk failure is fatal");
    assert!(err.to_string().contains("enumerate"));
}

#[test]
fn one_builder_does_not_leak_fields_between_entries() {
    // First entry supplies everything but a name; second supplies only a
    // name. Neither is complete on its own and neither may borrow the
    // other's fields.
    let mut partial = full_entry("ignored", "C:\\X");
    partial.retain(|value| value.name != "DisplayName");
    let root = FakeRoot::new(vec![
        ("{partial}".to_owned(), Child::Readable(partial)),
        (
            "{name-only}".to_owned(),
            Child::Readable(vec![sz("DisplayName", "Orphan")]),
        ),
    ]);

    let records = scan(&root).expect("scan succeeds");
    assert!(records.is_empty());
}
