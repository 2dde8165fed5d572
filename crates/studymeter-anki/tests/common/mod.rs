use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Minimal collection schema with the modern `decks` table
pub fn modern_collection(dir: &Path) -> PathBuf {
    let path = dir.join("collection.anki2");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "
        CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL);
        CREATE TABLE decks (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE cards (id INTEGER PRIMARY KEY, did INTEGER NOT NULL, reps INTEGER NOT NULL);
        CREATE TABLE revlog (id INTEGER PRIMARY KEY, cid INTEGER NOT NULL);
        INSERT INTO col VALUES (1, '{}');
        ",
    )
    .unwrap();
    path
}

/// Schema used before decks moved out of `col`
pub fn legacy_collection(dir: &Path, decks_json: &str) -> PathBuf {
    let path = dir.join("legacy.anki2");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "
        CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL);
        CREATE TABLE cards (id INTEGER PRIMARY KEY, did INTEGER NOT NULL, reps INTEGER NOT NULL);
        CREATE TABLE revlog (id INTEGER PRIMARY KEY, cid INTEGER NOT NULL);
        ",
    )
    .unwrap();
    conn.execute("INSERT INTO col VALUES (1, ?1)", params![decks_json])
        .unwrap();
    path
}

pub fn add_deck(path: &Path, id: i64, native_name: &str) {
    let conn = Connection::open(path).unwrap();
    conn.execute("INSERT INTO decks VALUES (?1, ?2)", params![id, native_name])
        .unwrap();
}

pub fn add_card(path: &Path, id: i64, did: i64, reps: u32) {
    let conn = Connection::open(path).unwrap();
    conn.execute("INSERT INTO cards VALUES (?1, ?2, ?3)", params![id, did, reps])
        .unwrap();
}

pub fn add_review(path: &Path, timestamp_ms: i64) {
    let conn = Connection::open(path).unwrap();
    conn.execute("INSERT INTO revlog VALUES (?1, 1)", params![timestamp_ms])
        .unwrap();
}
