use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use serde::Deserialize;
use studymeter_core::{ActivityEvent, CardRecord};

use crate::error::{CollectionError, Result};

/// Separator Anki stores between deck name components in the `decks` table
const NATIVE_SEPARATOR: char = '\x1f';
const DISPLAY_SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckInfo {
    pub id: i64,
    /// Full name with `::` between levels
    pub name: String,
}

/// Legacy decks were stored as a JSON object in `col.decks`
#[derive(Debug, Deserialize)]
struct LegacyDeck {
    id: i64,
    name: String,
}

/// An open, read-only collection. The connection closes on drop if
/// [`close`](Self::close) is not called.
pub struct Collection {
    conn: Connection,
    path: PathBuf,
}

impl Collection {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path = %path.display(), "opened collection");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn decks(&self) -> Result<Vec<DeckInfo>> {
        if self.has_table("decks")? {
            let mut stmt = self.conn.prepare("SELECT id, name FROM decks ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                let name: String = row.get(1)?;
                Ok(DeckInfo {
                    id: row.get(0)?,
                    name: name.replace(NATIVE_SEPARATOR, DISPLAY_SEPARATOR),
                })
            })?;
            return rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into);
        }

        let json: String = self
            .conn
            .query_row("SELECT decks FROM col LIMIT 1", [], |row| row.get(0))?;
        let legacy: HashMap<String, LegacyDeck> = serde_json::from_str(&json)?;
        let mut decks: Vec<DeckInfo> = legacy
            .into_values()
            .map(|d| DeckInfo {
                id: d.id,
                name: d.name,
            })
            .collect();
        decks.sort_by_key(|d| d.id);
        Ok(decks)
    }

    /// Resolve a deck by its full name, ignoring case like Anki does
    pub fn deck_id(&self, name: &str) -> Result<i64> {
        let wanted = name.to_lowercase();
        self.decks()?
            .into_iter()
            .find(|d| d.name.to_lowercase() == wanted)
            .map(|d| d.id)
            .ok_or_else(|| CollectionError::DeckNotFound(name.to_string()))
    }

    /// The deck's id followed by its descendants when `include_children` is set
    pub fn deck_ids(&self, name: &str, include_children: bool) -> Result<Vec<i64>> {
        let decks = self.decks()?;
        let wanted = name.to_lowercase();
        let root = decks
            .iter()
            .find(|d| d.name.to_lowercase() == wanted)
            .ok_or_else(|| CollectionError::DeckNotFound(name.to_string()))?;

        let mut ids = vec![root.id];
        if include_children {
            let prefix = format!("{}{}", wanted, DISPLAY_SEPARATOR);
            ids.extend(
                decks
                    .iter()
                    .filter(|d| d.name.to_lowercase().starts_with(&prefix))
                    .map(|d| d.id),
            );
        }
        Ok(ids)
    }

    pub fn deck_cards(&self, name: &str, include_children: bool) -> Result<Vec<CardRecord>> {
        let ids = self.deck_ids(name, include_children)?;
        let mut stmt = self
            .conn
            .prepare("SELECT id, reps FROM cards WHERE did = ?1 ORDER BY id")?;

        let mut cards = Vec::new();
        for did in ids {
            let rows = stmt.query_map(params![did], |row| {
                Ok(CardRecord {
                    card_id: row.get(0)?,
                    reps: row.get(1)?,
                })
            })?;
            for card in rows {
                cards.push(card?);
            }
        }
        tracing::debug!(deck = name, cards = cards.len(), "read deck cards");
        Ok(cards)
    }

    /// Every review log entry, newest first
    pub fn review_events(&self) -> Result<Vec<ActivityEvent>> {
        let mut stmt = self.conn.prepare("SELECT id FROM revlog ORDER BY id DESC")?;
        let rows = stmt.query_map([], |row| Ok(ActivityEvent::new(row.get(0)?)))?;
        rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        tracing::debug!(path = %self.path.display(), "closed collection");
        Ok(())
    }

    fn has_table(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
