//! Status badges embedded as image-link lines in a Markdown document.
//!
//! The document holds at most one slot per [`BadgeKind`]. A slot is located
//! by pattern (so older label spellings are still recognized) and then
//! addressed by line index and byte span, which keeps `upsert` a plain
//! line-vector edit.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const BADGE_HOST: &str = "img.shields.io";

static VOCABULARY_RE: OnceLock<Regex> = OnceLock::new();
static STREAK_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    Vocabulary,
    Streak,
}

impl BadgeKind {
    pub fn label(&self) -> &'static str {
        match self {
            BadgeKind::Vocabulary => "Anki Chinese Cards",
            BadgeKind::Streak => "Day Streak",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BadgeKind::Vocabulary => "blue",
            BadgeKind::Streak => "orange",
        }
    }

    /// Label spellings accepted in existing badge URLs besides the current one
    fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            BadgeKind::Vocabulary => &["词汇"],
            BadgeKind::Streak => &[],
        }
    }

    /// Kind whose line a fresh badge of this kind is inserted after.
    /// `None` means the badge goes near the top of the document.
    fn anchor(&self) -> Option<BadgeKind> {
        match self {
            BadgeKind::Vocabulary => None,
            BadgeKind::Streak => Some(BadgeKind::Vocabulary),
        }
    }

    fn pattern(&self) -> &'static Regex {
        let cell = match self {
            BadgeKind::Vocabulary => &VOCABULARY_RE,
            BadgeKind::Streak => &STREAK_RE,
        };
        cell.get_or_init(|| Regex::new(&self.pattern_source()).unwrap())
    }

    fn pattern_source(&self) -> String {
        let labels: Vec<String> = std::iter::once(urlencoding::encode(self.label()).into_owned())
            .chain(self.legacy_labels().iter().map(|l| l.to_string()))
            .map(|l| regex::escape(&l))
            .collect();
        // The vocabulary badge has carried other alt texts over time.
        let alt = match self {
            BadgeKind::Vocabulary => r"[^\]\n]*".to_string(),
            BadgeKind::Streak => regex::escape(self.label()),
        };
        format!(
            r"!\[{}\]\(https://{}/badge/(?:{})-\d+-{}\)",
            alt,
            regex::escape(BADGE_HOST),
            labels.join("|"),
            self.color()
        )
    }
}

/// A badge kind paired with the value it displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub value: u64,
}

impl Badge {
    pub fn new(kind: BadgeKind, value: u64) -> Self {
        Self { kind, value }
    }

    pub fn url(&self) -> String {
        format!(
            "https://{}/badge/{}-{}-{}",
            BADGE_HOST,
            urlencoding::encode(self.kind.label()),
            self.value,
            self.kind.color()
        )
    }

    pub fn markdown(&self) -> String {
        format!("![{}]({})", self.kind.label(), self.url())
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markdown())
    }
}

/// Result of [`BadgeDocument::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced,
    Inserted,
    /// No slot and no insertion point; the document is unchanged
    Omitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    line: usize,
    start: usize,
    end: usize,
}

/// A text document viewed as lines with addressable badge slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDocument {
    lines: Vec<String>,
    /// Lines carry a trailing `\r` (CRLF document)
    crlf: bool,
}

impl BadgeDocument {
    pub fn parse(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(String::from).collect();
        let crlf = lines.len() > 1 && lines[0].ends_with('\r');
        Self { lines, crlf }
    }

    /// Insert a line at `at`, terminated like the rest of the document
    fn insert_line(&mut self, at: usize, text: String) {
        if !self.crlf {
            self.lines.insert(at, text);
        } else if at == self.lines.len() {
            // The old last line had no terminator of its own.
            if let Some(last) = self.lines.last_mut() {
                last.push('\r');
            }
            self.lines.push(text);
        } else {
            self.lines.insert(at, format!("{}\r", text));
        }
    }

    /// Line index holding the badge of `kind`, if any
    pub fn line_of(&self, kind: BadgeKind) -> Option<usize> {
        self.slots(kind).first().map(|s| s.line)
    }

    fn slots(&self, kind: BadgeKind) -> Vec<Slot> {
        let re = kind.pattern();
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(line, text)| {
                re.find_iter(text).map(move |m| Slot {
                    line,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }

    /// Replace the badge's slot in place, or insert it when absent
    pub fn upsert(&mut self, badge: &Badge) -> Upsert {
        let slots = self.slots(badge.kind);

        if let Some((first, extra)) = slots.split_first() {
            // Later slots first so earlier byte offsets stay valid.
            for slot in extra.iter().rev() {
                self.lines[slot.line].replace_range(slot.start..slot.end, "");
                if self.lines[slot.line].trim().is_empty() {
                    self.lines.remove(slot.line);
                }
            }
            if !extra.is_empty() {
                tracing::debug!(kind = ?badge.kind, removed = extra.len(), "removed duplicate badges");
            }
            self.lines[first.line].replace_range(first.start..first.end, &badge.markdown());
            return Upsert::Replaced;
        }

        match badge.kind.anchor() {
            None => {
                let at = self.lines.len().min(1);
                self.insert_line(at, String::new());
                self.insert_line(at + 1, badge.markdown());
                Upsert::Inserted
            }
            Some(anchor) => match self.line_of(anchor) {
                Some(line) => {
                    self.insert_line(line + 1, badge.markdown());
                    Upsert::Inserted
                }
                None => {
                    tracing::warn!(
                        kind = ?badge.kind,
                        anchor = ?anchor,
                        "no insertion point for badge, leaving it out"
                    );
                    Upsert::Omitted
                }
            },
        }
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for BadgeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Upsert the vocabulary and streak badges into `text`.
///
/// Applying this to its own output with the same values returns the same text.
pub fn render_badges(text: &str, vocabulary: u64, streak: u64) -> String {
    let mut doc = BadgeDocument::parse(text);
    doc.upsert(&Badge::new(BadgeKind::Vocabulary, vocabulary));
    doc.upsert(&Badge::new(BadgeKind::Streak, streak));
    doc.into_text()
}
