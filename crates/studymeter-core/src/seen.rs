use crate::types::CardRecord;

/// Count cards reviewed at least once
pub fn seen_count<'a>(cards: impl IntoIterator<Item = &'a CardRecord>) -> usize {
    cards.into_iter().filter(|c| c.is_seen()).count()
}
