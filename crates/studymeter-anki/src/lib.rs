//! Read-only access to an Anki collection database

mod collection;
mod error;
mod locator;

pub use collection::{Collection, DeckInfo};
pub use error::{CollectionError, Result};
pub use locator::{CollectionLocator, COLLECTION_ENV, DEFAULT_PROFILE};
