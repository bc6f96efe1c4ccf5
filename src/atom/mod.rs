//! Atom Parsing
//!
//! Parses Atom 2005 feeds and entries returned by the REST API into
//! [`AtomFeed`]/[`AtomEntry`] values. Entry content is decoded through the
//! `dict`/`list` grammar into a [`crate::record::Record`].

mod content;
mod dom;
mod feed;
mod messages;

pub use content::{write_record, REST_NS};
pub use feed::{AtomEntry, AtomFeed, ATOM_NS};
pub use messages::error_message;

use crate::error::Result;

/// Parse a feed document (a bare entry root yields a one-entry feed).
pub fn parse_feed(bytes: &[u8]) -> Result<AtomFeed> {
    AtomFeed::parse(bytes)
}

/// Parse an entry document (a feed root yields its first entry).
pub fn parse_entry(bytes: &[u8]) -> Result<AtomEntry> {
    AtomEntry::parse(bytes)
}
