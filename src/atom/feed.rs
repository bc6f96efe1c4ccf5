//! Atom entries and feeds.

use super::content::parse_content;
use super::dom::{parse_document, XmlNode};
use crate::error::{ApiError, Result};
use crate::record::Record;
use indexmap::IndexMap;
use serde::Serialize;

/// Atom 2005 namespace every accepted document root must be bound to.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Snapshot of one remote object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtomEntry {
    pub title: String,
    pub id: String,
    pub author: Option<String>,
    pub updated: Option<String>,
    pub published: Option<String>,
    /// Relation name to href.
    pub links: IndexMap<String, String>,
    pub content: Record,
}

impl AtomEntry {
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Parse a document whose root is an `entry`, or the first entry of a `feed`.
    pub fn parse(bytes: &[u8]) -> Result<AtomEntry> {
        let root = parse_atom_root(bytes)?;
        match root.local_name() {
            "entry" => parse_entry(&root),
            _ => parse_feed(&root)?
                .entries
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::Format("Atom feed contains no entries".to_string())),
        }
    }
}

/// Ordered entries plus feed-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtomFeed {
    pub title: String,
    pub id: String,
    pub updated: Option<String>,
    pub links: IndexMap<String, String>,
    pub items_per_page: Option<String>,
    pub start_index: Option<String>,
    pub total_results: Option<String>,
    pub entries: Vec<AtomEntry>,
}

impl AtomFeed {
    /// Parse a `feed` document; a bare `entry` root yields a one-entry feed.
    pub fn parse(bytes: &[u8]) -> Result<AtomFeed> {
        let root = parse_atom_root(bytes)?;
        match root.local_name() {
            "feed" => parse_feed(&root),
            _ => Ok(AtomFeed {
                entries: vec![parse_entry(&root)?],
                ..AtomFeed::default()
            }),
        }
    }
}

fn parse_atom_root(bytes: &[u8]) -> Result<XmlNode> {
    let root = parse_document(bytes)?;
    let is_atom = matches!(root.local_name(), "feed" | "entry")
        && root.declared_namespace() == Some(ATOM_NS);
    if !is_atom {
        return Err(ApiError::Format(format!(
            "Unrecognized XML format: root element <{}>",
            root.name
        )));
    }
    Ok(root)
}

fn insert_link(links: &mut IndexMap<String, String>, node: &XmlNode) {
    if let Some(href) = node.attr("href") {
        let rel = node.attr("rel").unwrap_or("alternate");
        links.insert(rel.to_string(), href.to_string());
    }
}

fn author_name(node: &XmlNode) -> Option<String> {
    node.child("name").map(|name| name.text.trim().to_string())
}

fn parse_feed(root: &XmlNode) -> Result<AtomFeed> {
    let mut feed = AtomFeed::default();
    for node in &root.children {
        match node.local_name() {
            "entry" => feed.entries.push(parse_entry(node)?),
            "title" => feed.title = node.text.trim().to_string(),
            "id" => feed.id = node.text.trim().to_string(),
            "updated" => feed.updated = Some(node.text.trim().to_string()),
            "link" => insert_link(&mut feed.links, node),
            "itemsPerPage" => feed.items_per_page = Some(node.text.trim().to_string()),
            "startIndex" => feed.start_index = Some(node.text.trim().to_string()),
            "totalResults" => feed.total_results = Some(node.text.trim().to_string()),
            // Server messages block and generator/author metadata.
            _ => {}
        }
    }
    Ok(feed)
}

fn parse_entry(node: &XmlNode) -> Result<AtomEntry> {
    let mut entry = AtomEntry::default();
    for child in &node.children {
        match child.local_name() {
            "title" => entry.title = child.text.trim().to_string(),
            "id" => entry.id = child.text.trim().to_string(),
            "updated" => entry.updated = Some(child.text.trim().to_string()),
            "published" => entry.published = Some(child.text.trim().to_string()),
            "author" => entry.author = author_name(child),
            "link" => insert_link(&mut entry.links, child),
            "content" => entry.content = parse_content(child)?,
            _ => {}
        }
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title>savedsearches</title>
  <id>https://localhost:8089/services/saved/searches</id>
  <updated>2024-01-02T03:04:05-08:00</updated>
  <link href="/services/saved/searches/_new" rel="create"/>
  <opensearch:totalResults>1</opensearch:totalResults>
  <opensearch:itemsPerPage>30</opensearch:itemsPerPage>
  <opensearch:startIndex>0</opensearch:startIndex>
  <s:messages/>
  <entry>
    <title>Errors in the last hour</title>
    <id>https://localhost:8089/servicesNS/nobody/search/saved/searches/Errors</id>
    <updated>2024-01-02T03:04:05-08:00</updated>
    <published>2024-01-01T00:00:00-08:00</published>
    <link href="/servicesNS/nobody/search/saved/searches/Errors" rel="alternate"/>
    <link href="/servicesNS/nobody/search/saved/searches/Errors/disable" rel="disable"/>
    <author><name>nobody</name></author>
    <content type="text/xml">
      <s:dict>
        <s:key name="count">3</s:key>
      </s:dict>
    </content>
  </entry>
</feed>"#;

    #[test]
    fn parses_feed_metadata_and_entries() {
        let feed = AtomFeed::parse(FEED.as_bytes()).unwrap();
        assert_eq!(feed.title, "savedsearches");
        assert_eq!(feed.total_results.as_deref(), Some("1"));
        assert_eq!(feed.items_per_page.as_deref(), Some("30"));
        assert_eq!(feed.start_index.as_deref(), Some("0"));
        assert_eq!(feed.links.get("create").map(String::as_str), Some("/services/saved/searches/_new"));
        assert_eq!(feed.entries.len(), 1);

        let entry = &feed.entries[0];
        assert_eq!(entry.title, "Errors in the last hour");
        assert_eq!(entry.author.as_deref(), Some("nobody"));
        assert_eq!(entry.published.as_deref(), Some("2024-01-01T00:00:00-08:00"));
        assert_eq!(
            entry.link("alternate"),
            Some("/servicesNS/nobody/search/saved/searches/Errors")
        );
        assert_eq!(entry.content.get_integer("count").unwrap(), 3);
    }

    #[test]
    fn entry_root_is_a_single_entry_feed() {
        let doc = r#"<entry xmlns="http://www.w3.org/2005/Atom"><title>x</title></entry>"#;
        let feed = AtomFeed::parse(doc.as_bytes()).unwrap();
        assert_eq!(feed.entries.len(), 1);
        assert_eq!(AtomEntry::parse(doc.as_bytes()).unwrap().title, "x");
        assert_eq!(AtomEntry::parse(FEED.as_bytes()).unwrap().title, "Errors in the last hour");
    }

    #[test]
    fn rejects_non_atom_roots() {
        let wrong_root = r#"<response><messages/></response>"#;
        assert!(matches!(
            AtomFeed::parse(wrong_root.as_bytes()),
            Err(ApiError::Format(msg)) if msg.contains("Unrecognized XML format")
        ));

        let wrong_ns = r#"<feed xmlns="urn:not-atom"/>"#;
        assert!(AtomFeed::parse(wrong_ns.as_bytes()).is_err());

        let empty_feed = r#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#;
        assert!(AtomFeed::parse(empty_feed.as_bytes()).unwrap().entries.is_empty());
        assert!(AtomEntry::parse(empty_feed.as_bytes()).is_err());
    }

    #[test]
    fn prefixed_atom_root_is_accepted() {
        let doc = r#"<a:feed xmlns:a="http://www.w3.org/2005/Atom"><a:entry><a:title>p</a:title></a:entry></a:feed>"#;
        let feed = AtomFeed::parse(doc.as_bytes()).unwrap();
        assert_eq!(feed.entries[0].title, "p");
    }
}
