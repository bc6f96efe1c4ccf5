use splunk_orm::transport::Method;
use splunk_orm::{MemoryTransport, Service};
use std::sync::Arc;

pub const ATOM_OPEN: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">"#;

/// One Atom entry at `path` with the given `<s:key>` children.
pub fn entry(title: &str, path: &str, keys: &str) -> String {
    format!(
        r#"<entry><title>{title}</title><id>https://localhost:8089{path}</id>
<link href="{path}" rel="alternate"/><link href="{path}" rel="edit"/>
<content type="text/xml"><s:dict>{keys}</s:dict></content></entry>"#
    )
}

pub fn key(name: &str, value: &str) -> String {
    format!(r#"<s:key name="{name}">{value}</s:key>"#)
}

pub fn acl(owner: &str, app: &str, sharing: &str) -> String {
    format!(
        r#"<s:key name="eai:acl"><s:dict>{}{}{}</s:dict></s:key>"#,
        key("owner", owner),
        key("app", app),
        key("sharing", sharing)
    )
}

pub fn feed(entries: &[String]) -> String {
    format!(
        "{ATOM_OPEN}<opensearch:totalResults>{}</opensearch:totalResults>{}</feed>",
        entries.len(),
        entries.concat()
    )
}

/// A service over a fresh memory transport.
pub fn service() -> (Arc<MemoryTransport>, Service) {
    let transport = Arc::new(MemoryTransport::new());
    let service = Service::new(transport.clone());
    (transport, service)
}

pub fn posts(transport: &MemoryTransport) -> Vec<splunk_orm::transport::RecordedCall> {
    transport
        .calls()
        .into_iter()
        .filter(|call| call.method == Method::Post)
        .collect()
}
