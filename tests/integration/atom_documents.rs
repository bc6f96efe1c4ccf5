use splunk_orm::atom::{parse_entry, parse_feed, write_record};
use splunk_orm::{ApiError, Value};

const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title>indexes</title>
  <opensearch:totalResults>1</opensearch:totalResults>
  <opensearch:itemsPerPage>30</opensearch:itemsPerPage>
  <opensearch:startIndex>0</opensearch:startIndex>
  <s:messages/>
  <entry>
    <title>main</title>
    <link href="/services/data/indexes/main" rel="alternate"/>
    <content type="text/xml">
      <s:dict>
        <s:key name="zeta">last</s:key>
        <s:key name="alpha">first &amp; only</s:key>
        <s:key name="empty"></s:key>
        <s:key name="nothing"><s:dict/></s:key>
        <s:key name="roles"><s:list><s:item>admin</s:item><s:item>power</s:item></s:list></s:key>
        <s:key name="eai:attributes"><s:dict>
          <s:key name="optionalFields"><s:list><s:item>maxTotalDataSizeMB</s:item></s:list></s:key>
        </s:dict></s:key>
      </s:dict>
    </content>
  </entry>
</feed>"#;

#[test]
fn nested_content_keeps_order_and_shape() {
    let feed = parse_feed(NESTED.as_bytes()).unwrap();
    assert_eq!(feed.title, "indexes");
    assert_eq!(feed.total_results.as_deref(), Some("1"));
    assert_eq!(feed.items_per_page.as_deref(), Some("30"));

    let content = &feed.entries[0].content;
    let keys: Vec<_> = content.keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "empty", "roles", "eai:attributes"]);
    assert_eq!(content.get_string("alpha").unwrap(), "first & only");
    assert_eq!(content.get_string("empty").unwrap(), "");
    assert!(!content.contains_key("nothing"));
    assert_eq!(content.get_string_array("roles").unwrap(), vec!["admin", "power"]);
    assert!(matches!(
        content.get_record("eai:attributes").and_then(|r| r.get("optionalFields")),
        Some(Value::List(_))
    ));
}

#[test]
fn written_content_parses_back_to_the_same_record() {
    let original = parse_feed(NESTED.as_bytes()).unwrap().entries[0].content.clone();
    let document = format!(
        r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest"><title>main</title><content type="text/xml">{}</content></entry>"#,
        write_record(&original).unwrap()
    );
    let reparsed = parse_entry(document.as_bytes()).unwrap();
    assert_eq!(reparsed.content, original);
}

#[test]
fn record_serializes_as_ordered_json() {
    let content = parse_feed(NESTED.as_bytes()).unwrap().entries[0].content.clone();
    let json = serde_json::to_string(&content).unwrap();
    assert!(json.starts_with(r#"{"zeta":"last","alpha":"first & only""#));
    assert!(json.contains(r#""roles":["admin","power"]"#));
}

#[test]
fn non_atom_documents_are_rejected() {
    let err = parse_feed(b"<response><messages/></response>").unwrap_err();
    assert!(matches!(err, ApiError::Format(ref m) if m.contains("Unrecognized XML format")));

    let wrong_ns = r#"<feed xmlns="urn:not-atom"><entry/></feed>"#;
    assert!(parse_feed(wrong_ns.as_bytes()).is_err());
}

#[test]
fn key_with_two_element_children_is_a_parse_error() {
    let doc = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest"><title>x</title>
<content type="text/xml"><s:dict><s:key name="bad"><s:dict/><s:list/></s:key></s:dict></content></entry>"#;
    assert!(matches!(parse_entry(doc.as_bytes()), Err(ApiError::Format(_))));
}
