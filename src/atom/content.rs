//! The `dict`/`list` content grammar carried inside Atom `<content>` elements.
//!
//! A `dict` holds `key` elements (each with a `name` attribute), a `list`
//! holds `item` elements. A `key` or `item` is either plain text or wraps
//! exactly one nested `dict` or `list`. Empty dicts decode to null and null
//! values are dropped from their parent. Any other shape is rejected.

use super::dom::XmlNode;
use crate::error::{ApiError, Result};
use crate::record::{Record, Value};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Namespace used for the content grammar when rendering records.
pub const REST_NS: &str = "http://dev.splunk.com/ns/rest";

/// Decode a `<content>` element into a record; no payload yields an empty record.
pub(crate) fn parse_content(node: &XmlNode) -> Result<Record> {
    match node.children.as_slice() {
        [] => Ok(Record::new()),
        [dict] if dict.local_name() == "dict" => Ok(parse_dict(dict)?.unwrap_or_default()),
        [other] => Err(ApiError::Format(format!(
            "Content payload must be a dict, found <{}>",
            other.name
        ))),
        _ => Err(ApiError::Format(
            "Content element must have at most one child".to_string(),
        )),
    }
}

fn parse_dict(node: &XmlNode) -> Result<Option<Record>> {
    if node.children.is_empty() {
        return Ok(None);
    }
    let mut record = Record::new();
    for key in &node.children {
        if key.local_name() != "key" {
            return Err(ApiError::Format(format!(
                "Expected <key> inside <dict>, found <{}>",
                key.name
            )));
        }
        let name = key
            .attr("name")
            .ok_or_else(|| ApiError::Format("<key> element without a name attribute".to_string()))?;
        if let Some(value) = parse_value(key)? {
            record.insert(name, value);
        }
    }
    Ok(Some(record))
}

fn parse_list(node: &XmlNode) -> Result<Vec<Value>> {
    let mut items = Vec::with_capacity(node.children.len());
    for item in &node.children {
        if item.local_name() != "item" {
            return Err(ApiError::Format(format!(
                "Expected <item> inside <list>, found <{}>",
                item.name
            )));
        }
        if let Some(value) = parse_value(item)? {
            items.push(value);
        }
    }
    Ok(items)
}

fn parse_value(node: &XmlNode) -> Result<Option<Value>> {
    match node.children.as_slice() {
        [] => Ok(Some(Value::Str(node.text.clone()))),
        [child] => match child.local_name() {
            "dict" => Ok(parse_dict(child)?.map(Value::Record)),
            "list" => Ok(Some(Value::List(parse_list(child)?))),
            other => Err(ApiError::Format(format!(
                "<{}> may only wrap a dict or list, found <{}>",
                node.local_name(),
                other
            ))),
        },
        children => Err(ApiError::Format(format!(
            "<{}> has {} element children, expected at most one",
            node.local_name(),
            children.len()
        ))),
    }
}

fn xml_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Format(format!("Failed to render record: {}", err))
}

/// Render a record as an `s:dict` element in the content grammar.
pub fn write_record(record: &Record) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let start = BytesStart::new("s:dict").with_attributes([("xmlns:s", REST_NS)]);
    write_dict_body(&mut writer, start, record)?;
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_dict_body(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, record: &Record) -> Result<()> {
    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for (name, value) in record.iter() {
        let key = BytesStart::new("s:key").with_attributes([("name", name)]);
        writer.write_event(Event::Start(key)).map_err(xml_error)?;
        write_value(writer, value)?;
        writer
            .write_event(Event::End(BytesEnd::new("s:key")))
            .map_err(xml_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("s:dict")))
        .map_err(xml_error)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<()> {
    match value {
        Value::Str(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error),
        Value::Record(record) => write_dict_body(writer, BytesStart::new("s:dict"), record),
        Value::List(items) => {
            writer
                .write_event(Event::Start(BytesStart::new("s:list")))
                .map_err(xml_error)?;
            for item in items {
                writer
                    .write_event(Event::Start(BytesStart::new("s:item")))
                    .map_err(xml_error)?;
                write_value(writer, item)?;
                writer
                    .write_event(Event::End(BytesEnd::new("s:item")))
                    .map_err(xml_error)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("s:list")))
                .map_err(xml_error)
        }
    }
}
