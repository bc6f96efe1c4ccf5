//! Minimal element tree built from quick-xml events.

use crate::error::{ApiError, Result};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One XML element with its attributes, element children and direct text.
#[derive(Debug, Clone, Default)]
pub(crate) struct XmlNode {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

impl XmlNode {
    /// Element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Namespace URI bound to this element's prefix by its own declarations.
    pub fn declared_namespace(&self) -> Option<&str> {
        match self.prefix() {
            Some(prefix) => self.attr(&format!("xmlns:{}", prefix)),
            None => self.attr("xmlns"),
        }
    }

    pub fn child(&self, local_name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }
}

/// Deepest element nesting accepted from a server document.
pub(crate) const MAX_XML_DEPTH: usize = 256;

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| ApiError::Format(format!("Invalid UTF-8 in XML: {}", e)))
}

fn unescaped(raw: &str) -> Result<String> {
    unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| ApiError::Format(format!("Invalid XML escape: {}", e)))
}

fn open(start: &BytesStart<'_>) -> Result<XmlNode> {
    let name = utf8(start.name().as_ref())?.to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ApiError::Format(format!("Malformed XML attribute: {}", e)))?;
        let key = utf8(attr.key.as_ref())?.to_string();
        let value = unescaped(utf8(&attr.value)?)?;
        attrs.push((key, value));
    }
    Ok(XmlNode {
        name,
        attrs,
        ..XmlNode::default()
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(ApiError::Format(
                "XML document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Parse a complete document into its root element.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<XmlNode> {
    let mut reader = Reader::from_reader(bytes);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.len() >= MAX_XML_DEPTH {
                    return Err(ApiError::Format(format!(
                        "XML nesting exceeds {} levels",
                        MAX_XML_DEPTH
                    )));
                }
                stack.push(open(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let node = open(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    ApiError::Format("Unbalanced XML end tag".to_string())
                })?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&unescaped(utf8(&text)?)?);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(utf8(&data)?);
                }
            }
            Ok(Event::GeneralRef(reference)) => {
                if let Some(node) = stack.last_mut() {
                    let raw = format!("&{};", utf8(&reference)?);
                    node.text.push_str(&unescaped(&raw)?);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ApiError::Format(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    if !stack.is_empty() {
        return Err(ApiError::Format("Unexpected end of XML document".to_string()));
    }
    root.ok_or_else(|| ApiError::Format("Empty XML document".to_string()))
}
