//! Server message blocks (`<response><messages><msg type="...">`).

use super::dom::parse_document;

/// Join the text of every `<msg>` in an error body, if the body has any.
pub fn error_message(body: &[u8]) -> Option<String> {
    let root = parse_document(body).ok()?;
    let messages = if root.local_name() == "messages" {
        &root
    } else {
        root.child("messages")?
    };
    let text: Vec<String> = messages
        .children
        .iter()
        .filter(|msg| msg.local_name() == "msg")
        .map(|msg| msg.text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text.join("; "))
    }
}
