//! Schema-less XML to record inference.
//!
//! The converter service has no schema for uploaded XML, so the shape of the
//! record sequence is inferred from the document structure: when the root's
//! first child tag repeats among its siblings the document is treated as a
//! collection and every direct child becomes one record; otherwise the whole
//! document collapses into a single record with one level of nesting.

use crate::domain::model::Record;
use crate::utils::error::{ConvertError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

#[derive(Debug, Clone)]
pub(crate) enum XmlNode {
    Text(String),
    Element(XmlElement),
}

#[derive(Debug, Clone)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// All text in the subtree, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

fn parse_error(message: impl std::fmt::Display) -> ConvertError {
    ConvertError::Parse {
        message: message.to_string(),
    }
}

fn read_element(start: &quick_xml::events::BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(parse_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement::new(name, attributes))
}

fn append_text(stack: &mut [XmlElement], text: String) {
    if let Some(parent) = stack.last_mut() {
        // merge adjacent chunks so text_content sees one run
        if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
            existing.push_str(&text);
        } else {
            parent.children.push(XmlNode::Text(text));
        }
    }
}

// Predefined entities plus numeric character references; anything else is
// malformed input for this pipeline.
fn resolve_reference(name: &[u8]) -> Option<String> {
    match name {
        b"amp" => return Some("&".to_string()),
        b"lt" => return Some("<".to_string()),
        b"gt" => return Some(">".to_string()),
        b"apos" => return Some("'".to_string()),
        b"quot" => return Some("\"".to_string()),
        _ => {}
    }
    let digits = name.strip_prefix(b"#")?;
    let code = match digits.strip_prefix(b"x").or_else(|| digits.strip_prefix(b"X")) {
        Some(hex) => u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?,
        None => std::str::from_utf8(digits).ok()?.parse().ok()?,
    };
    char::from_u32(code).map(|ch| ch.to_string())
}

fn close_element(
    element: XmlElement,
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_some() {
                return Err(parse_error("document has more than one root element"));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

/// Parses a whole document into an element tree and returns its root.
pub(crate) fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(start) => {
                stack.push(read_element(&start)?);
            }
            Event::Empty(start) => {
                let element = read_element(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error("unexpected closing tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.decode().map_err(parse_error)?.into_owned();
                append_text(&mut stack, text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(data.as_ref()).into_owned();
                append_text(&mut stack, text);
            }
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(&reference).ok_or_else(|| {
                    parse_error(format!(
                        "unknown entity reference: &{};",
                        String::from_utf8_lossy(&reference)
                    ))
                })?;
                append_text(&mut stack, resolved);
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(parse_error("unexpected end of document"));
    }
    root.ok_or_else(|| parse_error("document has no root element"))
}

/// Infers the record sequence from a parsed document root.
///
/// Collection branch: the repetition check inspects only the first child's
/// tag, but record building then treats every direct child as an item, tag
/// match or not. A divergent-tag sibling still becomes its own record.
pub(crate) fn infer_records(root: &XmlElement) -> Vec<Value> {
    let children: Vec<&XmlElement> = root.child_elements().collect();

    if let Some(first) = children.first() {
        let repeats = children.iter().filter(|el| el.name == first.name).count();
        if repeats > 1 {
            return children
                .iter()
                .map(|item| {
                    let mut record = Record::new();
                    for field in item.child_elements() {
                        record.insert(field.name.clone(), Value::String(field.text_content()));
                        for (attr_name, attr_value) in &field.attributes {
                            record.insert(
                                format!("{}_{}", field.name, attr_name),
                                Value::String(attr_value.clone()),
                            );
                        }
                    }
                    Value::Object(record)
                })
                .collect();
        }
    }

    // Single-record fallback: one nested object per direct child, one level
    // deep, attributes ignored in this branch.
    let mut record = Record::new();
    for child in root.child_elements() {
        let mut nested = Record::new();
        for field in child.child_elements() {
            nested.insert(field.name.clone(), Value::String(field.text_content()));
        }
        record.insert(child.name.clone(), Value::Object(nested));
    }
    vec![Value::Object(record)]
}
