//! Owned XML element trees
//!
//! This module provides the [`Element`] type, a small owned tree of labeled,
//! attributed XML nodes, and the [`ele`] builder used to construct nested
//! document structure from literal arguments. Serialization goes through
//! `quick_xml` events, so an assembled tree can be written to any
//! `io::Write` sink.

use crate::error::{Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write as IoWrite;

/// One XML element: a tag, ordered attributes, optional text content and
/// an ordered list of owned children.
///
/// The text content, when present, always precedes the child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in the order they will be written
    pub attributes: Vec<(String, String)>,
    /// Literal text content, written before any children
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes, text or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Serialize this element and its subtree as XML events
    ///
    /// Elements with no text and no children are written self-closing.
    /// Text content is escaped on write.
    pub fn to_writer<W: IoWrite>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| Error::xml_write(format!("Failed to write {} element: {}", self.tag, e)))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::xml_write(format!("Failed to write {} element: {}", self.tag, e)))?;

        if let Some(ref text) = self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| Error::xml_write(format!("Failed to write {} text: {}", self.tag, e)))?;
        }

        for child in &self.children {
            child.to_writer(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(|e| Error::xml_write(format!("Failed to close {} element: {}", self.tag, e)))?;

        Ok(())
    }
}

/// Build one element from literal structure
///
/// Attributes are kept in the given order. An empty `text` produces no text
/// node. The children are appended in order after the text. No validation is
/// performed on tag or attribute names; the caller supplies final string
/// forms.
///
/// # Example
///
/// ```
/// use libdae::ele;
///
/// let unit = ele("unit", &[("meter", "0.0254000"), ("name", "inch")], "", vec![]);
/// let asset = ele("asset", &[], "", vec![unit, ele("up_axis", &[], "Y_UP", vec![])]);
/// assert_eq!(asset.children.len(), 2);
/// ```
pub fn ele(tag: &str, attributes: &[(&str, &str)], text: &str, children: Vec<Element>) -> Element {
    Element {
        tag: tag.to_string(),
        attributes: attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        text: if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        },
        children,
    }
}
