//! Generic XML tree.
//!
//! This module turns an XML document into a small owned tree of
//! [`Element`]s. It knows nothing about PDSC; the structure is checked
//! afterwards by [`crate::extract`].
//!
//! Parsing uses `quick-xml` in pull mode. Text and CDATA segments of an
//! element are concatenated as they appear and the result is trimmed once
//! the element closes. Comments, processing instructions and the XML
//! declaration are skipped.
//!
//! # Example
//!
//! ```rust
//! use pdsc_picker::tree::parse_str;
//!
//! let doc = parse_str(r#"<package><devices><family Dfamily="STM32F4"/></devices></package>"#).unwrap();
//! let package = doc.child("package").unwrap();
//! let devices = package.first_child("devices").unwrap();
//! assert_eq!(devices.children("family").count(), 1);
//! ```

use crate::error::{Error, Result};
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::BufRead;
use std::str;

/// A single XML element with its attributes, child elements and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Creates an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Adds a child element, builder style.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content, builder style.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the child elements with the given tag name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the first child element with the given tag name.
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns true if at least one child has the given tag name.
    pub fn has_children(&self, name: &str) -> bool {
        self.first_child(name).is_some()
    }

    /// Returns all child elements in document order.
    pub fn all_children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the accumulated text content (trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wraps an already-built root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Returns the root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the root element if its tag name is exactly `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        (self.root.name == name).then_some(&self.root)
    }
}

/// Builds the element tree from the event stream.
#[derive(Debug, Default)]
struct TreeBuilder {
    /// Open elements, innermost last
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    fn close(&mut self, name: &str) -> Result<()> {
        match self.stack.pop() {
            Some(mut element) if element.name == name => {
                element.text = element.text.trim().to_string();
                self.attach(element)
            }
            Some(element) => Err(Error::MalformedXml(format!(
                "expected </{}>, found </{}>",
                element.name, name
            ))),
            None => Err(Error::MalformedXml(format!(
                "unexpected closing tag </{}>",
                name
            ))),
        }
    }

    fn attach(&mut self, element: Element) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(element);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(Error::MalformedXml(format!(
                "unexpected element <{}> after the root element",
                element.name
            )));
        }
        self.root = Some(element);
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(current) => {
                current.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::MalformedXml(
                "text outside of the root element".to_string(),
            )),
        }
    }

    fn finish(mut self) -> Result<Document> {
        if let Some(open) = self.stack.pop() {
            return Err(Error::MalformedXml(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        self.root
            .map(Document::new)
            .ok_or_else(|| Error::MalformedXml("no root element".to_string()))
    }
}

/// Creates an element from a start tag, copying its name and attributes.
fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let name = str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Parses an XML document from a buffered reader.
pub fn parse<R: BufRead>(reader: R) -> Result<Document> {
    let mut reader = Reader::from_reader(reader);

    let mut buf = Vec::with_capacity(4096);
    let mut builder = TreeBuilder::default();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(ref e) => {
                builder.open(element_from_start(e)?);
            }
            XmlEvent::Empty(ref e) => {
                let element = element_from_start(e)?;
                builder.attach(element)?;
            }
            XmlEvent::End(ref e) => {
                let name = str::from_utf8(e.name().as_ref())?.to_string();
                builder.close(&name)?;
            }
            XmlEvent::Text(ref e) => {
                let text = e.unescape()?;
                builder.text(&text)?;
            }
            XmlEvent::CData(ref e) => {
                let text = str::from_utf8(e.as_ref())?;
                builder.text(text)?;
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// Parses an XML document held in memory.
pub fn parse_str(xml: &str) -> Result<Document> {
    parse(xml.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- vendor pack -->
<package schemaVersion="1.4" xmlns:xs="http://www.w3.org/2001/XMLSchema-instance">
  <vendor>Keil</vendor>
  <devices>
    <family Dfamily="STM32F4 Series" Dvendor="STMicroelectronics:13">
      <subFamily DsubFamily="STM32F401">
        <device Dname="STM32F401CB">
          <description>Cortex-M4 &amp; FPU</description>
        </device>
        <device Dname="STM32F401CC"/>
      </subFamily>
    </family>
  </devices>
</package>"#;

    #[test]
    fn test_parse_nested_document() {
        let doc = parse(Cursor::new(NESTED)).unwrap();
        let package = doc.child("package").unwrap();
        assert_eq!(package.attr("schemaVersion"), Some("1.4"));
        assert_eq!(package.first_child("vendor").unwrap().text(), "Keil");

        let family = package
            .first_child("devices")
            .and_then(|d| d.first_child("family"))
            .unwrap();
        assert_eq!(family.attr("Dvendor"), Some("STMicroelectronics:13"));

        let sub = family.first_child("subFamily").unwrap();
        let names: Vec<_> = sub.children("device").filter_map(|d| d.attr("Dname")).collect();
        assert_eq!(names, vec!["STM32F401CB", "STM32F401CC"]);

        let first = sub.first_child("device").unwrap();
        assert_eq!(first.first_child("description").unwrap().text(), "Cortex-M4 & FPU");
    }

    #[test]
    fn test_child_is_case_sensitive() {
        let doc = parse_str("<Package/>").unwrap();
        assert!(doc.child("package").is_none());
        assert_eq!(doc.root().name(), "Package");
    }

    #[test]
    fn test_empty_element_has_no_children() {
        let doc = parse_str("<package><devices></devices></package>").unwrap();
        let devices = doc.root().first_child("devices").unwrap();
        assert!(!devices.has_children("family"));
        assert!(devices.all_children().is_empty());
        assert_eq!(devices.text(), "");
    }

    #[test]
    fn test_cdata_text() {
        let doc = parse_str("<description><![CDATA[a < b]]></description>").unwrap();
        assert_eq!(doc.root().text(), "a < b");
    }

    #[test]
    fn test_mixed_content_keeps_inner_whitespace() {
        let doc = parse_str("<description>a <![CDATA[b]]> c</description>").unwrap();
        assert_eq!(doc.root().text(), "a b c");

        let doc = parse_str("<description>\n  Cortex-M4 <b>fast</b> MCU\n</description>").unwrap();
        assert_eq!(doc.root().text(), "Cortex-M4  MCU");
        assert_eq!(doc.root().first_child("b").unwrap().text(), "fast");
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse_str(""), Err(Error::MalformedXml(_))));
        let err = parse_str("<package><devices/></package><package/>").unwrap_err();
        assert!(matches!(err, Error::MalformedXml(_)));
        assert!(err.to_string().starts_with("Failed to parse the .pdsc file: "));
        assert!(parse_str("<a><b></b>").is_err());
        assert!(parse_str("<a/><b/>").is_err());
        assert!(parse_str("hello <a/>").is_err());
        assert!(parse_str("<a><b></a></b>").is_err());
        assert!(parse_str("<a attr=></a>").is_err());
    }

    #[test]
    fn test_builder_api_matches_parsed_tree() {
        let built = Document::new(
            Element::new("package")
                .with_attr("schemaVersion", "1.7.2")
                .with_child(Element::new("vendor").with_text("ARM")),
        );
        let parsed = parse_str(
            "<package schemaVersion=\"1.7.2\">\n  <vendor> ARM </vendor>\n</package>",
        )
        .unwrap();
        assert_eq!(built, parsed);
        assert_eq!(
            parsed.root().attributes(),
            &[("schemaVersion".to_string(), "1.7.2".to_string())]
        );
    }
}
