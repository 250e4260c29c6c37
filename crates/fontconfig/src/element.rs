//! Owned XML element tree over quick-xml's event API.
//!
//! `fonts.xml` documents are small, so the whole tree is materialized
//! instead of streaming. Attribute and child order are preserved; the
//! merge logic depends on both.

use std::str;

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{Error, Result};

/// A single XML element: tag, ordered attributes, optional text, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an attribute by name. Other attributes keep their order.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    /// Parse a complete document into its root element.
    ///
    /// Comments, processing instructions, and the XML declaration are
    /// dropped; mismatched tags surface as a parse error.
    pub fn parse(data: &[u8]) -> Result<Element> {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) => {
                    stack.push(Self::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::close(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(Error::UnbalancedTag)?;
                    Self::close(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let content = text.unescape()?;
                    let trimmed = content.trim();
                    if !trimmed.is_empty()
                        && let Some(current) = stack.last_mut()
                    {
                        match &mut current.text {
                            Some(existing) => existing.push_str(trimmed),
                            None => current.text = Some(trimmed.to_string()),
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        root.ok_or(Error::NoRoot)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let tag = str::from_utf8(start.name().as_ref())?.to_string();
        let mut element = Element::new(tag);
        for attr in start.attributes() {
            let attr = attr?;
            let name = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attrs.push((name, value));
        }
        Ok(element)
    }

    fn close(
        stack: &mut Vec<Element>,
        root: &mut Option<Element>,
        element: Element,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => return Err(Error::UnbalancedTag),
        }
        Ok(())
    }

    /// Serialize with an XML declaration, tab indentation, and UTF-8
    /// encoding. The output never contains blank lines.
    pub fn to_pretty_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write_into(&mut writer)?;

        let raw = writer.into_inner();
        let mut out: Vec<u8> = String::from_utf8_lossy(&raw)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .into_bytes();
        out.push(b'\n');
        Ok(out)
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attrs {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_attributes_and_text() {
        let doc = br#"<familyset version="23">
            <family name="sans-serif">
                <font weight="400" style="normal">Roboto-Regular.ttf</font>
            </family>
        </familyset>"#;

        let root = Element::parse(doc).unwrap();
        assert_eq!(root.tag, "familyset");
        assert_eq!(root.attr("version"), Some("23"));
        assert_eq!(root.children.len(), 1);

        let family = &root.children[0];
        assert_eq!(family.attr("name"), Some("sans-serif"));

        let font = &family.children[0];
        assert_eq!(font.attr("weight"), Some("400"));
        assert_eq!(font.text.as_deref(), Some("Roboto-Regular.ttf"));
    }

    #[test]
    fn parse_rejects_mismatched_tags() {
        assert!(Element::parse(b"<familyset><family></familyset>").is_err());
    }

    #[test]
    fn parse_rejects_empty_document() {
        assert!(matches!(Element::parse(b"  "), Err(Error::NoRoot)));
    }

    #[test]
    fn remove_attr_keeps_remaining_order() {
        let mut element = Element::new("family")
            .with_attr("name", "sans-serif")
            .with_attr("lang", "und-Latn")
            .with_attr("variant", "compact");
        element.remove_attr("lang");
        assert_eq!(element.attrs.len(), 2);
        assert_eq!(element.attrs[0].0, "name");
        assert_eq!(element.attrs[1].0, "variant");
    }

    #[test]
    fn pretty_output_reparses_to_the_same_tree() {
        let mut family = Element::new("family");
        family.children.push(
            Element::new("font")
                .with_attr("weight", "400")
                .with_attr("style", "normal")
                .with_text("MyFont.ttf"),
        );
        let mut root = Element::new("familyset").with_attr("version", "23");
        root.children.push(family);

        let pretty = root.to_pretty_xml().unwrap();
        let reparsed = Element::parse(&pretty).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn pretty_output_uses_tabs_and_has_no_blank_lines() {
        let mut root = Element::new("familyset").with_attr("version", "23");
        root.children.push(Element::new("family"));

        let pretty = root.to_pretty_xml().unwrap();
        let text = String::from_utf8(pretty).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(text.contains("\n\t<family/>"));
        assert!(text.lines().all(|line| !line.trim().is_empty()));
    }
}
