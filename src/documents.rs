//! XML document trees
//!
//! Every element renders itself into its own standalone [`Document`]. A
//! parent composes its document by grafting the root of each child
//! document under its own root, so each level stays an independent,
//! owned tree value until it is absorbed.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// XML version written in the declaration
pub const XML_VERSION: &str = "1.0";

/// Encoding written in the declaration
pub const XML_ENCODING: &str = "UTF-8";

/// XML element in a document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name (unprefixed)
    pub name: String,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements, in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf element holding text
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Get the element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the child elements
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Find child elements by name
    pub fn find_children(&self, name: &str) -> Vec<&Element> {
        self.children.iter().filter(|e| e.name == name).collect()
    }

    /// Find the first child element with a name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.name == name)
    }

    /// Names of the direct children, in order
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|e| e.name.as_str()).collect()
    }

    fn write_events<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.text.is_none() && self.children.is_empty() {
            return write_event(writer, Event::Empty(BytesStart::new(self.name.as_str())));
        }

        write_event(writer, Event::Start(BytesStart::new(self.name.as_str())))?;
        if let Some(ref text) = self.text {
            write_event(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_events(writer)?;
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(format!("Failed to write XML: {}", e)))
}

/// Output options for serialized documents
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Whether to write the XML declaration
    declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { declaration: true }
    }
}

impl WriterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the declaration is written
    pub fn declaration(&self) -> bool {
        self.declaration
    }

    /// Set whether to write the declaration
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Standalone XML document with a single root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Create a new document with an empty root element
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: Element::new(root_name),
        }
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Get the root element mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Take the root element out of the document
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Move another document's root element, with its subtree, under this root
    pub fn graft(&mut self, child: Document) {
        self.root.add_child(child.into_root());
    }

    /// Append a text leaf under the root
    pub fn append_leaf(&mut self, name: &str, text: impl Into<String>) {
        self.root.add_child(Element::leaf(name, text));
    }

    /// Serialize with the default configuration
    pub fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with(&WriterConfig::default())
    }

    /// Serialize with an explicit configuration
    pub fn to_xml_string_with(&self, config: &WriterConfig) -> Result<String> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes, config)?;
        String::from_utf8(bytes).map_err(|e| Error::Xml(format!("Invalid UTF-8 output: {}", e)))
    }

    /// Write the document to a byte sink
    pub fn write_to<W: Write>(&self, sink: W, config: &WriterConfig) -> Result<()> {
        let mut writer = Writer::new(sink);
        if config.declaration() {
            write_event(
                &mut writer,
                Event::Decl(BytesDecl::new(XML_VERSION, Some(XML_ENCODING), None)),
            )?;
        }
        self.root.write_events(&mut writer)
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    element_stack.push(Element::new(Self::element_name(&e)?));
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        match element_stack.last_mut() {
                            Some(parent) => parent.add_child(current),
                            None => root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Element::new(Self::element_name(&e)?);
                    match element_stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                            .to_string();
                        Self::push_text(current, &text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = String::from_utf8(e.into_inner().into_owned())
                            .map_err(|e| Error::Xml(format!("Invalid UTF-8 in CDATA: {}", e)))?;
                        Self::push_text(current, &text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Declarations, comments and processing instructions carry no content
            }
        }

        root.map(|root| Self { root })
            .ok_or_else(|| Error::Xml("XML document has no root element".to_string()))
    }

    fn push_text(element: &mut Element, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        match element.text {
            Some(ref mut existing) => existing.push_str(text),
            None => element.set_text(text.to_string()),
        }
    }

    fn element_name(start: &BytesStart<'_>) -> Result<String> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Instance");
        assert_eq!(doc.root().name(), "Instance");
        assert!(doc.root().children().is_empty());
    }

    #[test]
    fn test_graft_moves_child_root() {
        let mut child = Document::new("Period");
        child.append_leaf("Begin", "2015-01-01");
        child.append_leaf("End", "2015-01-31");

        let mut parent = Document::new("ItemPerformance");
        parent.graft(child);
        parent.append_leaf("Category", "Requests");

        assert_eq!(parent.root().child_names(), vec!["Period", "Category"]);
        let period = parent.root().find_child("Period").unwrap();
        assert_eq!(period.child_names(), vec!["Begin", "End"]);
    }

    #[test]
    fn test_serialize_with_declaration() {
        let mut doc = Document::new("Instance");
        doc.append_leaf("MetricType", "ft_pdf");
        doc.append_leaf("Count", "5");

        let xml = doc.to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Instance><MetricType>ft_pdf</MetricType><Count>5</Count></Instance>"
        );
    }

    #[test]
    fn test_serialize_without_declaration() {
        let doc = Document::new("ReportItems");
        let config = WriterConfig::new().with_declaration(false);
        assert_eq!(doc.to_xml_string_with(&config).unwrap(), "<ReportItems/>");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new("ReportItems");
        doc.append_leaf("ItemName", "Fish & <Chips>");
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("<ItemName>Fish &amp; &lt;Chips&gt;</ItemName>"));
    }

    #[test]
    fn test_parse_round_trip() {
        let mut doc = Document::new("ReportItems");
        doc.append_leaf("ItemName", "Fish & Chips");
        let mut nested = Document::new("ItemIdentifier");
        nested.append_leaf("Type", "DOI");
        nested.append_leaf("Value", "10.1000/1");
        doc.graft(nested);

        let parsed = Document::from_string(&doc.to_xml_string().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_parse_keeps_cdata_text() {
        let doc = Document::from_string(
            "<Instance><MetricType><![CDATA[ft_pdf]]></MetricType><Count>5</Count></Instance>",
        )
        .unwrap();
        assert_eq!(doc.root().children()[0].text(), Some("ft_pdf"));

        let doc = Document::from_string("<ItemName>Fish<![CDATA[&<Chips>]]></ItemName>").unwrap();
        assert_eq!(doc.root().text(), Some("Fish&<Chips>"));
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(matches!(Document::from_string(""), Err(Error::Xml(_))));
    }

    #[test]
    fn test_find_children() {
        let doc = Document::from_string("<root><child1/><child2/><child1/></root>").unwrap();
        assert_eq!(doc.root().find_children("child1").len(), 2);
    }
}
