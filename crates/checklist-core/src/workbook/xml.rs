use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::ChecklistError;

pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(crate) const NS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Thin event writer for the package parts.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, ChecklistError> {
        let mut inner = Writer::new(Vec::new());
        inner.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(XmlWriter { inner })
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ChecklistError> {
        self.inner.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ChecklistError> {
        self.inner.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<(), ChecklistError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> Result<(), ChecklistError> {
        self.inner
            .write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    pub fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), ChecklistError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in attrs {
        let value = xml_safe(value);
        start.push_attribute((key, &*value));
    }
    start
}

/// Drop characters XML 1.0 cannot carry: C0 controls other than tab, line
/// feed and carriage return, plus U+FFFE and U+FFFF.
pub(crate) fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut w = XmlWriter::new().unwrap();
        w.start("si", &[("note", "a \"b\" & c")]).unwrap();
        w.text_element("t", &[], "Bepoz & Cash <Handling>").unwrap();
        w.end("si").unwrap();
        let xml = String::from_utf8(w.into_bytes()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("note=\"a &quot;b&quot; &amp; c\""));
        assert!(xml.contains("<t>Bepoz &amp; Cash &lt;Handling&gt;</t>"));
    }

    #[test]
    fn test_empty_element() {
        let mut w = XmlWriter::new().unwrap();
        w.empty("pane", &[("ySplit", "1")]).unwrap();
        let xml = String::from_utf8(w.into_bytes()).unwrap();
        assert!(xml.ends_with("<pane ySplit=\"1\"/>"));
    }

    #[test]
    fn test_control_characters_stripped() {
        assert_eq!(xml_safe("Clean the bar"), "Clean the bar");
        assert_eq!(xml_safe("Clean\u{0B} the\u{1}bar\u{FFFF}"), "Clean thebar");
        assert_eq!(xml_safe("line one\nline\ttwo\r"), "line one\nline\ttwo\r");

        let mut w = XmlWriter::new().unwrap();
        w.text_element("t", &[("note", "a\u{7}b")], "Stock\u{8} fridge").unwrap();
        let xml = String::from_utf8(w.into_bytes()).unwrap();
        assert!(xml.ends_with("<t note=\"ab\">Stock fridge</t>"));
    }
}
