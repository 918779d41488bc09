//! In-memory element tree for one report document.
//!
//! The tree is built from `quick-xml` namespace-resolved events into a flat
//! arena stored in document order. Because elements are pushed as their start
//! tags are read, the descendants of any element occupy a contiguous index
//! range, so descendant searches are plain slice scans.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use tracing::trace;

use crate::error::{IngestError, Result};

/// Namespace shared by every variant-report element of interest.
pub const VARIANT_REPORT_NS: &str =
    "http://foundationmedicine.com/compbio/variant-report-external";

/// Un-namespaced element holding the report identifier.
pub const REPORT_ID_TAG: &str = "ReportId";

#[derive(Debug)]
struct ElementData {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<usize>,
    /// One past the index of the last descendant.
    end: usize,
}

/// A parsed report file.
#[derive(Debug)]
pub struct ReportDocument {
    path: PathBuf,
    elements: Vec<ElementData>,
}

/// Borrowed handle to one element of a [`ReportDocument`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    document: &'a ReportDocument,
    index: usize,
}

impl ReportDocument {
    /// Read and parse a report file.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse_str(&xml, path)?;
        trace!(
            path = %path.display(),
            element_count = document.elements.len(),
            "parsed report document"
        );
        Ok(document)
    }

    /// Parse a report from memory. `path` is only used in error messages.
    pub fn parse_str(xml: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = NsReader::from_str(xml);
        let mut builder = TreeBuilder::default();

        loop {
            let step = match reader.read_resolved_event() {
                Ok((resolved, event)) => Ok((namespace_uri(resolved), event)),
                Err(error) => Err(error),
            };
            let (namespace, event) = step.map_err(|error| IngestError::XmlParse {
                path: path.clone(),
                position: reader.error_position(),
                message: error.to_string(),
            })?;
            let namespace = namespace.map_err(|prefix| IngestError::XmlParse {
                path: path.clone(),
                position: reader.buffer_position(),
                message: format!("unbound namespace prefix '{prefix}'"),
            })?;

            let applied = match event {
                Event::Start(start) => builder.open(&start, namespace, false),
                Event::Empty(start) => builder.open(&start, namespace, true),
                Event::End(_) => builder.close(),
                Event::Text(text) => decode(&text).and_then(|raw| builder.text(&raw, true)),
                Event::CData(data) => decode(&data).and_then(|raw| builder.text(&raw, false)),
                Event::GeneralRef(reference) => {
                    decode(&reference).and_then(|name| builder.text(&format!("&{name};"), true))
                }
                Event::Eof => break,
                _ => Ok(()),
            };
            applied.map_err(|message| IngestError::XmlParse {
                path: path.clone(),
                position: reader.buffer_position(),
                message,
            })?;
        }

        let elements = builder.finish().map_err(|message| IngestError::XmlParse {
            path: path.clone(),
            position: reader.buffer_position(),
            message,
        })?;
        Ok(Self { path, elements })
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document element.
    pub fn root(&self) -> Element<'_> {
        Element {
            document: self,
            index: 0,
        }
    }

    /// First element anywhere in the document (root included) matching the
    /// namespace and local name, in document order.
    pub fn find_first(&self, namespace: Option<&str>, local_name: &str) -> Option<Element<'_>> {
        (0..self.elements.len())
            .map(|index| self.element(index))
            .find(|element| element.is(namespace, local_name))
    }

    /// Every element in the document (root included) matching the namespace
    /// and local name, in document order.
    pub fn find_all(&self, namespace: Option<&str>, local_name: &str) -> Vec<Element<'_>> {
        (0..self.elements.len())
            .map(|index| self.element(index))
            .filter(|element| element.is(namespace, local_name))
            .collect()
    }

    /// Report identifier: trimmed text of the first un-namespaced `ReportId`.
    ///
    /// This is the join key for every extracted table, so its absence is an
    /// error rather than a null.
    pub fn report_id(&self) -> Result<&str> {
        self.find_first(None, REPORT_ID_TAG)
            .and_then(|element| element.text())
            .ok_or_else(|| IngestError::MissingField {
                field: REPORT_ID_TAG.to_string(),
                path: self.path.clone(),
            })
    }

    fn element(&self, index: usize) -> Element<'_> {
        Element {
            document: self,
            index,
        }
    }
}

impl<'a> Element<'a> {
    fn data(&self) -> &'a ElementData {
        &self.document.elements[self.index]
    }

    pub fn local_name(&self) -> &'a str {
        &self.data().local_name
    }

    /// Resolved namespace URI, `None` for elements in no namespace.
    pub fn namespace(&self) -> Option<&'a str> {
        self.data().namespace.as_deref()
    }

    pub fn is(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace() == namespace && self.local_name() == local_name
    }

    /// Attribute value by local name, unescaped. Present-but-empty attributes
    /// return `Some("")`.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct text content, trimmed. `None` when empty.
    pub fn text(&self) -> Option<&'a str> {
        let text = self.data().text.trim();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        let document = self.document;
        self.data()
            .children
            .iter()
            .map(move |&index| Element { document, index })
    }

    /// First direct child matching the namespace and local name.
    pub fn child(&self, namespace: Option<&str>, local_name: &str) -> Option<Element<'a>> {
        self.children()
            .find(|element| element.is(namespace, local_name))
    }

    /// All descendants (excluding this element) in document order.
    pub fn descendants(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        let document = self.document;
        (self.index + 1..self.data().end).map(move |index| Element { document, index })
    }

    /// First descendant matching the namespace and local name.
    pub fn find_first(&self, namespace: Option<&str>, local_name: &str) -> Option<Element<'a>> {
        self.descendants()
            .find(|element| element.is(namespace, local_name))
    }

    /// All descendants matching the namespace and local name.
    pub fn find_all(&self, namespace: Option<&str>, local_name: &str) -> Vec<Element<'a>> {
        self.descendants()
            .filter(|element| element.is(namespace, local_name))
            .collect()
    }
}

/// Maps a resolved namespace to an owned URI. Unknown prefixes are returned
/// as the error value.
fn namespace_uri(resolved: ResolveResult<'_>) -> std::result::Result<Option<String>, String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(&prefix).into_owned()),
    }
}

fn decode(bytes: &[u8]) -> std::result::Result<Cow<'_, str>, String> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|error| format!("invalid UTF-8: {error}"))
}

#[derive(Default)]
struct TreeBuilder {
    elements: Vec<ElementData>,
    open: Vec<usize>,
}

impl TreeBuilder {
    fn open(
        &mut self,
        start: &BytesStart<'_>,
        namespace: Option<String>,
        empty: bool,
    ) -> std::result::Result<(), String> {
        let parent = self.open.last().copied();
        if parent.is_none() && !self.elements.is_empty() {
            return Err("multiple root elements".to_string());
        }

        let local_name = decode(start.local_name().as_ref())?.into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| error.to_string())?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = decode(attribute.key.local_name().as_ref())?.into_owned();
            let raw = decode(&attribute.value)?;
            let value = unescape(&raw).map_err(|error| error.to_string())?;
            attributes.push((key, value.into_owned()));
        }

        let index = self.elements.len();
        self.elements.push(ElementData {
            namespace,
            local_name,
            attributes,
            text: String::new(),
            children: Vec::new(),
            end: index + 1,
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(index);
        }
        if !empty {
            self.open.push(index);
        }
        Ok(())
    }

    fn close(&mut self) -> std::result::Result<(), String> {
        let index = self
            .open
            .pop()
            .ok_or_else(|| "closing tag without matching opening tag".to_string())?;
        self.elements[index].end = self.elements.len();
        Ok(())
    }

    fn text(&mut self, raw: &str, escaped: bool) -> std::result::Result<(), String> {
        let Some(&current) = self.open.last() else {
            if raw.trim().is_empty() {
                return Ok(());
            }
            return Err("text content outside the root element".to_string());
        };
        if escaped {
            let value = unescape(raw).map_err(|error| error.to_string())?;
            self.elements[current].text.push_str(&value);
        } else {
            self.elements[current].text.push_str(raw);
        }
        Ok(())
    }

    fn finish(self) -> std::result::Result<Vec<ElementData>, String> {
        if let Some(&index) = self.open.last() {
            return Err(format!(
                "unexpected end of file: element <{}> is not closed",
                self.elements[index].local_name
            ));
        }
        if self.elements.is_empty() {
            return Err("no root element".to_string());
        }
        Ok(self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rr:ResultsReport xmlns:rr="http://integration.foundationmedicine.com/reporting">
  <rr:ResultsPayload>
    <FinalReport>
      <ReportId> TRF000001 </ReportId>
      <PMI><MRN>12345</MRN><FullName>Doe &amp; Roe</FullName><DOB/></PMI>
    </FinalReport>
    <variant-report xmlns="http://foundationmedicine.com/compbio/variant-report-external" disease="NSCLC">
      <short-variants>
        <short-variant gene="EGFR" cds-effect="" />
        <short-variant gene="KRAS"/>
      </short-variants>
    </variant-report>
  </rr:ResultsPayload>
</rr:ResultsReport>"#;

    fn sample() -> ReportDocument {
        ReportDocument::parse_str(SAMPLE, "sample.xml").expect("parse sample")
    }

    #[test]
    fn resolves_default_and_prefixed_namespaces() {
        let doc = sample();
        assert_eq!(doc.root().local_name(), "ResultsReport");
        assert_eq!(
            doc.root().namespace(),
            Some("http://integration.foundationmedicine.com/reporting")
        );
        let report = doc
            .find_first(Some(VARIANT_REPORT_NS), "variant-report")
            .expect("variant-report");
        assert_eq!(report.attribute("disease"), Some("NSCLC"));
        assert!(doc.find_first(None, "variant-report").is_none());
    }

    #[test]
    fn finds_all_matches_in_document_order() {
        let doc = sample();
        let genes: Vec<_> = doc
            .find_all(Some(VARIANT_REPORT_NS), "short-variant")
            .iter()
            .map(|element| element.attribute("gene").unwrap_or_default())
            .collect();
        assert_eq!(genes, vec!["EGFR", "KRAS"]);
    }

    #[test]
    fn distinguishes_empty_from_absent_attributes() {
        let doc = sample();
        let variants = doc.find_all(Some(VARIANT_REPORT_NS), "short-variant");
        assert_eq!(variants[0].attribute("cds-effect"), Some(""));
        assert_eq!(variants[1].attribute("cds-effect"), None);
    }

    #[test]
    fn reads_trimmed_text_with_entities() {
        let doc = sample();
        assert_eq!(doc.report_id().unwrap(), "TRF000001");
        let pmi = doc.find_first(None, "PMI").expect("PMI");
        assert_eq!(pmi.child(None, "MRN").and_then(|e| e.text()), Some("12345"));
        assert_eq!(
            pmi.child(None, "FullName").and_then(|e| e.text()),
            Some("Doe & Roe")
        );
        assert_eq!(pmi.child(None, "DOB").and_then(|e| e.text()), None);
    }

    #[test]
    fn descendants_exclude_the_element_itself() {
        let doc = sample();
        let container = doc
            .find_first(Some(VARIANT_REPORT_NS), "short-variants")
            .unwrap();
        assert_eq!(container.descendants().count(), 2);
        assert_eq!(container.children().count(), 2);
        assert!(
            container
                .find_first(Some(VARIANT_REPORT_NS), "short-variants")
                .is_none()
        );
    }

    #[test]
    fn missing_report_id_is_an_error() {
        let doc = ReportDocument::parse_str("<root><PMI/></root>", "x.xml").unwrap();
        assert!(matches!(
            doc.report_id(),
            Err(IngestError::MissingField { ref field, .. }) if field == "ReportId"
        ));
    }

    #[test]
    fn empty_report_id_is_an_error() {
        let doc = ReportDocument::parse_str("<root><ReportId>  </ReportId></root>", "x.xml")
            .unwrap();
        assert!(doc.report_id().is_err());
    }

    #[test]
    fn rejects_malformed_documents() {
        for xml in [
            "",
            "<root>",
            "<root></other>",
            "<root/><second/>",
            "<a><b></a></b>",
            "text<root/>",
            "<p:root/>",
        ] {
            let result = ReportDocument::parse_str(xml, "bad.xml");
            assert!(
                matches!(result, Err(IngestError::XmlParse { .. })),
                "expected parse error for {xml:?}"
            );
        }
    }

    #[test]
    fn resolves_character_references() {
        let doc = ReportDocument::parse_str(
            "<root><ReportId>TRF&#49;</ReportId><x a=\"1&lt;2\"/></root>",
            "x.xml",
        )
        .unwrap();
        assert_eq!(doc.report_id().unwrap(), "TRF1");
        assert_eq!(
            doc.find_first(None, "x").and_then(|e| e.attribute("a")),
            Some("1<2")
        );
    }
}
