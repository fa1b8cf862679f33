//! Streaming reader over an OSM XML document.
//!
//! [`ElementReader`] walks the document event by event and yields one
//! fully-materialized top-level element (its attributes, `<tag>` children
//! and, for ways, ordered `<nd>` references) at a time. The event buffer is
//! cleared before every read, so memory stays bounded by the largest single
//! element rather than the document size.
//!
//! Subtrees of kinds that were not requested (relations, by default) are
//! skipped wholesale without materialization. Callers must not rely on any
//! reader state across iterations; dropping the iterator is the only form
//! of cancellation.
//!
//! # Usage
//!
//! ```ignore
//! use osmcsv_ingest::ElementReader;
//!
//! for element in ElementReader::from_path("kyiv_sample.osm")? {
//!     let element = element?;
//!     // shape, validate, write; the subtree is released on the next turn
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use tracing::trace;

use osmcsv_model::{ConvertError, Element, ElementKind, RawTag, Result};

/// Pull-based iterator over the top-level elements of an OSM document.
pub struct ElementReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    kinds: Vec<ElementKind>,
    done: bool,
}

impl ElementReader<BufReader<File>> {
    /// Opens a file and prepares a reader surfacing nodes and ways.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ElementReader<R> {
    /// Wraps any buffered source. Surfaces nodes and ways by default.
    pub fn from_reader(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            kinds: vec![ElementKind::Node, ElementKind::Way],
            done: false,
        }
    }

    /// Restricts the element kinds surfaced by the iterator.
    pub fn with_kinds(mut self, kinds: &[ElementKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    fn next_element(&mut self) -> Result<Option<Element>> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Err(error) => {
                    return Err(ConvertError::MalformedDocument(error.to_string()));
                }
                Ok(Event::Eof) => return Ok(None),
                Ok(Event::Empty(start)) => {
                    let Some(kind) = kind_of(&start) else {
                        continue;
                    };
                    if self.kinds.contains(&kind) {
                        let element = decode_element(kind, &start, self.reader.decoder())?;
                        return Ok(Some(element));
                    }
                }
                Ok(Event::Start(start)) => {
                    let Some(kind) = kind_of(&start) else {
                        // Container elements such as <osm> itself; descend.
                        continue;
                    };
                    if self.kinds.contains(&kind) {
                        let mut element = decode_element(kind, &start, self.reader.decoder())?;
                        self.read_children(&mut element)?;
                        return Ok(Some(element));
                    }
                    trace!(kind = %kind, "skipping unrequested element subtree");
                    let name = start.name().as_ref().to_vec();
                    self.skip_subtree(&name)?;
                }
                Ok(_) => {}
            }
        }
    }

    /// Collects `<tag>` and `<nd>` children until the element's end tag.
    fn read_children(&mut self, element: &mut Element) -> Result<()> {
        let end_name = element.kind.as_str().as_bytes();
        let mut child_buf = Vec::new();
        loop {
            child_buf.clear();
            match self.reader.read_event_into(&mut child_buf) {
                Err(error) => {
                    return Err(ConvertError::MalformedDocument(error.to_string()));
                }
                Ok(Event::Eof) => {
                    return Err(ConvertError::MalformedDocument(format!(
                        "unexpected end of document inside <{}>",
                        element.kind
                    )));
                }
                Ok(Event::Empty(child)) => {
                    decode_child(element, &child, self.reader.decoder())?;
                }
                Ok(Event::Start(child)) => {
                    decode_child(element, &child, self.reader.decoder())?;
                    let name = child.name().as_ref().to_vec();
                    self.skip_subtree(&name)?;
                }
                Ok(Event::End(end)) => {
                    if end.name().as_ref() == end_name {
                        return Ok(());
                    }
                }
                Ok(_) => {}
            }
        }
    }

    fn skip_subtree(&mut self, name: &[u8]) -> Result<()> {
        let mut skip_buf = Vec::new();
        self.reader
            .read_to_end_into(QName(name), &mut skip_buf)
            .map_err(|error| ConvertError::MalformedDocument(error.to_string()))?;
        Ok(())
    }
}

impl<R: BufRead> Iterator for ElementReader<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

fn kind_of(start: &BytesStart<'_>) -> Option<ElementKind> {
    ElementKind::from_tag_name(start.name().as_ref())
}

fn decode_element(kind: ElementKind, start: &BytesStart<'_>, decoder: Decoder) -> Result<Element> {
    let mut element = Element::new(kind);
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|error| ConvertError::MalformedDocument(error.to_string()))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|error| ConvertError::MalformedDocument(error.to_string()))?
            .to_string();
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|error| ConvertError::MalformedDocument(error.to_string()))?
            .into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

/// Decodes one child of a node/way subtree: `<tag k= v=>` becomes a raw tag,
/// `<nd ref=>` extends the way's ordered reference list, anything else
/// (relation members, metadata) is ignored.
fn decode_child(element: &mut Element, child: &BytesStart<'_>, decoder: Decoder) -> Result<()> {
    match child.name().as_ref() {
        b"tag" => {
            let mut key = None;
            let mut value = None;
            for attribute in child.attributes() {
                let attribute =
                    attribute.map_err(|error| ConvertError::MalformedDocument(error.to_string()))?;
                let text = attribute
                    .decode_and_unescape_value(decoder)
                    .map_err(|error| ConvertError::MalformedDocument(error.to_string()))?
                    .into_owned();
                match attribute.key.as_ref() {
                    b"k" => key = Some(text),
                    b"v" => value = Some(text),
                    _ => {}
                }
            }
            if let (Some(key), Some(value)) = (key, value) {
                element.tags.push(RawTag { key, value });
            }
        }
        b"nd" => {
            for attribute in child.attributes() {
                let attribute =
                    attribute.map_err(|error| ConvertError::MalformedDocument(error.to_string()))?;
                if attribute.key.as_ref() == b"ref" {
                    let text = attribute
                        .decode_and_unescape_value(decoder)
                        .map_err(|error| ConvertError::MalformedDocument(error.to_string()))?
                        .into_owned();
                    element.node_refs.push(text);
                }
            }
        }
        _ => {}
    }
    Ok(())
}
