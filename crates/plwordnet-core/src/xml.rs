//! Streaming reader for plWordNet XML dumps
//!
//! Produces one [`RawRecord`] per `relationtypes`, `lexical-unit`, `synset`,
//! `synsetrelations` and `lexicalrelations` element, at any depth, with the
//! element attributes as fields. Synset members come from nested
//! `<unit-id>` elements and are stored comma-separated in
//! [`SYNSET_UNITS_FIELD`]. Everything else in the document is skipped.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::record::{RawRecord, RecordKind, SYNSET_UNITS_FIELD};

const UNIT_ID_TAG: &[u8] = b"unit-id";
const SYNSET_TAG: &[u8] = b"synset";

/// Errors raised while reading a dump.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed XML, attribute or text
    #[error("XML error near byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document ended inside an element
    #[error("document ended inside <{tag}>")]
    Unterminated { tag: &'static str },
}

/// Iterator of records over an XML stream.
pub struct RecordReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            finished: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<RawRecord>, XmlError> {
        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| syntax_error(&self.reader, e))?;

            let (element, has_body) = match event {
                Event::Start(element) => (element, true),
                Event::Empty(element) => (element, false),
                Event::Eof => return Ok(None),
                _ => continue,
            };
            let Some(kind) = record_kind(&element) else {
                continue;
            };
            let mut record =
                record_from(kind, &element).map_err(|e| syntax_error(&self.reader, e))?;
            drop(element);

            if kind != RecordKind::Synset {
                return Ok(Some(record));
            }
            if has_body {
                return self.read_members(record).map(Some);
            }
            record
                .fields
                .insert(SYNSET_UNITS_FIELD.to_string(), String::new());
            return Ok(Some(record));
        }
    }

    /// Collect `<unit-id>` texts up to the closing `</synset>`.
    fn read_members(&mut self, mut record: RawRecord) -> Result<RawRecord, XmlError> {
        let mut members: Vec<String> = Vec::new();
        let mut in_unit_id = false;

        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| syntax_error(&self.reader, e))?;

            match event {
                Event::Start(element) if element.name().as_ref() == UNIT_ID_TAG => {
                    in_unit_id = true;
                }
                Event::End(element) if element.name().as_ref() == UNIT_ID_TAG => {
                    in_unit_id = false;
                }
                Event::Text(text) if in_unit_id => {
                    let text = text
                        .unescape()
                        .map_err(|e| syntax_error(&self.reader, e))?;
                    members.push(text.trim().to_string());
                }
                Event::End(element) if element.name().as_ref() == SYNSET_TAG => break,
                Event::Eof => {
                    return Err(XmlError::Unterminated {
                        tag: RecordKind::Synset.tag(),
                    })
                }
                _ => {}
            }
        }

        record
            .fields
            .insert(SYNSET_UNITS_FIELD.to_string(), members.join(","));
        Ok(record)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<RawRecord, XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn record_kind(element: &BytesStart<'_>) -> Option<RecordKind> {
    std::str::from_utf8(element.name().as_ref())
        .ok()
        .and_then(RecordKind::from_tag)
}

fn record_from(kind: RecordKind, element: &BytesStart<'_>) -> Result<RawRecord, quick_xml::Error> {
    let mut record = RawRecord::new(kind);
    for attribute in element.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        record.fields.insert(key, value);
    }
    Ok(record)
}

fn syntax_error<R>(reader: &Reader<R>, source: quick_xml::Error) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        source,
    }
}
