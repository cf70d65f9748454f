//! Loading wordnets from files
//!
//! The file name decides how a source is read: a trailing `.xz` or `.gz` is
//! decompressed on the fly, and the remaining extension picks the snapshot
//! codec (`.snap`) or the XML reader (anything else).

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::{debug, info, warn};
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::builder::{BuildError, WordnetBuilder};
use crate::snapshot::{self, SnapshotError};
use crate::wordnet::Wordnet;
use crate::xml::{RecordReader, XmlError};

/// Extension of snapshot files, before any compression suffix.
pub const SNAPSHOT_EXTENSION: &str = "snap";

const GZIP_EXTENSION: &str = "gz";
const XZ_EXTENSION: &str = "xz";
const UNSUPPORTED_COMPRESSION: [&str; 2] = ["bz2", "zst"];

/// Preset used when writing `.xz` snapshots.
const XZ_LEVEL: u32 = 6;

/// Errors raised while loading or dumping a wordnet.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported compression '.{extension}' for {path}")]
    UnsupportedCompression { path: PathBuf, extension: String },

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Payload encoding of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Xml,
    Snapshot,
}

/// Compression wrapped around the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Plain,
    Gzip,
    Xz,
}

/// How a source file is stored, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
    pub kind: SourceKind,
    pub transport: Transport,
}

impl SourceFormat {
    /// Detect the format from the file name.
    pub fn detect(path: &Path) -> Result<Self, LoadError> {
        let extension = |p: &Path| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
        };

        let mut inner = path.to_path_buf();
        let mut transport = Transport::Plain;
        match extension(path) {
            Some(ext) if ext == XZ_EXTENSION => {
                transport = Transport::Xz;
                inner.set_extension("");
            }
            Some(ext) if ext == GZIP_EXTENSION => {
                transport = Transport::Gzip;
                inner.set_extension("");
            }
            Some(ext) if UNSUPPORTED_COMPRESSION.contains(&ext.as_str()) => {
                return Err(LoadError::UnsupportedCompression {
                    path: path.to_path_buf(),
                    extension: ext,
                });
            }
            _ => {}
        }

        let kind = match extension(&inner) {
            Some(ext) if ext == SNAPSHOT_EXTENSION => SourceKind::Snapshot,
            _ => SourceKind::Xml,
        };
        Ok(Self { kind, transport })
    }
}

/// Load a wordnet from an XML dump or a snapshot, optionally xz or gzip
/// compressed.
pub fn load(path: impl AsRef<Path>) -> Result<Wordnet, LoadError> {
    let path = path.as_ref();
    let format = SourceFormat::detect(path)?;
    info!("Loading wordnet from {} ({:?})", path.display(), format);

    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let stream: Box<dyn Read> = match format.transport {
        Transport::Plain => Box::new(file),
        Transport::Gzip => Box::new(GzDecoder::new(file)),
        Transport::Xz => Box::new(XzDecoder::new(file)),
    };

    match format.kind {
        SourceKind::Xml => load_from_reader(BufReader::new(stream)),
        SourceKind::Snapshot => {
            let mut bytes = Vec::new();
            BufReader::new(stream)
                .read_to_end(&mut bytes)
                .map_err(|e| LoadError::io(path, e))?;
            Ok(snapshot::deserialize(&bytes)?)
        }
    }
}

/// Build a wordnet from an already opened XML stream.
pub fn load_from_reader<R: BufRead>(reader: R) -> Result<Wordnet, LoadError> {
    let mut builder = WordnetBuilder::new();
    for record in RecordReader::new(reader) {
        builder.push(record?)?;
    }
    debug!("Read {} records", builder.len());
    Ok(builder.finish()?)
}

impl Wordnet {
    /// Write this wordnet as a snapshot, compressed when `path` ends in `.xz`
    /// or `.gz`.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let format = SourceFormat::detect(path)?;
        if format.kind != SourceKind::Snapshot {
            warn!(
                "{} lacks the .{} extension and will not load as a snapshot",
                path.display(),
                SNAPSHOT_EXTENSION
            );
        }

        let bytes = snapshot::serialize(self)?;
        let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
        let written = match format.transport {
            Transport::Plain => {
                let mut file = file;
                file.write_all(&bytes).and_then(|_| file.flush())
            }
            Transport::Gzip => {
                let mut encoder = GzEncoder::new(file, Compression::default());
                encoder
                    .write_all(&bytes)
                    .and_then(|_| encoder.finish())
                    .map(|_| ())
            }
            Transport::Xz => {
                let mut encoder = XzEncoder::new(file, XZ_LEVEL);
                encoder
                    .write_all(&bytes)
                    .and_then(|_| encoder.finish())
                    .map(|_| ())
            }
        };
        written.map_err(|e| LoadError::io(path, e))?;

        info!("Wrote snapshot to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(name: &str) -> Result<SourceFormat, LoadError> {
        SourceFormat::detect(Path::new(name))
    }

    #[test]
    fn test_detect_formats() {
        let plain = detect("plwordnet.xml").unwrap();
        assert_eq!(plain.kind, SourceKind::Xml);
        assert_eq!(plain.transport, Transport::Plain);

        let gz = detect("plwordnet.xml.gz").unwrap();
        assert_eq!(gz.kind, SourceKind::Xml);
        assert_eq!(gz.transport, Transport::Gzip);

        let xz = detect("plwordnet.xml.XZ").unwrap();
        assert_eq!(xz.kind, SourceKind::Xml);
        assert_eq!(xz.transport, Transport::Xz);

        let snap = detect("cache/plwordnet.SNAP.gz").unwrap();
        assert_eq!(snap.kind, SourceKind::Snapshot);
        assert_eq!(snap.transport, Transport::Gzip);

        let snap_xz = detect("plwordnet.snap.xz").unwrap();
        assert_eq!(snap_xz.kind, SourceKind::Snapshot);
        assert_eq!(snap_xz.transport, Transport::Xz);

        assert_eq!(detect("no-extension").unwrap().kind, SourceKind::Xml);
    }

    #[test]
    fn test_detect_unsupported_compression() {
        let err = detect("plwordnet.xml.bz2").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedCompression { ref extension, .. } if extension == "bz2"
        ));
        assert_eq!(
            err.to_string(),
            "unsupported compression '.bz2' for plwordnet.xml.bz2"
        );
    }

    #[test]
    fn test_load_from_reader() {
        let xml = r#"<array-list>
            <lexical-unit id="1" name="dom" variant="1" tagcount="0"/>
            <synset id="5" split="1"><unit-id>1</unit-id></synset>
        </array-list>"#;
        let wordnet = load_from_reader(xml.as_bytes()).unwrap();
        assert_eq!(wordnet.synset(5).unwrap().members, vec![1]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/plwordnet.xml").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
