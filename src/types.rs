//! Core types for the DSF tag decoder library
//!
//! This module defines the uniform metadata capability surface that every tag
//! dialect exposes, the value and picture types surfaced through it, and the
//! error taxonomy for container parsing. Callers program against the
//! [`Metadata`] trait and never depend on which dialect backed it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, TagError>;

/// Identity of the outer container a metadata object was read from.
///
/// This is fixed by which reader produced the object, never by what the
/// embedded tag block claims about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    /// DSD Stream File container
    Dsf,
    /// MPEG audio stream (native home of bare ID3v2 tags)
    Mp3,
    /// Container could not be identified
    Unknown,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Dsf => write!(f, "DSF"),
            FileType::Mp3 => write!(f, "MP3"),
            FileType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Tag dialect found inside the embedded metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagFormat {
    Id3v2_2,
    Id3v2_3,
    Id3v2_4,
    Unknown,
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFormat::Id3v2_2 => write!(f, "ID3v2.2"),
            TagFormat::Id3v2_3 => write!(f, "ID3v2.3"),
            TagFormat::Id3v2_4 => write!(f, "ID3v2.4"),
            TagFormat::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Phase of the extraction pipeline an I/O failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the fixed 28-byte container header
    HeaderRead,
    /// Repositioning the stream to the metadata pointer
    Seek,
    /// Decoding the embedded tag block
    EmbeddedDecode,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::HeaderRead => write!(f, "header read"),
            Phase::Seek => write!(f, "seek to metadata"),
            Phase::EmbeddedDecode => write!(f, "embedded tag decode"),
        }
    }
}

/// Errors that can occur during metadata extraction
///
/// Extraction is all-or-nothing: any error aborts the call and no partial
/// metadata object is returned. After a failure the stream cursor is in an
/// unspecified position; callers must re-seek before reading again.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The first four bytes did not match the container signature.
    #[error("unrecognized container signature {0:02X?}")]
    UnknownFormat([u8; 4]),

    /// Short read, out-of-range seek, or other underlying stream failure.
    #[error("I/O error during {phase}: {source}")]
    Io {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },

    /// The embedded decoder rejected the block at the computed offset.
    #[error("embedded tag decode failed: {0}")]
    Decode(String),
}

impl TagError {
    pub(crate) fn io(phase: Phase, source: std::io::Error) -> Self {
        TagError::Io { phase, source }
    }
}

/// Kind of an embedded picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PictureKind {
    CoverFront,
    CoverBack,
    Other,
}

/// Borrowed view of an image embedded in the tag block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Picture<'a> {
    /// MIME type as stored in the tag (e.g. "image/jpeg")
    pub mime_type: &'a str,
    pub kind: PictureKind,
    pub description: &'a str,
    /// Raw image bytes
    pub data: &'a [u8],
}

/// Raw field value as found in the tag block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Textual field content
    Text(String),
    /// Undecoded field payload
    Binary(Vec<u8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Uniform metadata capability surface
///
/// The fixed accessor set every supported tag dialect exposes. Absent fields
/// are `None` (or an empty pair/map); once an implementation exists, every
/// accessor is total. Implementations do not memoize: each call re-queries
/// the underlying tag data.
pub trait Metadata {
    /// Tag dialect backing this metadata (e.g. ID3v2.4)
    fn format(&self) -> TagFormat;
    /// Identity of the container the metadata was read from
    fn file_type(&self) -> FileType;
    fn title(&self) -> Option<&str>;
    fn album(&self) -> Option<&str>;
    fn artist(&self) -> Option<&str>;
    fn album_artist(&self) -> Option<&str>;
    fn composer(&self) -> Option<&str>;
    fn year(&self) -> Option<i32>;
    fn genre(&self) -> Option<&str>;
    /// Track position as (number, total)
    fn track(&self) -> (Option<u32>, Option<u32>);
    /// Disc position as (number, total)
    fn disc(&self) -> (Option<u32>, Option<u32>);
    /// First embedded image, if any
    fn picture(&self) -> Option<Picture<'_>>;
    fn lyrics(&self) -> Option<&str>;
    /// All recognized fields keyed by their native field name
    fn raw(&self) -> BTreeMap<String, Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Text("Abbey Road".into())), "Abbey Road");
        assert_eq!(format!("{}", Value::Binary(vec![1, 2, 3])), "<3 bytes>");
    }

    #[test]
    fn test_error_display_carries_phase() {
        let err = TagError::io(
            Phase::Seek,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad offset"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("seek to metadata"), "got: {}", msg);

        let err = TagError::UnknownFormat(*b"RIFF");
        assert!(format!("{}", err).contains("signature"));
    }

    #[test]
    fn test_file_type_display() {
        assert_eq!(format!("{}", FileType::Dsf), "DSF");
        assert_eq!(format!("{}", TagFormat::Id3v2_4), "ID3v2.4");
    }
}
