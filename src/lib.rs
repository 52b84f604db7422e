//! DSF Tag Decoder Library
//!
//! A small, synchronous library for extracting descriptive metadata (title,
//! artist, album, ...) from DSF (DSD Stream File) audio containers.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on extraction:
//! - Parses the fixed 28-byte DSD chunk header and follows its metadata
//!   pointer to the embedded ID3v2 block
//! - Delegates the block itself to an embedded tag decoder (the `id3` crate
//!   by default, pluggable through [`EmbeddedTagDecoder`])
//! - Presents the result through one uniform [`Metadata`] capability surface,
//!   so callers never depend on the tag dialect found inside
//!
//! The library does NOT:
//! - Write or modify tags
//! - Decode audio samples
//! - Validate checksums or repair corrupt containers
//!
//! All I/O is blocking and runs on the caller's thread; a reader assumes
//! exclusive ownership of the stream cursor for the duration of one call, so
//! callers sharing one handle across threads must serialize access.
//!
//! # Example Usage
//!
//! ```no_run
//! use dsf_tag_decoder::{DsfReader, Metadata};
//! use std::fs::File;
//!
//! let mut file = File::open("album/track01.dsf").unwrap();
//!
//! let meta = DsfReader::read(&mut file).unwrap();
//! println!(
//!     "{} - {} [{}]",
//!     meta.artist().unwrap_or("?"),
//!     meta.title().unwrap_or("?"),
//!     meta.file_type(),
//! );
//! ```

// Public modules
pub mod endian;
pub mod formats;
pub mod id3v2;
pub mod types;

// Re-export main types for convenience
pub use formats::dsf::{DsfHeader, DsfMetadata, DsfReader, DSF_SIGNATURE};
pub use formats::EmbeddedTagDecoder;
pub use id3v2::{Id3v2Decoder, Id3v2Metadata};
pub use types::{
    FileType, Metadata, Phase, Picture, PictureKind, Result, TagError, TagFormat, Value,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty stream is not a DSF container
        let mut empty = std::io::Cursor::new(Vec::new());
        assert!(DsfReader::read(&mut empty).is_err());
        assert!(!VERSION.is_empty());
    }
}
