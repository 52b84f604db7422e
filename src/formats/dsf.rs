//! DSF (DSD Stream File) container reader
//!
//! DSF files open with a fixed 28-byte "DSD " chunk: a 4-byte signature
//! followed by three unsigned 64-bit little-endian fields giving the chunk
//! size, the total file size and the absolute byte offset of the embedded
//! ID3v2 block. The reader parses the header, seeks to that offset and
//! delegates the block to an [`EmbeddedTagDecoder`]; the decoded metadata is
//! wrapped so that `file_type()` reports the DSF container instead of the tag
//! dialect's native home.
//!
//! ## Known Limitations
//! - The metadata pointer is trusted as-is: no bounds or zero check is made
//!   before seeking. A pointer outside the stream fails at the seek or inside
//!   the embedded decoder, never silently.
//! - All I/O is blocking and the reader assumes exclusive ownership of the
//!   stream cursor for the duration of one call; callers sharing a handle
//!   across threads must serialize access themselves.

use crate::endian::decode_le;
use crate::formats::EmbeddedTagDecoder;
use crate::id3v2::{Id3v2Decoder, Id3v2Metadata};
use crate::types::{FileType, Metadata, Phase, Picture, Result, TagError, TagFormat, Value};
use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

/// Signature opening every DSF file
pub const DSF_SIGNATURE: [u8; 4] = *b"DSD ";

/// Fixed-layout header of the leading DSD chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsfHeader {
    /// Size of the DSD chunk itself (28 in practice)
    pub chunk_size: u64,
    /// Total file size as recorded by the writer
    pub file_size: u64,
    /// Absolute byte offset of the embedded tag block
    pub metadata_pointer: u64,
}

impl DsfHeader {
    /// Parse the container header and position the stream at the tag block.
    ///
    /// Reads the 4-byte signature and the three 8-byte little-endian fields,
    /// then seeks to `metadata_pointer`. A signature mismatch fails after
    /// exactly those four bytes with no further reads. On any failure the
    /// stream cursor is left wherever the failing operation stopped.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<DsfHeader> {
        let mut signature = [0u8; 4];
        reader
            .read_exact(&mut signature)
            .map_err(|e| TagError::io(Phase::HeaderRead, e))?;
        if signature != DSF_SIGNATURE {
            return Err(TagError::UnknownFormat(signature));
        }

        let chunk_size = read_u64_le(reader)?;
        let file_size = read_u64_le(reader)?;
        let metadata_pointer = read_u64_le(reader)?;

        log::debug!(
            "DSF header: chunk_size={}, file_size={}, metadata at offset {}",
            chunk_size,
            file_size,
            metadata_pointer
        );

        reader
            .seek(SeekFrom::Start(metadata_pointer))
            .map_err(|e| TagError::io(Phase::Seek, e))?;

        Ok(DsfHeader {
            chunk_size,
            file_size,
            metadata_pointer,
        })
    }
}

/// Read one 8-byte little-endian header field
fn read_u64_le<R: Read>(reader: &mut R) -> Result<u64> {
    let mut field = [0u8; 8];
    reader
        .read_exact(&mut field)
        .map_err(|e| TagError::io(Phase::HeaderRead, e))?;
    Ok(decode_le(&field))
}

/// DSF container reader - entry point for metadata extraction
pub struct DsfReader;

impl DsfReader {
    /// Read DSF metadata from the stream, decoding the embedded block as ID3v2.
    ///
    /// # Example
    /// ```no_run
    /// use dsf_tag_decoder::{DsfReader, Metadata};
    /// use std::fs::File;
    ///
    /// let mut file = File::open("track01.dsf").unwrap();
    /// let meta = DsfReader::read(&mut file).unwrap();
    /// println!("{:?} by {:?}", meta.title(), meta.artist());
    /// ```
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<DsfMetadata<Id3v2Metadata>> {
        Self::read_with(reader, &Id3v2Decoder)
    }

    /// Read DSF metadata using a caller-supplied embedded tag decoder.
    ///
    /// Extraction is all-or-nothing: header parse, seek and embedded decode
    /// run sequentially on the caller's thread and the first failure aborts
    /// the call without a metadata object.
    pub fn read_with<R, D>(reader: &mut R, decoder: &D) -> Result<DsfMetadata<D::Output>>
    where
        R: Read + Seek,
        D: EmbeddedTagDecoder,
    {
        let header = DsfHeader::read_from(reader)?;
        let inner = decoder.decode(reader)?;

        log::info!("DSF metadata extracted ({})", inner.format());

        Ok(DsfMetadata {
            inner,
            chunk_size: header.chunk_size,
            file_size: header.file_size,
        })
    }
}

/// Metadata read from a DSF container
///
/// Wraps the embedded tag block's metadata and forwards every accessor to it
/// unchanged, except [`Metadata::file_type`], which reports the DSF container
/// itself. The tag dialect found inside stays visible through
/// [`Metadata::format`]. Immutable once constructed; nothing is memoized, so
/// each accessor call re-queries the inner object.
#[derive(Debug, Clone)]
pub struct DsfMetadata<M> {
    inner: M,
    chunk_size: u64,
    file_size: u64,
}

impl<M> DsfMetadata<M> {
    /// Size of the DSD chunk, copied from the container header
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Total file size recorded in the container header
    pub fn file_size(&self) -> u64 {
        self.file_size
    }
}

impl<M: Metadata> Metadata for DsfMetadata<M> {
    fn format(&self) -> TagFormat {
        self.inner.format()
    }

    // Container identity comes from the reader that produced this adapter,
    // never from what the embedded block reports about itself.
    fn file_type(&self) -> FileType {
        FileType::Dsf
    }

    fn title(&self) -> Option<&str> {
        self.inner.title()
    }

    fn album(&self) -> Option<&str> {
        self.inner.album()
    }

    fn artist(&self) -> Option<&str> {
        self.inner.artist()
    }

    fn album_artist(&self) -> Option<&str> {
        self.inner.album_artist()
    }

    fn composer(&self) -> Option<&str> {
        self.inner.composer()
    }

    fn year(&self) -> Option<i32> {
        self.inner.year()
    }

    fn genre(&self) -> Option<&str> {
        self.inner.genre()
    }

    fn track(&self) -> (Option<u32>, Option<u32>) {
        self.inner.track()
    }

    fn disc(&self) -> (Option<u32>, Option<u32>) {
        self.inner.disc()
    }

    fn picture(&self) -> Option<Picture<'_>> {
        self.inner.picture()
    }

    fn lyrics(&self) -> Option<&str> {
        self.inner.lyrics()
    }

    fn raw(&self) -> BTreeMap<String, Value> {
        self.inner.raw()
    }
}
