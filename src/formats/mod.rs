//! Container format readers
//!
//! Each reader parses the outer envelope of one audio container format,
//! positions the stream at the embedded tag block and hands it to an
//! [`EmbeddedTagDecoder`] for the actual tag parsing.

use crate::types::{Metadata, Result};
use std::io::{Read, Seek};

pub mod dsf;

// Re-export reader types
pub use dsf::{DsfHeader, DsfMetadata, DsfReader, DSF_SIGNATURE};

/// Decode contract for an embedded tag block.
///
/// A container reader seeks the stream to the start of the block before
/// delegating here; the block's own byte layout (signature, flags, frame
/// table) is entirely the decoder's concern. Decoders are synchronous and
/// consume the stream from its current position.
pub trait EmbeddedTagDecoder {
    /// Metadata produced on a successful decode
    type Output: Metadata;

    /// Decode the tag block at the stream's current position
    fn decode<R: Read + Seek>(&self, reader: &mut R) -> Result<Self::Output>;
}
