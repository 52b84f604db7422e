//! ID3v2 embedded tag decoder
//!
//! Default implementation of the embedded decode contract, backed by the
//! `id3` crate. The decoder reads an ID3v2.2/2.3/2.4 block at the stream's
//! current position; [`Id3v2Metadata`] then maps the parsed frames onto the
//! uniform [`Metadata`] surface. The block's own byte layout (sync-safe
//! sizes, frame flags, text encodings) is entirely the `id3` crate's concern.

use crate::formats::EmbeddedTagDecoder;
use crate::types::{
    FileType, Metadata, Picture, PictureKind, Result, TagError, TagFormat, Value,
};
use id3::frame::{Content, PictureType};
use id3::{Tag, TagLike, Version};
use std::collections::BTreeMap;
use std::io::{Read, Seek};

/// Decodes an ID3v2 block at the current stream position
pub struct Id3v2Decoder;

impl EmbeddedTagDecoder for Id3v2Decoder {
    type Output = Id3v2Metadata;

    fn decode<R: Read + Seek>(&self, reader: &mut R) -> Result<Id3v2Metadata> {
        let tag = Tag::read_from2(&mut *reader)
            .map_err(|e| TagError::Decode(format!("ID3v2 block rejected: {}", e)))?;
        Ok(Id3v2Metadata::new(tag))
    }
}

/// Metadata backed by a parsed ID3v2 tag
#[derive(Debug, Clone)]
pub struct Id3v2Metadata {
    tag: Tag,
}

impl Id3v2Metadata {
    pub fn new(tag: Tag) -> Self {
        Self { tag }
    }

    /// Best-effort string value of a text frame by id.
    fn text_frame(&self, id: &str) -> Option<&str> {
        match self.tag.get(id)?.content() {
            Content::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Metadata for Id3v2Metadata {
    fn format(&self) -> TagFormat {
        match self.tag.version() {
            Version::Id3v22 => TagFormat::Id3v2_2,
            Version::Id3v23 => TagFormat::Id3v2_3,
            Version::Id3v24 => TagFormat::Id3v2_4,
        }
    }

    // Bare ID3v2 blocks live in MPEG streams; container readers wrapping this
    // metadata report their own identity instead.
    fn file_type(&self) -> FileType {
        FileType::Mp3
    }

    fn title(&self) -> Option<&str> {
        self.tag.title()
    }

    fn album(&self) -> Option<&str> {
        self.tag.album()
    }

    fn artist(&self) -> Option<&str> {
        self.tag.artist()
    }

    fn album_artist(&self) -> Option<&str> {
        self.tag.album_artist()
    }

    fn composer(&self) -> Option<&str> {
        self.text_frame("TCOM")
    }

    fn year(&self) -> Option<i32> {
        self.tag.year()
    }

    fn genre(&self) -> Option<&str> {
        self.tag.genre()
    }

    fn track(&self) -> (Option<u32>, Option<u32>) {
        (self.tag.track(), self.tag.total_tracks())
    }

    fn disc(&self) -> (Option<u32>, Option<u32>) {
        (self.tag.disc(), self.tag.total_discs())
    }

    fn picture(&self) -> Option<Picture<'_>> {
        for frame in self.tag.frames() {
            if frame.id() != "APIC" && frame.id() != "PIC" {
                continue;
            }
            if let Content::Picture(p) = frame.content() {
                return Some(Picture {
                    mime_type: &p.mime_type,
                    kind: match p.picture_type {
                        PictureType::CoverFront => PictureKind::CoverFront,
                        PictureType::CoverBack => PictureKind::CoverBack,
                        _ => PictureKind::Other,
                    },
                    description: &p.description,
                    data: &p.data,
                });
            }
        }
        None
    }

    fn lyrics(&self) -> Option<&str> {
        for frame in self.tag.frames() {
            if frame.id() == "USLT" {
                if let Content::Lyrics(l) = frame.content() {
                    return Some(l.text.as_str());
                }
            }
        }
        None
    }

    fn raw(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();

        for frame in self.tag.frames() {
            // TXXX/WXXX frames are only distinguished by their description.
            let key = match frame.content() {
                Content::ExtendedText(et) => format!("{}/{}", frame.id(), et.description),
                Content::ExtendedLink(el) => format!("{}/{}", frame.id(), el.description),
                _ => frame.id().to_string(),
            };

            let value = match frame.content() {
                Content::Text(s) => Value::Text(s.clone()),
                Content::ExtendedText(et) => Value::Text(et.value.clone()),
                Content::Link(url) => Value::Text(url.clone()),
                Content::ExtendedLink(el) => Value::Text(el.link.clone()),
                Content::Comment(c) => Value::Text(c.text.clone()),
                Content::Lyrics(l) => Value::Text(l.text.clone()),
                Content::Picture(p) => Value::Binary(p.data.clone()),
                other => match other.to_unknown() {
                    Ok(unknown) => Value::Binary(unknown.into_owned().data),
                    Err(_) => continue,
                },
            };

            out.insert(key, value);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::frame::{ExtendedText, Frame, Lyrics};

    fn sample_tag() -> Tag {
        let mut tag = Tag::new();
        tag.set_title("Giant Steps");
        tag.set_artist("John Coltrane");
        tag.set_album("Giant Steps");
        tag.set_year(1960);
        tag.set_genre("Jazz");
        tag.set_track(1);
        tag.set_total_tracks(7);
        tag.add_frame(Frame::with_content("TCOM", Content::Text("Coltrane".into())));
        tag.add_frame(Frame::with_content(
            "USLT",
            Content::Lyrics(Lyrics {
                lang: "eng".to_string(),
                description: String::new(),
                text: "instrumental".to_string(),
            }),
        ));
        tag.add_frame(Frame::with_content(
            "TXXX",
            Content::ExtendedText(ExtendedText {
                description: "MOOD".to_string(),
                value: "modal".to_string(),
            }),
        ));
        tag
    }

    #[test]
    fn test_accessors_map_frames() {
        let meta = Id3v2Metadata::new(sample_tag());

        assert_eq!(meta.title(), Some("Giant Steps"));
        assert_eq!(meta.artist(), Some("John Coltrane"));
        assert_eq!(meta.album(), Some("Giant Steps"));
        assert_eq!(meta.year(), Some(1960));
        assert_eq!(meta.genre(), Some("Jazz"));
        assert_eq!(meta.composer(), Some("Coltrane"));
        assert_eq!(meta.track(), (Some(1), Some(7)));
        assert_eq!(meta.disc(), (None, None));
        assert_eq!(meta.lyrics(), Some("instrumental"));
        assert_eq!(meta.file_type(), FileType::Mp3);
    }

    #[test]
    fn test_absent_fields_are_none() {
        let meta = Id3v2Metadata::new(Tag::new());

        assert_eq!(meta.title(), None);
        assert_eq!(meta.album_artist(), None);
        assert_eq!(meta.composer(), None);
        assert_eq!(meta.year(), None);
        assert_eq!(meta.track(), (None, None));
        assert!(meta.picture().is_none());
        assert!(meta.lyrics().is_none());
        assert!(meta.raw().is_empty());
    }

    #[test]
    fn test_raw_keys_follow_frame_ids() {
        let meta = Id3v2Metadata::new(sample_tag());
        let raw = meta.raw();

        assert_eq!(raw.get("TIT2"), Some(&Value::Text("Giant Steps".into())));
        assert_eq!(raw.get("TCOM"), Some(&Value::Text("Coltrane".into())));
        assert_eq!(raw.get("TXXX/MOOD"), Some(&Value::Text("modal".into())));
        assert_eq!(raw.get("USLT"), Some(&Value::Text("instrumental".into())));
    }

    #[test]
    fn test_decoder_rejects_garbage() {
        let mut cursor = std::io::Cursor::new(vec![0u8; 64]);
        match Id3v2Decoder.decode(&mut cursor) {
            Err(TagError::Decode(_)) => {}
            other => panic!("expected Decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decoder_reads_block_at_current_position() {
        let mut buf = Vec::new();
        sample_tag().write_to(&mut buf, Version::Id3v24).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let meta = Id3v2Decoder.decode(&mut cursor).unwrap();
        assert_eq!(meta.title(), Some("Giant Steps"));
        assert_eq!(meta.format(), TagFormat::Id3v2_4);
    }
}
