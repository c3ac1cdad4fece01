//! Length-delimited transfer frames and their codec.
//!
//! Frame layout on the wire:
//!
//! ```text
//! +-----+------------+-------------------+
//! | tag | len (u32be)| payload (len bytes)|
//! +-----+------------+-------------------+
//! ```
//!
//! Tag `0x01` is a metadata frame whose payload is the UTF-8 object name;
//! tag `0x02` is a data frame whose payload is a raw chunk. A transfer is
//! exactly one name frame followed by zero or more chunk frames.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::AppError;
use crate::result::AppResult;

/// Frame tag for the object-name metadata frame.
const NAME_TAG: u8 = 0x01;
/// Frame tag for a data chunk frame.
const CHUNK_TAG: u8 = 0x02;
/// Bytes occupied by the tag + length header.
const HEADER_LEN: usize = 5;

/// Default maximum frame payload accepted by [`FrameCodec`].
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// One message within a streaming transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferFrame {
    /// Metadata frame carrying the object name.
    Name(String),
    /// Data frame carrying a chunk of object bytes.
    Chunk(Bytes),
}

/// Encoder/decoder for [`TransferFrame`]s over a byte stream.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    /// Largest payload the decoder will accept before rejecting the stream.
    max_frame_bytes: usize,
}

impl FrameCodec {
    /// Create a codec with the given maximum frame payload size.
    pub fn new(max_frame_bytes: usize) -> Self {
        Self { max_frame_bytes }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_BYTES)
    }
}

impl Decoder for FrameCodec {
    type Item = TransferFrame;
    type Error = AppError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TransferFrame>, AppError> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let tag = src[0];
        let len = u32::from_be_bytes([src[1], src[2], src[3], src[4]]) as usize;

        if len > self.max_frame_bytes {
            return Err(AppError::invalid_frame(format!(
                "frame payload of {len} bytes exceeds the {} byte limit",
                self.max_frame_bytes
            )));
        }

        if src.len() < HEADER_LEN + len {
            src.reserve(HEADER_LEN + len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let payload = src.split_to(len).freeze();

        match tag {
            NAME_TAG => {
                let name = String::from_utf8(payload.to_vec())
                    .map_err(|_| AppError::invalid_frame("object name is not valid UTF-8"))?;
                Ok(Some(TransferFrame::Name(name)))
            }
            CHUNK_TAG => Ok(Some(TransferFrame::Chunk(payload))),
            other => Err(AppError::invalid_frame(format!(
                "unknown frame tag 0x{other:02x}"
            ))),
        }
    }
}

impl Encoder<TransferFrame> for FrameCodec {
    type Error = AppError;

    fn encode(&mut self, frame: TransferFrame, dst: &mut BytesMut) -> Result<(), AppError> {
        let (tag, payload) = match frame {
            TransferFrame::Name(name) => (NAME_TAG, Bytes::from(name.into_bytes())),
            TransferFrame::Chunk(chunk) => (CHUNK_TAG, chunk),
        };

        if payload.len() > self.max_frame_bytes {
            return Err(AppError::invalid_frame(format!(
                "frame payload of {} bytes exceeds the {} byte limit",
                payload.len(),
                self.max_frame_bytes
            )));
        }

        dst.reserve(HEADER_LEN + payload.len());
        dst.put_u8(tag);
        dst.put_u32(payload.len() as u32);
        dst.put_slice(&payload);
        Ok(())
    }
}

/// Encode a single frame into a standalone byte buffer.
///
/// Convenience for building framed response streams without holding a
/// codec between frames.
pub fn encode_frame(frame: TransferFrame) -> AppResult<Bytes> {
    let mut codec = FrameCodec::default();
    let mut buf = BytesMut::new();
    codec.encode(frame, &mut buf)?;
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn decode_all(mut buf: BytesMut) -> Vec<TransferFrame> {
        let mut codec = FrameCodec::default();
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut buf).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn roundtrip_name_and_chunks() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        codec
            .encode(TransferFrame::Name("report.txt".into()), &mut buf)
            .unwrap();
        codec
            .encode(TransferFrame::Chunk(Bytes::from_static(b"hello ")), &mut buf)
            .unwrap();
        codec
            .encode(TransferFrame::Chunk(Bytes::from_static(b"world")), &mut buf)
            .unwrap();

        let frames = decode_all(buf);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], TransferFrame::Name("report.txt".into()));
        assert_eq!(frames[2], TransferFrame::Chunk(Bytes::from_static(b"world")));
    }

    #[test]
    fn partial_header_yields_none() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[NAME_TAG, 0, 0][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn partial_payload_yields_none_until_complete() {
        let full = encode_frame(TransferFrame::Chunk(Bytes::from_static(b"abcdef"))).unwrap();

        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&full[..7]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&full[7..]);
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame, TransferFrame::Chunk(Bytes::from_static(b"abcdef")));
        assert!(buf.is_empty());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0x7f, 0, 0, 0, 1, b'x'][..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let mut codec = FrameCodec::new(8);
        let err = codec
            .encode(
                TransferFrame::Chunk(Bytes::from_static(b"way too large")),
                &mut BytesMut::new(),
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);

        let mut buf = BytesMut::from(&[CHUNK_TAG, 0xff, 0xff, 0xff, 0xff][..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);
    }

    #[test]
    fn invalid_utf8_name_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_u8(NAME_TAG);
        buf.put_u32(2);
        buf.put_slice(&[0xff, 0xfe]);

        let mut codec = FrameCodec::default();
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);
    }
}
