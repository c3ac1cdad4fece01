//! Client-side framing helpers for object transfer.

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;

use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;
use vaultkeep_core::wire::{FrameCodec, TransferFrame, encode_frame};

/// Chunk size used when splitting an upload into data frames.
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Build the complete framed body for an upload: one name frame followed
/// by chunk frames.
///
/// The body is assembled up front so a retried request can resend
/// identical bytes.
pub fn build_upload_body(name: &str, data: &Bytes) -> AppResult<Bytes> {
    let mut body = BytesMut::new();
    body.extend_from_slice(&encode_frame(TransferFrame::Name(name.to_string()))?);

    for chunk in data.chunks(UPLOAD_CHUNK_BYTES) {
        body.extend_from_slice(&encode_frame(TransferFrame::Chunk(
            Bytes::copy_from_slice(chunk),
        ))?);
    }

    Ok(body.freeze())
}

/// Decode a framed download body into the object name and its bytes.
///
/// The first frame must be the name frame; any other opening frame is a
/// protocol violation.
pub async fn read_download_body<S>(stream: S) -> AppResult<(String, Bytes)>
where
    S: futures::Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
{
    let reader = StreamReader::new(stream);
    let mut frames = FramedRead::new(reader, FrameCodec::default());

    let name = match frames.next().await {
        Some(Ok(TransferFrame::Name(name))) => name,
        Some(Ok(TransferFrame::Chunk(_))) => {
            return Err(AppError::invalid_frame(
                "download opened with a data frame instead of the name frame",
            ));
        }
        Some(Err(e)) => return Err(e),
        None => return Err(AppError::invalid_frame("download body was empty")),
    };

    let mut data = BytesMut::new();
    while let Some(frame) = frames.next().await {
        match frame? {
            TransferFrame::Chunk(chunk) => data.extend_from_slice(&chunk),
            TransferFrame::Name(_) => {
                return Err(AppError::invalid_frame(
                    "download carried a second name frame",
                ));
            }
        }
    }

    Ok((name, data.freeze()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultkeep_core::error::ErrorKind;

    #[tokio::test]
    async fn upload_body_roundtrips_through_download_reader() {
        let data = Bytes::from(vec![7u8; UPLOAD_CHUNK_BYTES * 2 + 100]);
        let body = build_upload_body("archive.tar", &data).unwrap();

        let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(body) });
        let (name, decoded) = read_download_body(Box::pin(stream)).await.unwrap();

        assert_eq!(name, "archive.tar");
        assert_eq!(decoded, data);
    }

    #[tokio::test]
    async fn chunk_before_name_is_rejected() {
        let body = encode_frame(TransferFrame::Chunk(Bytes::from_static(b"rogue"))).unwrap();
        let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(body) });

        let err = read_download_body(Box::pin(stream)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let stream = futures::stream::empty::<Result<Bytes, std::io::Error>>();
        let err = read_download_body(Box::pin(stream)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFrame);
    }
}
