//! Chunked upload boundary to the remote enhancement step.
//!
//! The remote processor is opaque: it receives a chunk count and a declared
//! file type, then indexed binary chunks, and on finalize answers with bytes
//! to decode (or an error message). [`EnhancementService`] models that
//! protocol; [`PassThroughService`] reassembles the chunks locally and hands
//! the original bytes back.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::decode::SourceImage;

/// Chunk size used by [`upload`] callers that have no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Chunk {index} is out of range for an upload of {total} chunks")]
    ChunkOutOfRange { index: u32, total: u32 },

    #[error("Upload incomplete: {missing} of {total} chunks missing")]
    MissingChunks { missing: usize, total: u32 },

    #[error("Upload contains no data")]
    EmptyUpload,

    /// A chunk or finalize call arrived without a started upload.
    #[error("No upload in progress")]
    NotStarted,

    /// Error message reported by the remote side.
    #[error("Enhancement failed: {0}")]
    Remote(String),
}

/// Collects indexed chunks until all `total_chunks` have arrived.
#[derive(Debug, Clone)]
pub struct ChunkAssembler {
    total_chunks: u32,
    file_type: String,
    chunks: BTreeMap<u32, Vec<u8>>,
}

impl ChunkAssembler {
    pub fn new(total_chunks: u32, file_type: impl Into<String>) -> Result<Self, UploadError> {
        if total_chunks == 0 {
            return Err(UploadError::EmptyUpload);
        }
        Ok(Self {
            total_chunks,
            file_type: file_type.into(),
            chunks: BTreeMap::new(),
        })
    }

    pub fn total_chunks(&self) -> u32 {
        self.total_chunks
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Store chunk `index`. A resent index replaces the earlier copy.
    pub fn add_chunk(&mut self, index: u32, bytes: &[u8]) -> Result<(), UploadError> {
        if index >= self.total_chunks {
            return Err(UploadError::ChunkOutOfRange {
                index,
                total: self.total_chunks,
            });
        }
        self.chunks.insert(index, bytes.to_vec());
        Ok(())
    }

    pub fn received(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_complete(&self) -> bool {
        self.chunks.len() == self.total_chunks as usize
    }

    /// Concatenate the chunks in index order.
    pub fn finalize(self) -> Result<SourceImage, UploadError> {
        if !self.is_complete() {
            return Err(UploadError::MissingChunks {
                missing: self.total_chunks as usize - self.chunks.len(),
                total: self.total_chunks,
            });
        }

        let bytes: Vec<u8> = self.chunks.into_values().flatten().collect();
        if bytes.is_empty() {
            return Err(UploadError::EmptyUpload);
        }
        Ok(SourceImage::new(bytes, self.file_type))
    }
}

/// Split `bytes` into pieces of at most `chunk_size` bytes (minimum 1).
pub fn split_into_chunks(bytes: &[u8], chunk_size: usize) -> std::slice::Chunks<'_, u8> {
    bytes.chunks(chunk_size.max(1))
}

/// Remote enhancement step, seen from the client.
pub trait EnhancementService {
    fn start(&mut self, total_chunks: u32, file_type: &str) -> Result<(), UploadError>;

    fn send_chunk(&mut self, index: u32, bytes: &[u8]) -> Result<(), UploadError>;

    /// Returns the processed bytes, in whatever encoding the service chose.
    fn finalize(&mut self) -> Result<SourceImage, UploadError>;
}

/// Service that returns the uploaded bytes unchanged.
#[derive(Debug, Default)]
pub struct PassThroughService {
    pending: Option<ChunkAssembler>,
}

impl PassThroughService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnhancementService for PassThroughService {
    fn start(&mut self, total_chunks: u32, file_type: &str) -> Result<(), UploadError> {
        self.pending = Some(ChunkAssembler::new(total_chunks, file_type)?);
        Ok(())
    }

    fn send_chunk(&mut self, index: u32, bytes: &[u8]) -> Result<(), UploadError> {
        self.pending
            .as_mut()
            .ok_or(UploadError::NotStarted)?
            .add_chunk(index, bytes)
    }

    fn finalize(&mut self) -> Result<SourceImage, UploadError> {
        self.pending.take().ok_or(UploadError::NotStarted)?.finalize()
    }
}

/// Run the full start / send / finalize exchange for `source`.
pub fn upload<S: EnhancementService + ?Sized>(
    service: &mut S,
    source: &SourceImage,
    chunk_size: usize,
) -> Result<SourceImage, UploadError> {
    if source.bytes.is_empty() {
        return Err(UploadError::EmptyUpload);
    }

    let chunks = split_into_chunks(&source.bytes, chunk_size);
    let total = u32::try_from(chunks.len()).map_err(|_| UploadError::ChunkOutOfRange {
        index: u32::MAX,
        total: u32::MAX,
    })?;

    service.start(total, &source.mime_type)?;
    for (index, chunk) in (0..total).zip(chunks) {
        service.send_chunk(index, chunk)?;
    }
    debug!(total, bytes = source.bytes.len(), "upload sent");
    service.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let data: Vec<u8> = (0..10).collect();
        let chunks: Vec<&[u8]> = split_into_chunks(&data, 4).collect();
        assert_eq!(chunks, vec![&[0, 1, 2, 3][..], &[4, 5, 6, 7], &[8, 9]]);
    }

    #[test]
    fn test_split_zero_chunk_size() {
        assert_eq!(split_into_chunks(&[1, 2, 3], 0).count(), 3);
    }

    #[test]
    fn test_assembler_out_of_order() {
        let mut asm = ChunkAssembler::new(3, "image/png").unwrap();
        asm.add_chunk(2, &[5, 6]).unwrap();
        asm.add_chunk(0, &[1, 2]).unwrap();
        asm.add_chunk(1, &[3, 4]).unwrap();
        let source = asm.finalize().unwrap();
        assert_eq!(source.bytes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(source.mime_type, "image/png");
    }

    #[test]
    fn test_assembler_rejects_out_of_range() {
        let mut asm = ChunkAssembler::new(2, "image/jpeg").unwrap();
        assert_eq!(
            asm.add_chunk(2, &[1]),
            Err(UploadError::ChunkOutOfRange { index: 2, total: 2 })
        );
    }

    #[test]
    fn test_assembler_missing_chunks() {
        let mut asm = ChunkAssembler::new(3, "image/jpeg").unwrap();
        asm.add_chunk(1, &[1]).unwrap();
        assert_eq!(
            asm.finalize().unwrap_err(),
            UploadError::MissingChunks { missing: 2, total: 3 }
        );
    }

    #[test]
    fn test_assembler_resend_replaces() {
        let mut asm = ChunkAssembler::new(1, "image/png").unwrap();
        asm.add_chunk(0, &[1]).unwrap();
        asm.add_chunk(0, &[9, 9]).unwrap();
        assert_eq!(asm.received(), 1);
        assert_eq!(asm.finalize().unwrap().bytes, vec![9, 9]);
    }

    #[test]
    fn test_zero_chunks_is_empty_upload() {
        assert_eq!(
            ChunkAssembler::new(0, "image/png").unwrap_err(),
            UploadError::EmptyUpload
        );
    }

    #[test]
    fn test_pass_through_round_trip() {
        let source = SourceImage::new((0..=255u8).cycle().take(3000).collect(), "image/webp");
        let mut service = PassThroughService::new();
        let out = upload(&mut service, &source, 1024).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_pass_through_requires_start() {
        let mut service = PassThroughService::new();
        assert_eq!(service.send_chunk(0, &[1]), Err(UploadError::NotStarted));
        assert_eq!(service.finalize().unwrap_err(), UploadError::NotStarted);
    }

    #[test]
    fn test_upload_empty_source() {
        let mut service = PassThroughService::new();
        let source = SourceImage::new(Vec::new(), "image/png");
        assert_eq!(
            upload(&mut service, &source, 16).unwrap_err(),
            UploadError::EmptyUpload
        );
    }

    struct FailingService;

    impl EnhancementService for FailingService {
        fn start(&mut self, _: u32, _: &str) -> Result<(), UploadError> {
            Ok(())
        }

        fn send_chunk(&mut self, _: u32, _: &[u8]) -> Result<(), UploadError> {
            Ok(())
        }

        fn finalize(&mut self) -> Result<SourceImage, UploadError> {
            Err(UploadError::Remote("model unavailable".into()))
        }
    }

    #[test]
    fn test_remote_error_surfaces_message() {
        let source = SourceImage::new(vec![1, 2, 3], "image/png");
        let err = upload(&mut FailingService, &source, 2).unwrap_err();
        assert_eq!(err.to_string(), "Enhancement failed: model unavailable");
    }
}
