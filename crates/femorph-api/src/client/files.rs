//! Artifact upload and result download.

use std::path::Path;

use femorph_core::{ArtifactId, ArtifactKind, Session};
use futures_util::StreamExt;
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use super::{FemorphClient, ensure_success};
use crate::error::{ApiError, ApiResult};
use crate::models::UploadResponse;
use crate::url::{build_nblock_url, build_upload_url};

/// Size of each write when saving a downloaded result.
pub const CHUNK_SIZE: usize = 8192;

const OCTET_STREAM: &str = "application/octet-stream";

impl FemorphClient {
    /// Upload a mesh or surface file and return the server-issued id.
    ///
    /// The file is streamed from disk as the `file` part of a multipart body.
    pub async fn upload_file(
        &self,
        path: &Path,
        kind: ArtifactKind,
        session: &Session,
    ) -> ApiResult<ArtifactId> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ApiError::InvalidPath {
                path: path.display().to_string(),
            })?
            .to_string();

        let file = File::open(path).await?;
        let length = file.metadata().await?.len();
        debug!(path = %path.display(), bytes = length, "Uploading {kind}");

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(file_name.clone())
            .mime_str(OCTET_STREAM)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(build_upload_url(&self.base_url, &session.user_id, kind))
            .header("Filename", file_name.as_str())
            .bearer_auth(session.access_token())
            .multipart(form)
            .send()
            .await?;
        let response =
            ensure_success(response, |status, body| ApiError::Upload { status, body }).await?;

        let upload: UploadResponse = response.json().await?;
        let id = upload
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse {
                message: format!("upload response for {file_name} is missing an id"),
            })?;

        info!(id = %id, "Upload successful: {file_name}");
        Ok(ArtifactId::new(id))
    }

    /// Download the morphed node block of `fem` into `out_path`.
    ///
    /// Returns the number of bytes written.
    pub async fn download_result(
        &self,
        fem: &ArtifactId,
        out_path: &Path,
        session: &Session,
    ) -> ApiResult<u64> {
        let url = build_nblock_url(&self.base_url, &session.user_id, fem);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(session.access_token())
            .send()
            .await?;
        let response = ensure_success(response, |status, body| ApiError::Request {
            status,
            url: url.to_string(),
            body,
        })
        .await?;

        let file = File::create(out_path).await?;
        let mut writer = ChunkWriter::new(file);
        let mut stream = response.bytes_stream();
        while let Some(bytes) = stream.next().await {
            writer.push(&bytes?).await?;
        }
        let written = writer.finish().await?;

        info!(bytes = written, "Downloaded FEM nblock: {}", out_path.display());
        Ok(written)
    }
}

/// Re-blocks an arbitrary byte stream into fixed `CHUNK_SIZE` writes.
///
/// Only the final write may be shorter.
struct ChunkWriter<W> {
    inner: W,
    pending: Vec<u8>,
    written: u64,
}

impl<W: AsyncWrite + Unpin> ChunkWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(CHUNK_SIZE),
            written: 0,
        }
    }

    async fn push(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.pending.extend_from_slice(bytes);
        let full = self.pending.len() / CHUNK_SIZE * CHUNK_SIZE;
        for chunk in self.pending[..full].chunks_exact(CHUNK_SIZE) {
            self.inner.write_all(chunk).await?;
        }
        self.pending.drain(..full);
        self.written += full as u64;
        Ok(())
    }

    async fn finish(mut self) -> std::io::Result<u64> {
        if !self.pending.is_empty() {
            self.inner.write_all(&self.pending).await?;
            self.written += self.pending.len() as u64;
        }
        self.inner.flush().await?;
        Ok(self.written)
    }
}
