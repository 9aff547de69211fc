use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::model::ResultReference;
use crate::common::error::{ClientError, ClientResult};
use crate::common::response::ensure_success;
use crate::state::AppState;

pub struct ResultService;

impl ResultService {
    /// Streams the produced video to `dest`, returning the number of bytes
    /// written. A partial file is removed if the transfer fails.
    pub async fn download_to(
        state: &AppState,
        result: &ResultReference,
        dest: &Path,
        mut on_progress: impl FnMut(u64, Option<u64>),
    ) -> ClientResult<u64> {
        info!("⬇️ Downloading {} to {}", result, dest.display());

        let response = state.http.get(result.download_link().clone()).send().await?;
        let response = ensure_success(response).await?;
        let total = response.content_length();

        let write_err = |source| ClientError::File {
            path: dest.to_path_buf(),
            source,
        };

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        let mut file = tokio::fs::File::create(dest).await.map_err(write_err)?;

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        let outcome: ClientResult<()> = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await.map_err(write_err)?;
                written += chunk.len() as u64;
                on_progress(written, total);
            }
            file.flush().await.map_err(write_err)?;
            Ok(())
        }
        .await;

        if let Err(e) = outcome {
            drop(file);
            if let Err(rm) = tokio::fs::remove_file(dest).await {
                warn!("Could not remove partial download {}: {}", dest.display(), rm);
            }
            return Err(e);
        }

        info!(bytes = written, "✅ Download complete");
        Ok(written)
    }
}
