use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use mime::Mime;

use crate::common::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn top_level(&self) -> mime::Name<'static> {
        match self {
            MediaKind::Image => mime::IMAGE,
            MediaKind::Audio => mime::AUDIO,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
        }
    }
}

/// Where the bytes of a selected file come from. Files on disk are read at
/// submission time so a failed upload can be retried without re-selecting.
#[derive(Debug, Clone)]
pub enum MediaSource {
    Path(PathBuf),
    Memory(Bytes),
}

#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub mime: Mime,
    pub source: MediaSource,
}

impl MediaFile {
    /// Picks an image from disk. Only files whose extension maps to an
    /// `image/*` type are accepted.
    pub async fn image_from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        Self::from_path(path.as_ref(), MediaKind::Image).await
    }

    /// Picks an audio track from disk (`audio/*` only).
    pub async fn audio_from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        Self::from_path(path.as_ref(), MediaKind::Audio).await
    }

    /// In-memory file, typed from its name.
    pub fn from_bytes(
        name: impl Into<String>,
        kind: MediaKind,
        data: impl Into<Bytes>,
    ) -> ClientResult<Self> {
        let name = name.into();
        let mime = guess_checked(&name, Path::new(&name), kind)?;
        Ok(Self {
            name,
            mime,
            source: MediaSource::Memory(data.into()),
        })
    }

    async fn from_path(path: &Path, kind: MediaKind) -> ClientResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = guess_checked(&name, path, kind)?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ClientError::File {
                path: path.to_path_buf(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(ClientError::File {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        Ok(Self {
            name,
            mime,
            source: MediaSource::Path(path.to_path_buf()),
        })
    }

    pub fn kind(&self) -> Option<MediaKind> {
        match self.mime.type_() {
            t if t == mime::IMAGE => Some(MediaKind::Image),
            t if t == mime::AUDIO => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn guess_checked(name: &str, path: &Path, kind: MediaKind) -> ClientResult<Mime> {
    let guessed = mime_guess::from_path(path).first();
    match guessed {
        Some(mime) if mime.type_() == kind.top_level() => Ok(mime),
        other => Err(ClientError::UnsupportedMedia {
            name: name.to_string(),
            expected: kind.label(),
            detected: other
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }),
    }
}
