use reqwest::Body;
use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::common::error::{ClientError, ClientResult};
use crate::modules::selection::{MediaFile, MediaSource, Selection};

pub const IMAGES_FIELD: &str = "images";
pub const AUDIO_FIELD: &str = "audio";

/// Builds the convert request body: one `images` part per image in
/// selection order, then the optional `audio` part.
pub async fn build_form(selection: &Selection) -> ClientResult<Form> {
    let mut form = Form::new();

    for image in selection.images() {
        form = form.part(IMAGES_FIELD, file_part(image).await?);
    }

    if let Some(audio) = selection.audio() {
        form = form.part(AUDIO_FIELD, file_part(audio).await?);
    }

    Ok(form)
}

async fn file_part(file: &MediaFile) -> ClientResult<Part> {
    let part = match &file.source {
        MediaSource::Memory(data) => Part::stream_with_length(Body::from(data.clone()), data.len() as u64),
        MediaSource::Path(path) => {
            let read_err = |source| ClientError::File {
                path: path.clone(),
                source,
            };
            let handle = tokio::fs::File::open(path).await.map_err(read_err)?;
            let length = handle.metadata().await.map_err(read_err)?.len();
            debug!(name = %file.name, length, "Streaming file into form");
            Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), length)
        }
    };

    Ok(part
        .file_name(file.name.clone())
        .mime_str(file.mime.essence_str())?)
}
