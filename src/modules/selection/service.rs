use tracing::debug;

use super::model::MediaFile;

/// The user's pending input: ordered images (order is frame order in the
/// produced video) and at most one audio track.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    images: Vec<MediaFile>,
    audio: Option<MediaFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[MediaFile] {
        &self.images
    }

    pub fn audio(&self) -> Option<&MediaFile> {
        self.audio.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn image_names(&self) -> Vec<&str> {
        self.images.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn append_images(&mut self, files: impl IntoIterator<Item = MediaFile>) {
        let before = self.images.len();
        self.images.extend(files);
        debug!(
            added = self.images.len() - before,
            total = self.images.len(),
            "Images appended"
        );
    }

    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        let removed = self.images.remove(index);
        debug!(index, name = %removed.name, "Image removed");
    }

    /// Moves the image at `from` to position `to`. Signed so that "up" from
    /// the first row (`to == -1`) hits the same boundary guard as "down" from
    /// the last one; either way nothing changes.
    pub fn move_image(&mut self, from: usize, to: isize) {
        let len = self.images.len();
        if to < 0 || to as usize >= len || from >= len {
            return;
        }
        let to = to as usize;
        let item = self.images.remove(from);
        self.images.insert(to, item);
        debug!(from, to, "Image moved");
    }

    pub fn move_up(&mut self, index: usize) {
        // Bounded by len, so the cast below cannot wrap.
        if index >= self.images.len() {
            return;
        }
        self.move_image(index, index as isize - 1);
    }

    pub fn move_down(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        self.move_image(index, index as isize + 1);
    }

    /// Replaces any previously chosen track.
    pub fn set_audio(&mut self, file: MediaFile) {
        debug!(name = %file.name, replaced = self.audio.is_some(), "Audio selected");
        self.audio = Some(file);
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.audio = None;
        debug!("Selection cleared");
    }
}
