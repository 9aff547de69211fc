use std::fmt;

use url::Url;

/// Address of a finished video. The same URL serves as the download link and
/// as the playback source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReference {
    url: Url,
}

impl ResultReference {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn download_link(&self) -> &Url {
        &self.url
    }

    pub fn playback_source(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ResultReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
