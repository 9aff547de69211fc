use url::Url;

use crate::modules::job::model::JobId;

/// Endpoint addresses of the conversion service, resolved under its base.
#[derive(Clone, Debug)]
pub struct Routes {
    base: Url,
}

impl Routes {
    /// `base` must end in `/`; `AppConfig` guarantees that.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn health(&self) -> Result<Url, url::ParseError> {
        self.base.join("health")
    }

    pub fn convert(&self) -> Result<Url, url::ParseError> {
        self.base.join("api/convert")
    }

    pub fn status(&self, id: &JobId) -> Result<Url, url::ParseError> {
        self.with_job(&["api", "status"], id)
    }

    pub fn download(&self, id: &JobId) -> Result<Url, url::ParseError> {
        self.with_job(&["api", "download"], id)
    }

    fn with_job(&self, prefix: &[&str], id: &JobId) -> Result<Url, url::ParseError> {
        let mut url = self.base.clone();
        // Segment-wise so an id can never escape its path position.
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(prefix)
            .push(id.as_str());
        Ok(url)
    }
}
