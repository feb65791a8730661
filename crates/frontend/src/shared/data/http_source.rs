use async_trait::async_trait;
use contracts::domain::sector::Dataset;
use contracts::enums::ViewId;
use contracts::shared::data_store::DatasetSource;
use contracts::shared::errors::{DataError, DataResult};
use gloo_net::http::Request;

/// Fetches `<base>/<view>-data.json` from the page origin
pub struct HttpDatasetSource {
    base: String,
}

impl HttpDatasetSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn url(&self, view: ViewId) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), view.data_file())
    }
}

#[async_trait(?Send)]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self, view: ViewId) -> DataResult<Dataset> {
        let url = self.url(view);
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| DataError::Fetch {
                view,
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(DataError::Load {
                view,
                status: response.status(),
            });
        }

        let text = response.text().await.map_err(|e| DataError::Fetch {
            view,
            message: e.to_string(),
        })?;

        Dataset::from_json(view, &text)
    }
}
