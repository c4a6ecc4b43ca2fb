//! 通过远端接口加载的参考数据
//!
//! 页目录没有对应接口，本地生成 1..=604

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::{QuranApiPort, ReferenceDataError, ReferenceDataPort};
use crate::domain::audio::Reciter;
use crate::domain::container::{dedup_juzs, Chapter, Juz, Page};
use crate::domain::translation::Translation;

pub struct ApiReferenceData {
    api: Arc<dyn QuranApiPort>,
    locale: String,
}

impl ApiReferenceData {
    pub fn new(api: Arc<dyn QuranApiPort>, locale: impl Into<String>) -> Self {
        Self {
            api,
            locale: locale.into(),
        }
    }
}

fn unavailable(err: impl ToString) -> ReferenceDataError {
    ReferenceDataError::Unavailable(err.to_string())
}

#[async_trait]
impl ReferenceDataPort for ApiReferenceData {
    async fn chapters(&self) -> Result<Vec<Chapter>, ReferenceDataError> {
        self.api.chapters(&self.locale).await.map_err(unavailable)
    }

    async fn juzs(&self) -> Result<Vec<Juz>, ReferenceDataError> {
        let juzs = self.api.juzs().await.map_err(unavailable)?;
        Ok(dedup_juzs(juzs))
    }

    async fn pages(&self) -> Result<Vec<Page>, ReferenceDataError> {
        Ok(Page::catalog(&BTreeMap::new()))
    }

    async fn reciters(&self) -> Result<Vec<Reciter>, ReferenceDataError> {
        self.api.reciters(&self.locale).await.map_err(unavailable)
    }

    async fn translations(&self) -> Result<Vec<Translation>, ReferenceDataError> {
        self.api.translations(&self.locale).await.map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::container::sample_juz;
    use crate::infrastructure::adapters::FakeQuranClient;

    #[tokio::test]
    async fn test_juzs_deduplicated_and_pages_generated() {
        let api = FakeQuranClient::new().with_juzs(vec![
            sample_juz(1, &[(1, "1-7")]),
            sample_juz(1, &[(1, "1-7")]),
            sample_juz(2, &[(2, "142-252")]),
        ]);
        let data = ApiReferenceData::new(Arc::new(api), "en");

        assert_eq!(data.juzs().await.unwrap().len(), 2);
        assert_eq!(data.pages().await.unwrap().len(), 604);
    }

    #[tokio::test]
    async fn test_api_failure_is_unavailable() {
        let api = Arc::new(FakeQuranClient::new());
        api.set_failing(true);
        let data = ApiReferenceData::new(api, "en");
        assert!(matches!(
            data.chapters().await,
            Err(ReferenceDataError::Unavailable(_))
        ));
    }
}
