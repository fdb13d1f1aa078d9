//! Public directory workflows: list-only, single detail, and list-plus-enrich.

use tracing::{info, instrument};

use dinodir_crawler::{SourceClient, fetch_detail, list_references};
use dinodir_shared::{
    AggregateResult, AppConfig, DetailRecord, EnrichConfig, EntityReference, Result, SourceConfig,
};

use crate::enrichment::{self, EnrichmentProgress};

/// A configured directory source: one HTTP client plus the fan-out settings.
///
/// Cheap to clone; share one per process.
#[derive(Debug, Clone)]
pub struct Directory {
    client: SourceClient,
    enrich: EnrichConfig,
}

impl Directory {
    /// Build a directory from explicit source and enrichment settings.
    pub fn new(source: SourceConfig, enrich: EnrichConfig) -> Result<Self> {
        Ok(Self {
            client: SourceClient::new(source)?,
            enrich,
        })
    }

    /// Build a directory from the loaded application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(SourceConfig::from(config), EnrichConfig::from(config))
    }

    /// List every entry in the index document.
    pub async fn list(&self) -> Result<Vec<EntityReference>> {
        list_references(&self.client).await
    }

    /// Fetch one entity's detail record by name.
    pub async fn detail(&self, name: &str) -> Result<DetailRecord> {
        fetch_detail(&self.client, name).await
    }

    /// Enrich references that were already listed.
    pub async fn enrich(
        &self,
        references: Vec<EntityReference>,
        progress: &dyn EnrichmentProgress,
    ) -> AggregateResult {
        enrichment::enrich(&self.client, references, &self.enrich, progress).await
    }

    /// List the directory, then fetch every entry's details.
    ///
    /// Fails only if the listing itself fails; per-entry failures are dropped.
    #[instrument(skip_all, fields(base_url = %self.client.config().base_url))]
    pub async fn list_with_details(
        &self,
        progress: &dyn EnrichmentProgress,
    ) -> Result<AggregateResult> {
        progress.phase("Listing directory");
        let references = self.list().await?;
        info!(entries = references.len(), "starting enrichment");

        Ok(self.enrich(references, progress).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::SilentProgress;
    use dinodir_shared::DinoDirError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"<html><body><ul>
        <li class="dinosaurfilter--dinosaur"><a href="/triceratops.html">
            <p class="dinosaurfilter--name-unhyphenated">Triceratops</p></a></li>
        <li class="dinosaurfilter--dinosaur"><a href="/stegosaurus.html">
            <p class="dinosaurfilter--name-unhyphenated">Stegosaurus</p></a></li>
    </ul></body></html>"#;

    fn detail_page(name: &str, meaning: &str) -> String {
        format!(
            r#"<html><body>
            <h1 class="dinosaur--name-unhyphenated">{name}</h1>
            <dd class="dinosaur--pronunciation">{name}-pron</dd>
            <dd class="dinosaur--meaning">: {meaning}</dd>
            <img class="dinosaur--image" src="/img/{name}.jpg">
            <div class="dinosaur--content-container"><p>About {name}.</p></div>
            </body></html>"#
        )
    }

    async fn directory_with_index(server: &MockServer) -> Directory {
        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(server)
            .await;

        let mut source = SourceConfig::new(server.uri());
        source.index_path = "/index.html".into();
        Directory::new(source, EnrichConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn end_to_end_two_entities() {
        let server = MockServer::start().await;
        for (name, meaning) in [("Triceratops", "three-horned face"), ("Stegosaurus", "roof lizard")] {
            Mock::given(method("GET"))
                .and(path(format!("/{}.html", name.to_lowercase())))
                .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(name, meaning)))
                .mount(&server)
                .await;
        }

        let directory = directory_with_index(&server).await;

        let listed = directory.list().await.unwrap();
        assert_eq!(
            listed,
            vec![
                EntityReference::new("Triceratops", "/triceratops.html"),
                EntityReference::new("Stegosaurus", "/stegosaurus.html"),
            ]
        );

        let result = directory.list_with_details(&SilentProgress).await.unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.no_data_count, 0);
        for record in &result.records {
            assert!(!record.name.is_empty());
            assert!(!record.meaning.is_empty());
            assert!(!record.pronunciation.is_empty());
            assert!(!record.picture.is_empty());
            assert!(!record.content.is_empty());
        }
    }

    #[tokio::test]
    async fn listing_failure_aborts() {
        let server = MockServer::start().await;
        let mut source = SourceConfig::new(server.uri());
        source.index_path = "/index.html".into();
        let directory = Directory::new(source, EnrichConfig::default()).unwrap();

        let err = directory.list_with_details(&SilentProgress).await.unwrap_err();
        assert!(matches!(err, DinoDirError::NotFound { .. }), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn detail_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/triceratops.html"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(detail_page("Triceratops", "three-horned face")),
            )
            .mount(&server)
            .await;

        let directory = Directory::new(SourceConfig::new(server.uri()), EnrichConfig::default()).unwrap();
        let record = directory.detail("Triceratops").await.unwrap();
        assert_eq!(record.meaning, "three-horned face");
        assert_eq!(record.link, None);
    }
}
