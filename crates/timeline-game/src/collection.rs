//! Topic collection loading.
//!
//! Reads the catalog, then fetches every topic document concurrently and
//! joins once all of them have finished. A topic that fails to load is
//! logged and left out; the rest of the collection is still usable. There is
//! no cancellation and no timeout.

use futures::future::join_all;
use std::path::Path;

use topic_events::{Catalog, CatalogEntry, LoadError, Topic, ValidationMode};

use crate::config::ShowcaseConfig;

/// A topic together with the catalog entry that pointed at it.
#[derive(Debug, Clone)]
pub struct LoadedTopic {
    pub entry: CatalogEntry,
    pub topic: Topic,
}

/// A catalog entry whose document could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub entry: CatalogEntry,
    pub error: LoadError,
}

/// Every topic that loaded, in catalog order.
#[derive(Debug, Default)]
pub struct TopicCollection {
    topics: Vec<LoadedTopic>,
    failures: Vec<LoadFailure>,
}

impl TopicCollection {
    /// Loads the collection described by a configuration.
    pub async fn from_config(config: &ShowcaseConfig) -> Result<Self, LoadError> {
        Self::load(
            &config.data.dir,
            &config.data.index_file,
            config.loading.validation,
        )
        .await
    }

    /// Reads `data_dir/index_file` and loads every topic it lists.
    ///
    /// Only a missing or malformed catalog fails the whole load.
    pub async fn load(
        data_dir: &Path,
        index_file: &str,
        mode: ValidationMode,
    ) -> Result<Self, LoadError> {
        let index_path = data_dir.join(index_file);
        tracing::info!("Loading catalog from {:?}", index_path);

        let json = tokio::fs::read_to_string(&index_path)
            .await
            .map_err(|e| LoadError::io(&index_path, e))?;
        let catalog = Catalog::from_json_str(&json)?;

        Ok(Self::load_catalog(data_dir, catalog, mode).await)
    }

    /// Loads every topic of an already parsed catalog.
    pub async fn load_catalog(data_dir: &Path, catalog: Catalog, mode: ValidationMode) -> Self {
        let loads = catalog.topics.into_iter().map(|entry| async move {
            let result = load_topic(data_dir, &entry, mode).await;
            (entry, result)
        });

        let mut collection = Self::default();
        for (entry, result) in join_all(loads).await {
            match result {
                Ok(topic) => {
                    tracing::debug!(topic = %entry.id, name = topic.name(), "Loaded topic");
                    collection.topics.push(LoadedTopic { entry, topic });
                }
                Err(error) => {
                    tracing::warn!(
                        topic = %entry.id,
                        file = %entry.file,
                        error = %error,
                        "Failed to load topic, leaving it out"
                    );
                    collection.failures.push(LoadFailure { entry, error });
                }
            }
        }

        tracing::info!(
            loaded = collection.topics.len(),
            failed = collection.failures.len(),
            "All topics loaded"
        );
        collection
    }

    /// Looks a topic up by id.
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics
            .iter()
            .find(|loaded| loaded.topic.id() == id)
            .map(|loaded| &loaded.topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedTopic> {
        self.topics.iter()
    }

    pub fn topics(&self) -> &[LoadedTopic] {
        &self.topics
    }

    /// Entries that were left out, in catalog order.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Reads and materialises one topic document.
pub async fn load_topic(
    data_dir: &Path,
    entry: &CatalogEntry,
    mode: ValidationMode,
) -> Result<Topic, LoadError> {
    let path = data_dir.join(&entry.file);
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| LoadError::io(&path, e))?;
    Topic::from_json_str(entry.id.clone(), &json, mode)
}
