//! Catalog generation.
//!
//! Walks a data directory with one sub-directory per topic and builds the
//! catalog the collection loader reads. Sub-directories are visited in name
//! order so the generated catalog is stable between runs.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

use topic_events::{Catalog, CatalogEntry, TopicDocument};

/// Errors raised while scanning or writing a catalog.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndexError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Scans `data_dir` and builds a catalog entry for every readable topic.
///
/// A directory without a topic document, or whose document is not valid
/// JSON, is logged and skipped. Only an unreadable `data_dir` is an error.
pub fn scan_catalog(
    data_dir: &Path,
    topic_file: &str,
    cover_file: &str,
) -> Result<Catalog, IndexError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(|e| IndexError::io(data_dir, e))? {
        let entry = entry.map_err(|e| IndexError::io(data_dir, e))?;
        if entry.path().is_dir() {
            dirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    dirs.sort();

    let mut topics = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let topic_dir = data_dir.join(&dir);
        let document_path = topic_dir.join(topic_file);

        if !document_path.is_file() {
            tracing::warn!(topic = %dir, "No {} found, skipping", topic_file);
            continue;
        }

        let document = match fs::read_to_string(&document_path)
            .map_err(|e| e.to_string())
            .and_then(|json| TopicDocument::from_json_str(&json).map_err(|e| e.to_string()))
        {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(topic = %dir, error = %error, "Unreadable topic document, skipping");
                continue;
            }
        };

        let has_game = document.has_game();
        let has_cover = topic_dir.join(cover_file).is_file();
        let name = document
            .topic
            .unwrap_or_else(|| format!("Topic {}", dir));

        tracing::info!(topic = %dir, name = %name, has_game, has_cover, "Indexed topic");

        topics.push(CatalogEntry {
            file: format!("{}/{}", dir, topic_file),
            topic: Some(name),
            has_game,
            has_cover,
            id: dir,
        });
    }

    let catalog = Catalog::new(topics);
    tracing::info!(
        total = catalog.total,
        with_game = catalog.with_game,
        with_cover = catalog.with_cover,
        "Catalog built"
    );
    Ok(catalog)
}

/// Writes the catalog as pretty-printed JSON.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), IndexError> {
    let file = File::create(path).map_err(|e| IndexError::io(path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, catalog)?;
    tracing::info!("Wrote catalog to {:?}", path);
    Ok(())
}
