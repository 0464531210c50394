//! Keyword catalogs: one JSON file of keywords per job category.
//!
//! Loading never fails from the caller's point of view: an unknown category or a broken
//! file yields an empty catalog and a warning.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::scoring::KeywordCatalog;

const FILE_PREFIX: &str = "keywords_";
const FILE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
enum CatalogError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a JSON array of strings: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Source of keyword catalogs. Carried in `AppState` as `Arc<dyn KeywordCatalogLoader>`.
pub trait KeywordCatalogLoader: Send + Sync {
    /// Catalog for `category`, or an empty catalog when the category is unknown.
    fn load(&self, category: &str) -> KeywordCatalog;

    /// Every category this loader can serve, sorted.
    fn categories(&self) -> Vec<String>;
}

/// Reads `keywords_{category}.json` from the first directory that has it.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    dirs: Vec<PathBuf>,
}

impl FileCatalogLoader {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    fn locate(&self, category: &str) -> Option<PathBuf> {
        let file_name = format!("{FILE_PREFIX}{category}.{FILE_EXTENSION}");
        self.dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
    }
}

impl KeywordCatalogLoader for FileCatalogLoader {
    fn load(&self, category: &str) -> KeywordCatalog {
        if !is_valid_category(category) {
            warn!("Rejecting malformed catalog category '{category}'");
            return KeywordCatalog::default();
        }

        let Some(path) = self.locate(category) else {
            warn!("No keyword catalog for category '{category}'");
            return KeywordCatalog::default();
        };

        match read_catalog(&path) {
            Ok(keywords) => {
                let catalog = KeywordCatalog::new(keywords);
                if catalog.is_empty() {
                    warn!("Keyword catalog {} is empty", path.display());
                } else {
                    debug!(
                        "Loaded {} keywords for category '{category}' from {}",
                        catalog.len(),
                        path.display()
                    );
                }
                catalog
            }
            Err(e) => {
                warn!("Falling back to an empty catalog for '{category}': {e}");
                KeywordCatalog::default()
            }
        }
    }

    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .dirs
            .iter()
            .filter_map(|dir| std::fs::read_dir(dir).ok())
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| category_from_path(&entry.path()))
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

fn read_catalog(path: &Path) -> Result<Vec<String>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Category names become part of a file name, so only `[a-z0-9_-]+` is accepted.
fn is_valid_category(category: &str) -> bool {
    !category.is_empty()
        && category
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

fn category_from_path(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != FILE_EXTENSION {
        return None;
    }
    let category = path.file_stem()?.to_str()?.strip_prefix(FILE_PREFIX)?;
    is_valid_category(category).then(|| category.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_loads_and_normalizes_catalog() {
        let dir = TempDir::new().unwrap();
        write(&dir, "keywords_software.json", r#"["Rust", "Machine Learning", "rust", " "]"#);

        let loader = FileCatalogLoader::new(vec![dir.path().to_path_buf()]);
        let catalog = loader.load("software");
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["rust", "machine learning"]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = FileCatalogLoader::new(vec![dir.path().to_path_buf()]);
        assert!(loader.load("nursing").is_empty());
    }

    #[test]
    fn test_blank_entries_only_load_an_empty_catalog() {
        let dir = TempDir::new().unwrap();
        write(&dir, "keywords_blank.json", r#"["", "   "]"#);
        let loader = FileCatalogLoader::new(vec![dir.path().to_path_buf()]);
        assert!(loader.load("blank").is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        write(&dir, "keywords_broken.json", r#"{"not": "an array"}"#);
        let loader = FileCatalogLoader::new(vec![dir.path().to_path_buf()]);
        assert!(loader.load("broken").is_empty());
    }

    #[test]
    fn test_path_like_category_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "keywords_x.json", r#"["a"]"#);
        let loader = FileCatalogLoader::new(vec![dir.path().to_path_buf()]);
        assert!(loader.load("../x").is_empty());
        assert!(loader.load("").is_empty());
        assert!(loader.load("X").is_empty());
    }

    #[test]
    fn test_first_directory_wins() {
        let primary = TempDir::new().unwrap();
        let secondary = TempDir::new().unwrap();
        write(&primary, "keywords_data.json", r#"["sql"]"#);
        write(&secondary, "keywords_data.json", r#"["spark"]"#);
        write(&secondary, "keywords_ops.json", r#"["lean"]"#);

        let loader = FileCatalogLoader::new(vec![
            primary.path().to_path_buf(),
            secondary.path().to_path_buf(),
        ]);
        assert!(loader.load("data").contains("sql"));
        assert!(!loader.load("data").contains("spark"));
        assert!(loader.load("ops").contains("lean"));
    }

    #[test]
    fn test_lists_categories_sorted_and_deduplicated() {
        let primary = TempDir::new().unwrap();
        let secondary = TempDir::new().unwrap();
        write(&primary, "keywords_software.json", "[]");
        write(&primary, "notes.txt", "ignore me");
        write(&secondary, "keywords_data.json", "[]");
        write(&secondary, "keywords_software.json", "[]");

        let loader = FileCatalogLoader::new(vec![
            primary.path().to_path_buf(),
            secondary.path().to_path_buf(),
            PathBuf::from("/nonexistent/keywords"),
        ]);
        assert_eq!(loader.categories(), vec!["data", "software"]);
    }

    #[test]
    fn test_category_from_path() {
        assert_eq!(
            category_from_path(Path::new("/a/keywords_fallback.json")),
            Some("fallback".to_string())
        );
        assert_eq!(category_from_path(Path::new("/a/keywords_fallback.txt")), None);
        assert_eq!(category_from_path(Path::new("/a/skills.json")), None);
    }
}
