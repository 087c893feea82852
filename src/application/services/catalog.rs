//! Catalog loading service
//!
//! Reads catalog documents (TOML or JSON, chosen by extension) through the
//! filesystem seam and turns them into a validated [`Catalog`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Catalog, Category};
use crate::infrastructure::traits::FileSystem;

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the file at `path`, or the built-in catalog when `None`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: Option<&Path>) -> ApplicationResult<Catalog> {
        match path {
            Some(path) => self.load_file(path),
            None => {
                debug!("using built-in catalog");
                Ok(Catalog::builtin())
            }
        }
    }

    pub fn load_file(&self, path: &Path) -> ApplicationResult<Catalog> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| ApplicationError::Catalog {
            path: path.to_path_buf(),
            message: "unsupported extension (expected .toml or .json)".to_string(),
        })?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;
        let document = Self::parse(&content, format).map_err(|message| {
            ApplicationError::Catalog {
                path: path.to_path_buf(),
                message,
            }
        })?;
        let catalog = Catalog::new(document.categories)?;
        debug!(
            "loaded {} categories from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn parse(content: &str, format: CatalogFormat) -> Result<CatalogDocument, String> {
        match format {
            CatalogFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            CatalogFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    pub fn render(catalog: &Catalog, format: CatalogFormat) -> ApplicationResult<String> {
        let document = CatalogDocument {
            categories: catalog.to_vec(),
        };
        let rendered = match format {
            CatalogFormat::Toml => toml::to_string_pretty(&document).map_err(|e| e.to_string()),
            CatalogFormat::Json => {
                serde_json::to_string_pretty(&document).map_err(|e| e.to_string())
            }
        };
        rendered.map_err(|message| ApplicationError::OperationFailed {
            context: "serialize catalog".to_string(),
            source: message.into(),
        })
    }
}
