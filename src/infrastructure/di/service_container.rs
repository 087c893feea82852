//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{CatalogService, FormService, SessionService};
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, Selector, SkimSelector};

/// Container holding the settings and I/O seams all services are built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive selector abstraction
    pub selector: Arc<dyn Selector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(SkimSelector))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            selector,
        }
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.fs))
    }

    /// Form service over the configured catalog and mode.
    pub fn form_service(&self) -> InfraResult<FormService> {
        let catalog = self
            .catalog_service()
            .load(self.settings.catalog.as_deref())?;
        debug!(
            "form service: {} categories, mode {:?}",
            catalog.len(),
            self.settings.mode
        );
        Ok(FormService::new(catalog, self.settings.mode))
    }

    pub fn session_service(&self) -> SessionService {
        SessionService::new(Arc::clone(&self.selector), self.settings.prompt.clone())
    }
}
