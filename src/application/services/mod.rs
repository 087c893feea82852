//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Selector)
//! but are themselves concrete structs, not traits.

mod catalog;
mod form;
mod session;

pub use catalog::{CatalogDocument, CatalogFormat, CatalogService};
pub use form::{FormService, RunOutcome};
pub use session::{SessionService, QUIT};
