//! Domain layer: catalog, selection state machine and form events
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;
pub mod event;
pub mod selection;

pub use catalog::Catalog;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use event::FormEvent;
pub use selection::{Expansion, FormState, SelectionController, SelectionMode};
