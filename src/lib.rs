//! medus: two-level category picker
//!
//! A static catalog of categories and subcategories, a selection state
//! machine over it, and a CLI that drives the machine from scripted or
//! interactive form events.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
