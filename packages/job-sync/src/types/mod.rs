//! Data types for the sync core.

pub mod config;
pub mod page;
pub mod record;
pub mod transient;
pub mod view;
