//! Collaborator seams for the sync core.

pub mod source;
pub mod store;
