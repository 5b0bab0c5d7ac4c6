//! Domain logic for the Generations domain

pub mod adapters;
pub mod pipeline;
pub mod prompts;
pub mod sanitize;
pub mod stages;
