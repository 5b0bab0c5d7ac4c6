//! HTTP handlers for the Generations domain

pub mod full_process;
pub mod generations;
