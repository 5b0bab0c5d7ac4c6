//! API endpoint integration tests
//!
//! Drives the composed application router end to end with mock providers and
//! a temporary storage root.

#![allow(dead_code)]

mod artifacts;
mod common;
mod full_process;
mod generations;
