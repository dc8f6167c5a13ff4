//! Smartmark — a minimal personal bookmark manager backed by a managed
//! realtime backend.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod backend;
pub mod components;
pub mod config;
pub mod types;
