//! Integration test modules.

mod config;
mod view;
