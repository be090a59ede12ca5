//! Grocerly Core - Shared types library.
//!
//! This crate provides common types used across all Grocerly components:
//! - `client` - The SDK library orchestrating the delivery backend
//! - `cli` - Command-line tools for exercising the SDK
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, phone
//!   numbers, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
