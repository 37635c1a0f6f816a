//! Core types and operations for the HPP (cost of goods produced) calculator.
//!
//! This crate holds the domain model, the pure totals and pricing functions,
//! the editor and history operations, and the [`session::Session`] that ties
//! them to a [`store::KeyValueStore`]. It has no database or CLI
//! dependencies; storage backends implement the store trait elsewhere.

// Native `async fn` in traits; the store trait spells out `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod access;
pub mod category;
pub mod codec;
pub mod editor;
pub mod error;
pub mod export;
pub mod history;
pub mod pricing;
pub mod product;
pub mod session;
pub mod store;
pub mod totals;

pub use error::{Error, Result, ValidationError};
