//! # Herbal Core
//!
//! Core business logic for the herbal encyclopedia, mixer and storefront.
//!
//! This crate contains pure data operations over the reference catalog and the session state
//! that sits on top of it:
//! - Catalog loading and integrity checks, encyclopedia search, remedies and preparations
//! - The keyword classifier and blend recommendation synthesizer
//! - Storefront products, cart and checkout
//! - Mock accounts, newsletter and the herb distribution map
//!
//! **No API concerns**: HTTP servers, routing and OpenAPI documents belong in `api-rest` or
//! `api-shared`.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod encyclopedia;
pub mod error;
pub mod export;
pub mod favorites;
pub mod ingredients;
pub mod local_store;
pub mod mixer;
pub mod newsletter;
pub mod search;
pub mod store;

pub use catalog::Catalog;
pub use config::CoreConfig;
pub use error::{HerbalError, HerbalResult};
pub use herbal_types::{EmailAddress, NonEmptyText, TextError};
