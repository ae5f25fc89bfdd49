//! Request handlers, one module per area of the application.

pub mod account;
pub mod distribution;
pub mod encyclopedia;
pub mod export;
pub mod mixer;
pub mod newsletter;
pub mod shop;
