//! # Model Layer
//!
//! Persistence for the `admin_config` and `shopping_lists` collections.

pub mod store;
