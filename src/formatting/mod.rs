// src/formatting/mod.rs
//! Decoding of the cache's stored encodings into plain values.
//!
//! - [`rich_text`] turns nested-array rich text and property maps into strings.
//! - [`properties`] projects collection rows through their schema.

pub mod properties;
pub mod rich_text;
