//! Transformation of decoded OSM elements into relational records.

pub mod classify;
pub mod shape;

pub use classify::{CONTACT_PHONE_KEY, DEFAULT_TAG_TYPE, PHONE_KEY, STREET_KEY, classify};
pub use shape::{MISSING_ATTRIBUTE_PLACEHOLDER, shape};
