//! Locale-specific value cleaning for the two failure-prone tag kinds:
//! street designations and phone numbers. Both engines are pure functions
//! over immutable static correction tables.

pub mod phone;
pub mod street;

pub use phone::{StandardizedPhone, UNRECOVERABLE_VALUE, standardize_phone};
pub use street::{
    CANONICAL_DESIGNATIONS, audit_street, non_canonical_designation, normalize_street,
    normalize_street_with, trailing_designation,
};
