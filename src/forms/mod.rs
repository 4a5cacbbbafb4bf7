//! Form structs deserialized from request payloads plus their conversions
//! into typed service payloads.

pub mod catalog;
pub mod schedule;
pub mod staff;
