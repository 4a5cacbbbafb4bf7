//! Framework-free domain model.
//!
//! Entities here carry the constrained newtypes from [`types`] instead of raw
//! primitives; Diesel models convert at the persistence boundary.

pub mod booking;
pub mod catalog;
pub mod schedule;
pub mod staff;
pub mod time;
pub mod tree;
pub mod types;
