//! Diesel table structs and their conversions to and from domain entities.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod schedule;
pub mod staff;
pub mod time_off;
pub mod translation;
