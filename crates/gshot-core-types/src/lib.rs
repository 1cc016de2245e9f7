//! Core types shared across gshot facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! structured logging macros and the error facility, so every crate in the
//! workspace emits the same schema.

pub mod schema;
