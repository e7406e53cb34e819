//! # harbor-core
//!
//! Core types for the Harbor repository catalog.
//!
//! This crate provides the foundational types shared across all Harbor crates:
//! - Entity structs for the domain objects (repositories, commits)
//! - Enums for version-control systems and listing status selectors
//! - ID prefix constants

pub mod entities;
pub mod enums;
pub mod ids;
