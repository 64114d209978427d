//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Search data model (Entry, MatchRange, StringSlice)
//! - Error types
//! - Rendering functions for different output formats
//! - Common utilities

pub mod error;
pub mod model;
pub mod render;
pub mod util;
