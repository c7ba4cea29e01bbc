//! Core modules for the handbook distribution toolkit.

pub mod config;
pub mod error;
pub mod inherit;
pub mod library;
pub mod manifest;
pub mod output;
pub mod policy_check;
