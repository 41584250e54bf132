//! themesmith library crate
//!
//! Exposes the modules so integration tests and external tooling can
//! exercise the theme pipeline without going through CLI startup.

pub mod ai;
pub mod archive;
pub mod config;
pub mod image;
pub mod palette;
pub mod preview;
pub mod render;
pub mod spinner;
pub mod theme;
