//! SGPA & CGPA progression dashboard: semester record store, derived grade
//! metrics, and the view dispatch behind the web surface.

pub mod error;
pub mod metrics;
pub mod records;
pub mod views;
pub mod web;

pub use error::{DashboardError, Result};
