//! UI module for VasthraAI Studio
//!
//! # Layout
//! - `header` - Application name and current page title
//! - `upload_page` - Drop zone, preview, Reset / Generate Design
//! - `view_designs` - Original sketch and generated design side by side
//! - `status_bar` - Service address and status messages

pub mod header;
pub mod status_bar;
pub mod upload_page;
pub mod view_designs;
