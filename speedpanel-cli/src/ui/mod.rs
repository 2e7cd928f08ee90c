//! Terminal UI for SpeedPanel.
//!
//! Shows the main screen (run trigger, busy indicator, result labels) and a
//! settings panel (theme selector, display toggles) in one dashboard.
//!
//! # Module Structure
//!
//! - `dashboard` - Terminal setup, key handling and layout
//! - `widgets` - Reusable UI widget components

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardEvent, DashboardSnapshot, Panel};
