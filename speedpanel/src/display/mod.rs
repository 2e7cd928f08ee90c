//! Main screen logic: trigger a run, wait, render the chosen results.
//!
//! # State Machine
//!
//! ```text
//! Idle --[trigger]--> Running --[fixed delay elapsed]--> Idle
//! ```
//!
//! On trigger the controller disables the trigger, clears both labels,
//! starts the session and raises the loading flag. Completion is driven by a
//! timer, not by the SDK: after the delay it lowers the loading flag,
//! re-enables the trigger and renders whatever the session holds at that
//! moment through the [`render_results`] decision table.

mod controller;
mod render;

pub use controller::{
    CompletionMode, DisplayConfig, DisplayController, DisplayState, MainView,
    DEFAULT_AWAIT_TIMEOUT, DEFAULT_RESULT_DELAY,
};
pub use render::{
    format_mbps, render_failure, render_results, ResultLines, CHECK_SETTINGS_MESSAGE,
    DOWNLOAD_LABEL, MBPS_UNIT, UPLOAD_LABEL,
};
