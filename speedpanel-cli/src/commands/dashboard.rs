//! Dashboard command - the interactive main and settings screens.
//!
//! Falls back to a single headless run when stdout is not a terminal.

use tokio_util::sync::CancellationToken;

use super::common::is_interactive;
use super::run::{self, RunArgs};
use crate::error::CliError;
use crate::runner::{install_interrupt_handler, CliRunner, LogOutput};
use crate::tui_app::{run_tui, TuiAppConfig};

/// Run the dashboard command.
pub fn run(verbose: bool) -> Result<(), CliError> {
    if !is_interactive() {
        return run::run(RunArgs {
            verbose,
            ..RunArgs::default()
        });
    }

    let runner = CliRunner::new(LogOutput::FileOnly)?;
    runner.log_startup("dashboard");
    let app = runner.start_app(runner.app_config())?;

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone())?;

    run_tui(TuiAppConfig {
        app: &app,
        runtime: runner.runtime(),
        cancel,
    })
}
