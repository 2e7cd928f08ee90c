//! Run command - a single headless speed test.
//!
//! Presses the trigger once, shows a spinner while the main screen is
//! loading, then prints the labels exactly as the main screen would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use speedpanel::app::SpeedPanelApp;
use speedpanel::display::ResultLines;

use crate::error::CliError;
use crate::runner::{install_interrupt_handler, CliRunner, LogOutput};

/// Arguments for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Print a JSON object instead of labels.
    pub json: bool,
    /// Override `speedtest.result_delay`, in seconds.
    pub delay: Option<u64>,
    /// Mirror log events to stderr.
    pub verbose: bool,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let output = if args.verbose {
        LogOutput::FileAndStderr
    } else {
        LogOutput::FileOnly
    };
    let runner = CliRunner::new(output)?;
    runner.log_startup("run");

    let mut app_config = runner.app_config();
    if let Some(delay) = args.delay {
        if delay == 0 {
            return Err(CliError::Config("--delay must be at least 1 second".to_string()));
        }
        app_config = app_config.with_result_delay(Duration::from_secs(delay));
    }
    let app = runner.start_app(app_config)?;

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone())?;

    let spinner = (!args.json && !args.verbose && atty::is(atty::Stream::Stderr)).then(spinner);
    if let Some(spinner) = &spinner {
        bind_spinner(&app, spinner.clone());
    }

    run_once(&runner, &app, &cancel)?;

    let lines = app.display().view().lines();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report(&app, &lines))?);
    } else {
        print_lines(&lines);
    }

    if let Some(error) = app.session().last_error() {
        eprintln!(
            "{} speed test reported an error: {} (code {})",
            style("warning:").yellow().bold(),
            error,
            error.code()
        );
    }
    Ok(())
}

/// Trigger one run and wait for the main screen to go idle.
fn run_once(
    runner: &CliRunner,
    app: &SpeedPanelApp,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let runtime = runner.runtime();
    let completion = {
        let _guard = runtime.enter();
        app.display().trigger()
    };
    let Some(completion) = completion else {
        return Err(CliError::Config("speed test trigger is disabled".to_string()));
    };

    runtime.block_on(async {
        tokio::select! {
            joined = completion => joined.map_err(CliError::from),
            _ = cancel.cancelled() => Err(CliError::Interrupted),
        }
    })
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Measuring download and upload speed...");
    bar
}

/// Drive `bar` from the main screen's loading state.
fn bind_spinner(app: &SpeedPanelApp, bar: ProgressBar) {
    let spinning = AtomicBool::new(false);
    app.display().view().loading.subscribe(move |loading: &bool| {
        if *loading {
            spinning.store(true, Ordering::SeqCst);
            bar.reset_elapsed();
            bar.enable_steady_tick(Duration::from_millis(100));
        } else if spinning.swap(false, Ordering::SeqCst) {
            bar.finish_and_clear();
        }
    });
}

fn print_lines(lines: &ResultLines) {
    for line in [&lines.download, &lines.upload] {
        if !line.is_empty() {
            println!("{}", line);
        }
    }
}

fn report(app: &SpeedPanelApp, lines: &ResultLines) -> serde_json::Value {
    let result = app.session().result();
    let prefs = app.preferences();
    json!({
        "download": lines.download,
        "upload": lines.upload,
        "download_mbps": result.download_mbps,
        "upload_mbps": result.upload_mbps,
        "theme": prefs.theme,
        "show_download": prefs.display.show_download,
        "show_upload": prefs.display.show_upload,
        "error": app.session().last_error().map(|e| e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use speedpanel::app::AppConfig;
    use speedpanel::location::NoLocationServices;
    use speedpanel::preferences::MemoryPreferenceStore;
    use speedpanel::sdk::SimulatedSdk;

    fn app() -> SpeedPanelApp {
        SpeedPanelApp::start(
            AppConfig::default(),
            Arc::new(MemoryPreferenceStore::new()),
            Arc::new(SimulatedSdk::default()),
            &NoLocationServices,
        )
        .unwrap()
    }

    #[test]
    fn test_report_before_any_run() {
        let app = app();
        let report = report(&app, &app.display().view().lines());

        assert_eq!(report["download"], "");
        assert_eq!(report["download_mbps"], 0.0);
        assert_eq!(report["theme"], "light");
        assert_eq!(report["show_upload"], true);
        assert!(report["error"].is_null());
    }

    #[test]
    fn test_report_carries_labels() {
        let app = app();
        let lines = ResultLines {
            download: "Download Speed: 93.5Mbps".to_string(),
            upload: String::new(),
        };

        let report = report(&app, &lines);

        assert_eq!(report["download"], "Download Speed: 93.5Mbps");
        assert_eq!(report["upload"], "");
    }
}
