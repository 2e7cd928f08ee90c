//! Settings command - view or change the theme and display toggles.
//!
//! Changes go through the settings controller, so they are persisted to the
//! preference file exactly as the dashboard would persist them.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use speedpanel::preferences::Preferences;
use speedpanel::settings::SettingsController;
use speedpanel::theme::Theme;

use super::common::{is_interactive, on_off, Switch, ThemeArg};
use crate::error::CliError;
use crate::runner::{CliRunner, LogOutput};

/// Arguments for the settings command.
#[derive(Debug, Clone, Default)]
pub struct SettingsArgs {
    pub theme: Option<ThemeArg>,
    pub download: Option<Switch>,
    pub upload: Option<Switch>,
}

impl SettingsArgs {
    fn is_empty(&self) -> bool {
        self.theme.is_none() && self.download.is_none() && self.upload.is_none()
    }
}

/// Run the settings command.
pub fn run(args: SettingsArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(LogOutput::FileOnly)?;
    runner.log_startup("settings");
    let app = runner.start_app(runner.app_config())?;
    let settings = app.settings();

    if args.is_empty() {
        if is_interactive() {
            edit_interactively(settings)?;
        }
    } else {
        apply(settings, &args)?;
    }

    print!("{}", format_preferences(&settings.preferences()));
    Ok(())
}

/// Apply the changes named on the command line.
fn apply(settings: &SettingsController, args: &SettingsArgs) -> Result<(), CliError> {
    if let Some(theme) = args.theme {
        settings.select_theme(theme.into())?;
    }
    if let Some(download) = args.download {
        settings.toggle_download(download.enabled())?;
    }
    if let Some(upload) = args.upload {
        settings.toggle_upload(upload.enabled())?;
    }
    Ok(())
}

fn edit_interactively(settings: &SettingsController) -> Result<(), CliError> {
    let prompt_theme = ColorfulTheme::default();
    let current = settings.preferences();

    let names: Vec<&str> = Theme::ALL.iter().map(|theme| theme.name()).collect();
    let index = Select::with_theme(&prompt_theme)
        .with_prompt("Theme")
        .items(&names)
        .default(current.theme.index())
        .interact()?;
    if index != current.theme.index() {
        settings.select_theme_index(index)?;
    }

    let show_download = Confirm::with_theme(&prompt_theme)
        .with_prompt("Show download speed?")
        .default(current.display.show_download)
        .interact()?;
    if show_download != current.display.show_download {
        settings.toggle_download(show_download)?;
    }

    let show_upload = Confirm::with_theme(&prompt_theme)
        .with_prompt("Show upload speed?")
        .default(current.display.show_upload)
        .interact()?;
    if show_upload != current.display.show_upload {
        settings.toggle_upload(show_upload)?;
    }

    println!();
    Ok(())
}

fn format_preferences(prefs: &Preferences) -> String {
    format!(
        "{}\n  theme    = {}\n  download = {}\n  upload   = {}\n",
        style("Preferences").bold(),
        prefs.theme,
        on_off(prefs.display.show_download),
        on_off(prefs.display.show_upload),
    )
}
