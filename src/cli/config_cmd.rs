//! Config command handler

use std::future::Future;

use crate::application::ports::ConfigStore;
use crate::domain::config::Settings;
use crate::domain::error::ConfigError;

use super::args::ConfigAction;
use super::presenter::{format_list, Presenter};

/// Handle config subcommand.
///
/// `resolved` is only awaited by `show`.
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    resolved: impl Future<Output = Result<Settings, ConfigError>>,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Path => handle_path(store, presenter),
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Show => handle_show(store, &resolved.await?, presenter),
    }
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn handle_show<S: ConfigStore>(
    store: &S,
    settings: &Settings,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    let path = store.path();
    let source = if store.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    };

    presenter.key_value("config_file", &source);
    for (key, value) in settings_rows(settings) {
        presenter.key_value(key, &value);
    }
    Ok(())
}

/// Resolved settings as display rows, in file-key order
fn settings_rows(settings: &Settings) -> Vec<(&'static str, String)> {
    vec![
        ("title_prefix", settings.title_prefix.clone()),
        ("channels", format_list(&settings.channels)),
        ("tail_lines", settings.tail_lines.to_string()),
        (
            "poll_interval",
            format!("{}", settings.poll_interval.as_secs_f64()),
        ),
        ("quiet_when_focused", settings.quiet_when_focused.to_string()),
        ("chime", settings.chime.to_string()),
    ]
}
