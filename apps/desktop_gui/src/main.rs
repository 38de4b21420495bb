use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::ProviderConfig;
use controller::events::UiEvent;
use ui::{PersistedDesktopSettings, RosterApp, SETTINGS_STORAGE_KEY};

/// Desktop roster entry form backed by a directory service.
#[derive(Debug, Parser)]
#[command(name = "roster-desk")]
struct CliArgs {
    /// Base URL of a directory server; the built-in mock is used when absent.
    #[arg(long)]
    server_url: Option<String>,

    /// Artificial latency of the built-in mock provider, in milliseconds.
    #[arg(long, default_value_t = 400)]
    mock_latency_ms: u64,
}

impl CliArgs {
    fn provider_config(&self) -> ProviderConfig {
        match &self.server_url {
            Some(base_url) => ProviderConfig::Http {
                base_url: base_url.clone(),
            },
            None => ProviderConfig::Mock {
                latency_ms: self.mock_latency_ms,
            },
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = CliArgs::parse();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(args.provider_config(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Roster Desk")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Roster Desk",
        options,
        Box::new(|cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            Ok(Box::new(RosterApp::new(cmd_tx, ui_rx, persisted_settings)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use crate::backend_bridge::runtime::ProviderConfig;
    use clap::Parser;

    #[test]
    fn defaults_to_the_mock_provider() {
        let args = CliArgs::parse_from(["roster-desk"]);
        assert!(matches!(
            args.provider_config(),
            ProviderConfig::Mock { latency_ms: 400 }
        ));
    }

    #[test]
    fn server_url_selects_the_http_provider() {
        let args = CliArgs::parse_from(["roster-desk", "--server-url", "http://127.0.0.1:8443"]);
        match args.provider_config() {
            ProviderConfig::Http { base_url } => {
                assert_eq!(base_url, "http://127.0.0.1:8443");
            }
            ProviderConfig::Mock { .. } => panic!("expected the HTTP provider"),
        }
    }

    #[test]
    fn mock_latency_is_tunable() {
        let args = CliArgs::parse_from(["roster-desk", "--mock-latency-ms", "0"]);
        assert!(matches!(
            args.provider_config(),
            ProviderConfig::Mock { latency_ms: 0 }
        ));
    }
}
