//! Worker thread owning the tokio runtime and the directory provider.

use std::{sync::Arc, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use roster_core::{DirectoryApi, HttpDirectoryApi, MockDirectoryApi};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub enum ProviderConfig {
    Mock { latency_ms: u64 },
    Http { base_url: String },
}

fn build_provider(config: ProviderConfig) -> anyhow::Result<Arc<dyn DirectoryApi>> {
    match config {
        ProviderConfig::Mock { latency_ms } => Ok(Arc::new(MockDirectoryApi::new(
            Duration::from_millis(latency_ms),
        ))),
        ProviderConfig::Http { base_url } => Ok(Arc::new(HttpDirectoryApi::new(&base_url)?)),
    }
}

pub fn launch(config: ProviderConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match build_provider(config) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                        UiErrorContext::Configuration,
                        format!("invalid directory configuration: {err:#}"),
                    )));
                    error!("failed to build directory provider: {err:#}");
                    return;
                }
            };

            info!("backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchLocations => match api.locations().await {
                        Ok(locations) => {
                            let _ = ui_tx.try_send(UiEvent::LocationsLoaded(locations));
                        }
                        Err(err) => {
                            error!("location fetch failed: {err:#}");
                            let _ = ui_tx.try_send(UiEvent::LocationsFailed {
                                detail: format!("{err:#}"),
                            });
                        }
                    },
                    BackendCommand::CheckName { name, token } => {
                        // Spawned so rapid keystrokes genuinely overlap;
                        // the form's token guard resolves whichever lands
                        // last.
                        let api = Arc::clone(&api);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match api.is_name_available(&name).await {
                                Ok(available) => {
                                    let _ = ui_tx
                                        .try_send(UiEvent::NameChecked { token, available });
                                }
                                Err(err) => {
                                    error!("name check failed: {err:#}");
                                    let _ = ui_tx.try_send(UiEvent::NameCheckFailed {
                                        token,
                                        detail: format!("{err:#}"),
                                    });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}
