//! App shell for the roster entry form.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use roster_core::{FormPhase, FormState, LOCATION_SENTINEL};
use serde::{Deserialize, Serialize};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::apply_ui_event;

pub const SETTINGS_STORAGE_KEY: &str = "roster_desk_settings";

/// Inline hint shown under the name field for an unavailable name.
const NAME_TAKEN_HINT: &str = "this name has already been taken";

const FIELD_WIDTH: f32 = 280.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub text_scale: f32,
    pub compact_density: bool,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self {
            text_scale: 1.0,
            compact_density: false,
        }
    }
}

impl PersistedDesktopSettings {
    fn sanitized(self) -> Self {
        Self {
            text_scale: self.text_scale.clamp(0.8, 1.4),
            compact_density: self.compact_density,
        }
    }
}

pub struct RosterApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: FormState,
    status: String,

    settings: PersistedDesktopSettings,
    applied_settings: Option<PersistedDesktopSettings>,
    settings_open: bool,
}

impl RosterApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            form: FormState::new(),
            status: "Loading locations...".to_string(),
            settings: persisted_settings.unwrap_or_default().sanitized(),
            applied_settings: None,
            settings_open: false,
        };

        app.form.begin_location_load();
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::FetchLocations,
            &mut app.status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.form, event, &mut self.status);
        }
    }

    fn apply_settings_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_settings == Some(self.settings) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        if self.settings.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
            style.spacing.interact_size = egui::vec2(40.0, 24.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
            style.spacing.interact_size = egui::vec2(40.0, 30.0);
        }
        ctx.set_style(style);
        ctx.set_zoom_factor(self.settings.text_scale);
        self.applied_settings = Some(self.settings);
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        egui::Window::new("Settings")
            .open(&mut self.settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Readability");
                ui.add(
                    egui::Slider::new(&mut self.settings.text_scale, 0.8..=1.4)
                        .text("Text scale")
                        .step_by(0.05),
                );
                ui.checkbox(&mut self.settings.compact_density, "Compact UI density");

                if ui.button("Reset to defaults").clicked() {
                    self.settings = PersistedDesktopSettings::default();
                }
            });
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.form.error.clone() else {
            return;
        };

        egui::Frame::new()
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.form.dismiss_error();
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let busy = self.form.is_busy();

        egui::Grid::new("roster_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Name").strong());
                ui.vertical(|ui| {
                    let mut name_buf = self.form.name.clone();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut name_buf)
                            .hint_text("Enter name")
                            .desired_width(FIELD_WIDTH),
                    );
                    if response.changed() {
                        if let Some(request) = self.form.edit_name(name_buf) {
                            dispatch_backend_command(
                                &self.cmd_tx,
                                BackendCommand::CheckName {
                                    name: request.name,
                                    token: request.token,
                                },
                                &mut self.status,
                            );
                        }
                    }
                    if !self.form.is_valid_name {
                        ui.colored_label(egui::Color32::from_rgb(222, 90, 90), NAME_TAKEN_HINT);
                    }
                });
                ui.end_row();

                ui.label(egui::RichText::new("Location").strong());
                let selected_text = if self.form.has_location_selected() {
                    self.form.location.clone()
                } else {
                    LOCATION_SENTINEL.to_string()
                };
                ui.add_enabled_ui(!busy, |ui| {
                    egui::ComboBox::from_id_salt("location_select")
                        .selected_text(selected_text)
                        .width(FIELD_WIDTH)
                        .show_ui(ui, |ui| {
                            let mut chosen: Option<String> = None;
                            for location in &self.form.locations {
                                let is_selected = if location == LOCATION_SENTINEL {
                                    !self.form.has_location_selected()
                                } else {
                                    self.form.location == *location
                                };
                                if ui.selectable_label(is_selected, location.as_str()).clicked() {
                                    chosen = Some(location.clone());
                                }
                            }
                            if let Some(location) = chosen {
                                self.form.select_location(location);
                            }
                        });
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, egui::Button::new("Clear")).clicked() {
                self.form.clear();
                self.status = "Cleared".to_string();
            }
            if ui.add_enabled(!busy, egui::Button::new("Add")).clicked() {
                self.form.add_entry();
            }
            if busy {
                ui.spinner();
                match self.form.phase() {
                    FormPhase::LoadingLocations => {
                        ui.small("Loading locations...");
                    }
                    FormPhase::ValidatingName => {
                        ui.small("Checking name...");
                    }
                    FormPhase::Idle => {}
                }
            }
        });
    }

    fn show_roster_table(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.separator();
        ui.label(
            egui::RichText::new(format!("Roster ({})", self.form.rows.len())).strong(),
        );
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("roster_table")
                    .num_columns(2)
                    .striped(true)
                    .min_col_width(FIELD_WIDTH / 2.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("Name").strong());
                        ui.label(egui::RichText::new("Location").strong());
                        ui.end_row();

                        for row in &self.form.rows {
                            ui.label(row.name.as_str());
                            ui.label(row.location.as_str());
                            ui.end_row();
                        }
                    });
            });
    }
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_settings_if_needed(ctx);
        self.show_settings_window(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("⚙ Settings").clicked() {
                        self.settings_open = true;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Roster Desk");
            ui.weak("Add people and where they are based.");
            ui.add_space(8.0);

            self.show_error_banner(ui);
            self.show_form(ui);
            self.show_roster_table(ui);
        });

        // Backend events arrive without input; keep polling for them while
        // work is outstanding, lazily otherwise.
        if self.form.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
