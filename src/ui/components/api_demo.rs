use eframe::egui;

use crate::store::Store;
use crate::ui::state::ApiDemoState;

use super::message_card::{self, MessageCard};

/// Clicks collected during one frame; applied by the app after rendering.
#[derive(Default)]
pub struct DemoActions {
    pub check_health: bool,
    pub clear_health: bool,
    pub get_message: bool,
    pub clear_message: bool,
    pub create_message: bool,
    pub clear_created: bool,
}

pub fn render(ui: &mut egui::Ui, state: &mut ApiDemoState, store: &Store) -> DemoActions {
    let mut actions = DemoActions::default();

    ui.heading("Amplify/API Gateway Demo - Three Endpoints");
    ui.add_space(10.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        health_section(ui, state, store, &mut actions);
        ui.add_space(10.0);
        message_section(ui, state, store, &mut actions);
        ui.add_space(10.0);
        create_section(ui, state, store, &mut actions);
    });

    actions
}

fn health_section(
    ui: &mut egui::Ui,
    state: &ApiDemoState,
    store: &Store,
    actions: &mut DemoActions,
) {
    ui.group(|ui| {
        ui.heading("🏥 Health Check - GET /health");

        let loading = state.health_loading(store);
        let health = state.visible_health(store);
        ui.horizontal(|ui| {
            let label = if loading { "Checking..." } else { "Check Health" };
            actions.check_health = ui.add_enabled(!loading, egui::Button::new(label)).clicked();
            if health.is_some() {
                actions.clear_health = ui.button("Clear").clicked();
            }
        });

        if let Some(error) = state.health_error(store) {
            ui.colored_label(egui::Color32::RED, error);
        }

        if let Some(health) = health {
            ui.label(egui::RichText::new(format!("Status: {}", health.status)).monospace());
            ui.label(egui::RichText::new(format!("Timestamp: {}", health.timestamp)).monospace());
        }
    });
}

fn message_section(
    ui: &mut egui::Ui,
    state: &ApiDemoState,
    store: &Store,
    actions: &mut DemoActions,
) {
    ui.group(|ui| {
        ui.heading("📖 Get Message - GET /api/messageoftheday");

        let loading = state.message_loading(store);
        let message = state.visible_message(store);
        ui.horizontal(|ui| {
            let label = if loading { "Loading..." } else { "Get Message" };
            actions.get_message = ui.add_enabled(!loading, egui::Button::new(label)).clicked();
            if message.is_some() {
                actions.clear_message = ui.button("Clear").clicked();
            }
        });

        if let Some(error) = state.message_error(store) {
            ui.colored_label(egui::Color32::RED, error);
        }

        if let Some(message) = message {
            message_card::render(ui, &MessageCard::new(message));
        }
    });
}

fn create_section(
    ui: &mut egui::Ui,
    state: &mut ApiDemoState,
    store: &Store,
    actions: &mut DemoActions,
) {
    ui.group(|ui| {
        ui.heading("✍️ Create Message - POST /api/messageoftheday");

        ui.label(egui::RichText::new("Message *").strong());
        ui.add(
            egui::TextEdit::multiline(&mut state.new_content)
                .hint_text("Enter your inspiring message...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        let label = if state.create_loading(store) {
            "Creating..."
        } else {
            "Create Message"
        };
        actions.create_message = ui
            .add_enabled(state.can_submit(store), egui::Button::new(label))
            .clicked();

        if let Some(error) = state.create_error(store) {
            ui.colored_label(egui::Color32::RED, error);
        }

        if let Some(created) = &state.created_message {
            actions.clear_created = message_card::render_created(ui, &MessageCard::new(created));
        }
    });
}
