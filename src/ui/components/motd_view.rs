use eframe::egui;

use crate::ui::state::MotdPhase;

use super::message_card::{self, MessageCard};

/// Returns `true` when the user asked for a new message.
pub fn render(ui: &mut egui::Ui, phase: MotdPhase<'_>) -> bool {
    let mut refetch = false;

    match phase {
        MotdPhase::Loading => {
            ui.label("Loading message of the day...");
        }
        MotdPhase::Error => {
            ui.label("Error loading message of the day");
            refetch = ui.button("Try Again").clicked();
        }
        MotdPhase::Ready(message) => {
            ui.group(|ui| {
                ui.heading("💭 Message of the Day");
                if let Some(message) = message {
                    message_card::render(ui, &MessageCard::new(message));
                    ui.add_space(8.0);
                    refetch = ui.button("Get New Message").clicked();
                }
            });
        }
    }

    refetch
}
