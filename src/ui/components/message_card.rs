use std::fmt::Display;

use chrono::TimeZone;
use eframe::egui;

use crate::common::Message;
use crate::ui::format::{format_created_at, format_timestamp_in};

/// Chuỗi hiển thị của một message, tách khỏi egui để test được.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCard {
    pub quote: String,
    pub id: String,
    pub user_id: Option<String>,
    pub created: String,
}

impl MessageCard {
    pub fn new(message: &Message) -> Self {
        Self::with_created(message, format_created_at(&message.created_at))
    }

    pub fn in_timezone<Tz>(message: &Message, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self::with_created(message, format_timestamp_in(&message.created_at, tz))
    }

    fn with_created(message: &Message, created: String) -> Self {
        Self {
            quote: format!("\"{}\"", message.content),
            id: message.id.clone(),
            user_id: message.user_id.clone().filter(|user| !user.is_empty()),
            created,
        }
    }

    pub fn user_line(&self) -> Option<String> {
        self.user_id.as_ref().map(|user| format!("— User: {user}"))
    }

    pub fn meta_line(&self) -> String {
        format!("ID: {} | Created: {}", self.id, self.created)
    }

    pub fn detail_line(&self) -> String {
        format!(
            "ID: {} | User ID: {} | Created: {}",
            self.id,
            self.user_id.as_deref().unwrap_or_default(),
            self.created
        )
    }
}

pub fn render(ui: &mut egui::Ui, card: &MessageCard) {
    ui.label(egui::RichText::new(&card.quote).italics().size(16.0));
    if let Some(user_line) = card.user_line() {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            ui.label(egui::RichText::new(user_line).strong());
        });
    }
    ui.label(egui::RichText::new(card.meta_line()).small().weak());
}

/// Returns `true` when the Clear button was clicked.
pub fn render_created(ui: &mut egui::Ui, card: &MessageCard) -> bool {
    let mut clear = false;
    ui.group(|ui| {
        ui.colored_label(
            egui::Color32::from_rgb(0x15, 0x57, 0x24),
            egui::RichText::new("✅ Message Created Successfully!").strong(),
        );
        ui.label(egui::RichText::new(&card.quote).italics().size(16.0));
        ui.label(egui::RichText::new(card.detail_line()).monospace().small());
        clear = ui.small_button("Clear").clicked();
    });
    clear
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn message(user_id: Option<&str>) -> Message {
        Message {
            id: "motd-42".to_string(),
            content: "Ship small, ship often".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            user_id: user_id.map(str::to_string),
        }
    }

    #[test]
    fn card_shows_content_id_and_formatted_time() {
        let card = MessageCard::in_timezone(&message(Some("user-1")), &Utc);

        assert_eq!(card.quote, "\"Ship small, ship often\"");
        assert_eq!(card.meta_line(), "ID: motd-42 | Created: 1/1/2024, 12:00:00 AM");
        assert_eq!(card.user_line().as_deref(), Some("— User: user-1"));
    }

    #[test]
    fn local_card_flags_unparseable_timestamp() {
        let mut broken = message(None);
        broken.created_at = "not a date".to_string();

        let card = MessageCard::new(&broken);

        assert_eq!(card.meta_line(), "ID: motd-42 | Created: Invalid Date");
        assert_ne!(MessageCard::new(&message(None)).created, "Invalid Date");
    }

    #[test]
    fn missing_user_hides_user_line() {
        let card = MessageCard::in_timezone(&message(None), &Utc);

        assert!(card.user_line().is_none());
        assert_eq!(
            card.detail_line(),
            "ID: motd-42 | User ID:  | Created: 1/1/2024, 12:00:00 AM"
        );
    }
}
