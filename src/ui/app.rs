use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};
use crate::config::ViewKind;
use crate::store::Store;

use super::components::{api_demo, motd_view};
use super::state::ViewState;

pub struct MotdApp {
    store: Store,
    event_receiver: mpsc::Receiver<ApiEvent>,
    views: ViewState,
}

impl MotdApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
        start_view: ViewKind,
    ) -> Self {
        Self {
            store: Store::new(command_sender),
            event_receiver,
            views: ViewState::new(start_view),
        }
    }

    fn handle_api_events(&mut self) {
        let applied = self.store.drain_events(&mut self.event_receiver);
        if applied > 0 {
            log::debug!("Applied {applied} API events");
        }
        self.views.demo.sync(&mut self.store);
    }

    fn apply_demo_actions(&mut self, actions: api_demo::DemoActions) {
        let demo = &mut self.views.demo;
        if actions.check_health {
            demo.handle_health_check(&mut self.store);
        }
        if actions.clear_health {
            demo.clear_health_data();
        }
        if actions.get_message {
            demo.handle_get_message(&mut self.store);
        }
        if actions.clear_message {
            demo.clear_message_data();
        }
        if actions.create_message {
            demo.handle_create_message(&mut self.store);
        }
        if actions.clear_created {
            demo.clear_created_message();
        }
    }
}

impl eframe::App for MotdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();

        let mut selected = self.views.active_view;
        egui::TopBottomPanel::top("view_switcher").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut selected, ViewKind::Motd, "Message of the Day");
                ui.selectable_value(&mut selected, ViewKind::Demo, "API Demo");
            });
        });
        self.views.switch_to(selected, &mut self.store);
        self.views.mount_active(&mut self.store);

        egui::CentralPanel::default().show(ctx, |ui| match self.views.active_view {
            ViewKind::Motd => {
                if motd_view::render(ui, self.views.motd.phase(&self.store)) {
                    self.views.motd.refetch(&mut self.store);
                }
            }
            ViewKind::Demo => {
                let actions = api_demo::render(ui, &mut self.views.demo, &self.store);
                self.apply_demo_actions(actions);
            }
        });

        ctx.request_repaint();
    }
}
