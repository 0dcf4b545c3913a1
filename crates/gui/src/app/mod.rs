//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::i18n::{set_lang, t};
use crate::state::{AppSettings, AppState, EditorSession, Notice};
use crate::ui::{properties, scene_tree, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Seconds a notice stays on screen
const NOTICE_SECONDS: f64 = 4.0;

struct Toast {
    notice: Notice,
    expires_at: f64,
}

/// Main application
pub struct BlockStudioApp {
    state: AppState,
    viewport: ViewportPanel,
    toasts: Vec<Toast>,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Project shown in the window title
    last_title_key: String,
}

impl BlockStudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, session: EditorSession) -> Self {
        set_lang(settings.ui.language.into());
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        let last_font_size = settings.ui.font_size;
        Self {
            state: AppState::new(settings, session),
            viewport: ViewportPanel::new(),
            toasts: Vec::new(),
            last_font_size,
            last_title_key: String::new(),
        }
    }

    fn sync_settings(&mut self, ctx: &egui::Context) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }
        if *self.state.session.simulation_settings() != self.state.settings.simulation {
            self.state
                .session
                .set_simulation_settings(self.state.settings.simulation.clone());
        }
        if self.state.session.project_key() != self.last_title_key {
            self.last_title_key = self.state.session.project_key().to_string();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "Block Studio: {}",
                self.last_title_key
            )));
        }
    }

    /// Advance play mode by this frame's time
    fn step_play(&mut self, ctx: &egui::Context) {
        if !self.state.session.is_playing() {
            return;
        }
        self.state
            .session
            .set_held_keys(keyboard::sample_move_keys(ctx));
        let dt = ctx.input(|i| i.stable_dt);
        self.state.session.frame(dt);
        ctx.request_repaint();
    }

    fn collect_notices(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.toasts.retain(|toast| toast.expires_at > now);
        for notice in self.state.session.take_notices() {
            self.toasts.push(Toast {
                notice,
                expires_at: now + NOTICE_SECONDS,
            });
        }
        if !self.toasts.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -34.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let (fill, text_color) = if toast.notice.is_error() {
                        (egui::Color32::from_rgb(254, 226, 226), egui::Color32::from_rgb(153, 27, 27))
                    } else {
                        (egui::Color32::from_rgb(220, 252, 231), egui::Color32::from_rgb(22, 101, 52))
                    };
                    egui::Frame::popup(ui.style())
                        .fill(fill)
                        .show(ui, |ui| {
                            ui.colored_label(text_color, notice_text(&toast.notice));
                        });
                }
            });
    }
}

/// Localized notice text
fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::DeleteRejected { name } => format!("{}: {name}", t("notice.delete_rejected")),
        Notice::InvalidInput { reason } => format!("{}: {reason}", t("notice.invalid_input")),
        Notice::Saved { project } => format!("{}: {project}", t("notice.saved")),
        Notice::SaveFailed { reason } => format!("{}: {reason}", t("notice.save_failed")),
        Notice::Loaded { project } => format!("{}: {project}", t("notice.loaded")),
        Notice::LoadFailed { reason } => format!("{}: {reason}", t("notice.load_failed")),
        Notice::ProjectNotFound { project } => format!("{}: {project}", t("notice.not_found")),
    }
}

impl eframe::App for BlockStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_settings(ctx);

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);
        self.step_play(ctx);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::insert_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Dialogs ──────────────────────────────────────────
        menus::settings_window(ctx, &mut self.state);
        menus::open_project_dialog(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)))
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)))
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: Explorer ─────────────────────────────
        if self.state.panels.explorer {
            egui::SidePanel::left("explorer")
                .default_width(220.0)
                .width_range(150.0..=400.0)
                .resizable(true)
                .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
                .show(ctx, |ui| {
                    scene_tree::show(ui, &mut self.state);
                });
        }

        // ── Right panel: Properties ──────────────────────────
        if self.state.panels.properties {
            egui::SidePanel::right("properties")
                .default_width(270.0)
                .width_range(200.0..=460.0)
                .resizable(true)
                .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("props_scroll")
                        .show(ui, |ui| {
                            properties::show(ui, &mut self.state);
                        });
                });
        }

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        self.collect_notices(ctx);
        self.show_toasts(ctx);
    }
}
