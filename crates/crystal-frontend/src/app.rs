//! Main application: three widget panels side by side.

use crystal_core::{Host, HostEvent, LocalHost, SceneConfig, Widget, WidgetKind};
use crystal_renderer::{RenderError, WgpuDriver};

use crate::config::{SharedConfig, create_shared_config};
use crate::input::{PointerSample, container_rect, host_events};
use crate::surface::SurfaceTexture;

/// One embedded widget with its host and egui texture.
struct WidgetPanel {
    widget: Widget<WgpuDriver>,
    host: LocalHost,
    texture: SurfaceTexture,
    enabled: bool,
    error: Option<String>,
}

impl WidgetPanel {
    fn new(
        kind: WidgetKind,
        scene: SceneConfig,
        enabled: bool,
        render_state: &egui_wgpu::RenderState,
    ) -> Self {
        let driver = WgpuDriver::new(
            render_state.device.clone(),
            render_state.queue.clone(),
            render_state.target_format,
        );
        Self {
            widget: Widget::new(kind, scene, driver),
            host: LocalHost::default(),
            texture: SurfaceTexture::new(),
            enabled,
            error: None,
        }
    }

    fn detach(&mut self, render_state: &egui_wgpu::RenderState) {
        self.widget.detach(&mut self.host);
        self.texture.free(render_state);
    }

    /// Lay out the panel, feed it this frame's input and run its frame callback.
    fn show(
        &mut self,
        ui: &mut egui::Ui,
        sample: &PointerSample,
        panel_height: f32,
        render_state: &egui_wgpu::RenderState,
    ) -> Option<bool> {
        let kind = self.widget.kind();
        let mut toggled = None;

        ui.horizontal(|ui| {
            ui.heading(kind.name());
            if ui.checkbox(&mut self.enabled, "Enabled").changed() {
                toggled = Some(self.enabled);
            }
        });

        if toggled == Some(false) {
            self.detach(render_state);
        }
        if toggled == Some(true) {
            self.error = None;
        }

        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), panel_height),
            egui::Sense::hover(),
        );
        let container = container_rect(rect);

        if self.widget.is_attached() && container != self.host.container() {
            self.host.set_container(container);
            self.widget.handle_event(&HostEvent::Resize(container));
        }

        if self.enabled && !self.widget.is_attached() && self.error.is_none() {
            self.host.set_container(container);
            self.host.set_pixel_ratio(ui.ctx().pixels_per_point());
            if let Err(e) = self.widget.attach(&mut self.host) {
                self.error = Some(e.to_string());
            }
        }

        if self.widget.is_attached() {
            for event in host_events(sample, rect) {
                if self.host.is_listening(event.listener_kind()) {
                    self.widget.handle_event(&event);
                }
            }
            if let Some(request) = self.host.take_frame() {
                self.widget.on_frame(&mut self.host, request);
            }
        }

        let painter = ui.painter_at(rect);
        let texture = self.texture.sync(self.widget.driver(), render_state);
        if let (Some(id), Some(viewport)) = (texture, self.widget.viewport()) {
            let edge = viewport.edge as f32;
            painter.image(
                id,
                egui::Rect::from_min_size(rect.min, egui::vec2(edge, edge)),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else if let Some(error) = &self.error {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                error,
                egui::FontId::proportional(14.0),
                ui.visuals().error_fg_color,
            );
        }

        if let Some(kernel) = self.widget.kernel() {
            ui.label(format!(
                "{} objects, {} ticks, {}px surface",
                kernel.scene().len(),
                kernel.ticks(),
                self.widget.driver().edge()
            ));
        } else {
            ui.label("Detached");
        }

        toggled
    }
}

/// Main application state
pub struct CrystalApp {
    config: SharedConfig,
    panels: Vec<WidgetPanel>,
    render_state: Option<egui_wgpu::RenderState>,
}

impl CrystalApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let app_config = config.read().config().clone();
        cc.egui_ctx.set_visuals(app_config.ui.theme.visuals());

        let render_state = cc.wgpu_render_state.clone();
        let panels = match &render_state {
            Some(render_state) => WidgetKind::ALL
                .iter()
                .map(|&kind| {
                    WidgetPanel::new(
                        kind,
                        app_config.scene.clone(),
                        app_config.ui.enabled(kind),
                        render_state,
                    )
                })
                .collect(),
            None => {
                let err = RenderError::Device("eframe started without a wgpu render state".into());
                tracing::warn!("{}", err);
                Vec::new()
            }
        };

        Self {
            config,
            panels,
            render_state,
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.write().save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = {
            let mut manager = self.config.write();
            let ui = &mut manager.config_mut().ui;
            ui.theme = ui.theme.toggled();
            ui.theme
        };
        ctx.set_visuals(theme.visuals());
        self.save_config();
    }

    /// Restore defaults and rebuild every widget from them.
    fn reset_config(&mut self) {
        let config = {
            let mut manager = self.config.write();
            manager.reset_to_defaults();
            manager.config().clone()
        };

        if let Some(render_state) = &self.render_state {
            for panel in &mut self.panels {
                panel.detach(render_state);
                let kind = panel.widget.kind();
                panel.widget.set_config(config.scene.clone());
                panel.enabled = config.ui.enabled(kind);
                panel.error = None;
            }
        }
        self.save_config();
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        let mut toggle_theme = false;
        let mut reset = false;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Theme").clicked() {
                        toggle_theme = true;
                        ui.close_menu();
                    }
                    if ui.button("Reset Configuration").clicked() {
                        reset = true;
                        ui.close_menu();
                    }
                });
            });
        });

        if toggle_theme {
            self.toggle_theme(ctx);
        }
        if reset {
            self.reset_config();
        }
    }
}

impl eframe::App for CrystalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);

        let Some(render_state) = self.render_state.clone() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("No GPU device available");
            });
            return;
        };

        let sample = ctx.input(PointerSample::from_input);
        let panel_height = self.config.read().config().ui.panel_height;
        let mut toggles = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let count = self.panels.len().max(1);
            ui.columns(count, |columns| {
                for (panel, ui) in self.panels.iter_mut().zip(columns.iter_mut()) {
                    if let Some(enabled) = panel.show(ui, &sample, panel_height, &render_state) {
                        toggles.push((panel.widget.kind(), enabled));
                    }
                }
            });
        });

        if !toggles.is_empty() {
            {
                let mut manager = self.config.write();
                for (kind, enabled) in toggles {
                    manager.config_mut().ui.set_enabled(kind, enabled);
                }
            }
            self.save_config();
        }

        if self.panels.iter().any(|p| p.widget.is_attached()) {
            ctx.request_repaint();
        }
    }
}

impl Drop for CrystalApp {
    fn drop(&mut self) {
        for panel in &mut self.panels {
            panel.widget.detach(&mut panel.host);
        }
    }
}
