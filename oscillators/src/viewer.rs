//! Interactive window for both oscillators
//!
//! A chooser screen picks the oscillator. Each oscillator screen has a
//! "Functions" menu (Start, Pause, Reset, Exit), one input row per parameter,
//! the air friction toggle, live read-outs and the equations sidebar.

use std::time::Duration;

use common::{Camera2D, GraphicsContext};
use egui::{Color32, RichText};
use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::controller::{AnimationController, AnimationState};
use crate::equations_ui::{
    draw_equations_sidebar, Equation, PENDULUM_EQUATIONS, PENDULUM_VARIABLES, SPRING_EQUATIONS,
    SPRING_VARIABLES,
};
use crate::model::OscillatorModel;
use crate::params::{PendulumField, SpringField};
use crate::pendulum::{MathPendulumModel, PendulumSnapshot};
use crate::renderer::{LineRenderer, Viewport};
use crate::scene::{self, Scene, BOB_RADIUS, PENDULUM_PIXELS_PER_UNIT};
use crate::spring::{SpringOscillatorModel, SpringSnapshot};

const MAX_VERTICES: usize = 4096;
const SCENE_MARGIN: f32 = 30.0;

/// UI-facing description of an oscillator
pub trait Presented: OscillatorModel {
    const TITLE: &'static str;
    const EQUATIONS: &'static [Equation];
    const VARIABLES: &'static [(&'static str, &'static str)];

    fn fields() -> &'static [Self::Field];

    fn field_value(&self, field: Self::Field) -> f64;

    fn readouts(snapshot: &Self::Snapshot) -> Vec<(&'static str, String)>;

    fn scene(&self, snapshot: &Self::Snapshot) -> Scene;

    /// World-space box the camera keeps in view
    fn bounds(&self, snapshot: &Self::Snapshot) -> (Vec2, Vec2);
}

/// Read-out value with five decimals
pub fn fixed(value: f64) -> String {
    format!("{value:.5}")
}

fn optional(value: Option<f64>) -> String {
    value.map(fixed).unwrap_or_else(|| "-".to_string())
}

impl Presented for MathPendulumModel {
    const TITLE: &'static str = "Gravity Pendulum";
    const EQUATIONS: &'static [Equation] = PENDULUM_EQUATIONS;
    const VARIABLES: &'static [(&'static str, &'static str)] = PENDULUM_VARIABLES;

    fn fields() -> &'static [PendulumField] {
        &PendulumField::ALL
    }

    fn field_value(&self, field: PendulumField) -> f64 {
        self.params().get(field)
    }

    fn readouts(s: &PendulumSnapshot) -> Vec<(&'static str, String)> {
        vec![
            ("Angle (°)", fixed(s.angle_deg)),
            ("Height", fixed(s.height)),
            ("Potential energy", fixed(s.potential_energy)),
            ("Kinetic energy", fixed(s.kinetic_energy)),
            ("Total mechanical energy", optional(s.total_mechanical_energy)),
            ("Velocity", fixed(s.velocity)),
            ("Amplitude", optional(s.amplitude)),
            ("Period", optional(s.period)),
        ]
    }

    fn scene(&self, snapshot: &PendulumSnapshot) -> Scene {
        scene::pendulum_scene(snapshot)
    }

    fn bounds(&self, snapshot: &PendulumSnapshot) -> (Vec2, Vec2) {
        let reach = snapshot.display_length as f32 * PENDULUM_PIXELS_PER_UNIT + BOB_RADIUS;
        (Vec2::new(-reach, -reach), Vec2::new(reach, 0.0))
    }
}

impl Presented for SpringOscillatorModel {
    const TITLE: &'static str = "Spring Oscillator";
    const EQUATIONS: &'static [Equation] = SPRING_EQUATIONS;
    const VARIABLES: &'static [(&'static str, &'static str)] = SPRING_VARIABLES;

    fn fields() -> &'static [SpringField] {
        &SpringField::ALL
    }

    fn field_value(&self, field: SpringField) -> f64 {
        self.params().get(field)
    }

    fn readouts(s: &SpringSnapshot) -> Vec<(&'static str, String)> {
        vec![
            ("Position", fixed(s.position)),
            ("Displacement", fixed(s.displacement)),
            ("Equilibrium length", fixed(s.equilibrium_length)),
            ("Potential energy", fixed(s.potential_energy)),
            ("Kinetic energy", fixed(s.kinetic_energy)),
            ("Total mechanical energy", optional(s.total_mechanical_energy)),
            ("Velocity", fixed(s.velocity)),
            ("Amplitude", fixed(s.amplitude)),
            ("Period", fixed(s.period)),
        ]
    }

    fn scene(&self, snapshot: &SpringSnapshot) -> Scene {
        scene::spring_scene(snapshot, &self.params().config)
    }

    fn bounds(&self, snapshot: &SpringSnapshot) -> (Vec2, Vec2) {
        let config = &self.params().config;
        let deepest = if snapshot.oscillations_enabled && !snapshot.at_rest_length {
            snapshot.equilibrium_length + snapshot.amplitude
        } else {
            scene::spring_length(snapshot, config)
        };
        let depth = deepest as f32 + BOB_RADIUS;
        (Vec2::new(-BOB_RADIUS, -depth), Vec2::new(BOB_RADIUS, 0.0))
    }
}

/// Message box shown over the oscillator screen
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: &'static str,
    pub text: String,
}

/// What the user asked for from an oscillator screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Reset,
    Exit,
}

/// One oscillator screen: the controller plus its input buffers.
pub struct Panel<M: Presented> {
    pub controller: AnimationController<M>,
    inputs: Vec<String>,
    notice: Option<Notice>,
}

impl<M: Presented> Panel<M> {
    pub fn new(model: M) -> Self {
        let mut panel = Self {
            controller: AnimationController::new(model),
            inputs: Vec::new(),
            notice: None,
        };
        panel.refresh_inputs();
        panel
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn input(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str)
    }

    pub fn set_input(&mut self, index: usize, text: &str) {
        if let Some(input) = self.inputs.get_mut(index) {
            *input = text.to_string();
        }
    }

    fn refresh_inputs(&mut self) {
        let model = self.controller.model();
        self.inputs = M::fields().iter().map(|f| model.field_value(*f).to_string()).collect();
    }

    fn warn(&mut self, text: String) {
        self.notice = Some(Notice { title: "Warning", text });
    }

    /// Parse the input row and hand the value to the controller.
    pub fn apply_input(&mut self, index: usize) {
        let Some(&field) = M::fields().get(index) else {
            return;
        };
        let name = M::field_name(field);
        let parsed = self.inputs[index].trim().parse::<f64>();
        match parsed {
            Ok(value) => match self.controller.set_parameter(field, value) {
                Ok(()) => self.refresh_inputs(),
                Err(err) => self.warn(err.to_string()),
            },
            Err(_) => self.warn(format!("{name} must be a number")),
        }
    }

    pub fn reset_input(&mut self, index: usize) {
        let Some(&field) = M::fields().get(index) else {
            return;
        };
        match self.controller.reset_parameter(field) {
            Ok(()) => self.refresh_inputs(),
            Err(err) => self.warn(err.to_string()),
        }
    }

    pub fn set_air_friction(&mut self, enabled: bool) {
        if let Err(err) = self.controller.set_air_friction(enabled) {
            self.warn(err.to_string());
        }
    }

    pub fn start(&mut self) {
        match self.controller.start() {
            Ok(AnimationState::Disabled) => self.warn(
                "The parameters are outside the safe range, oscillations are disabled. \
                 Press Reset to try again."
                    .to_string(),
            ),
            Ok(_) => {}
            Err(err) => self.warn(err.to_string()),
        }
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.refresh_inputs();
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.controller.pause(),
            Command::Reset => self.reset(),
            Command::Exit => {}
        }
    }

    /// Lay out the whole screen. Returns true when the user chose Exit.
    fn ui(&mut self, ctx: &egui::Context) -> bool {
        let mut command = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Functions", |ui| {
                    for (label, cmd) in [
                        ("Start", Command::Start),
                        ("Pause", Command::Pause),
                        ("Reset", Command::Reset),
                        ("Exit", Command::Exit),
                    ] {
                        if ui.button(label).clicked() {
                            command = Some(cmd);
                            ui.close_menu();
                        }
                    }
                });
                ui.separator();
                ui.label(RichText::new(M::TITLE).strong());
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let state = self.controller.state();
                let color = match state {
                    AnimationState::Running => Color32::GREEN,
                    AnimationState::Paused => Color32::YELLOW,
                    AnimationState::Disabled => Color32::RED,
                    AnimationState::Idle => Color32::GRAY,
                };
                ui.label(RichText::new(state.label()).color(color));
                ui.separator();
                ui.label(format!(
                    "Tick: {} ms",
                    crate::config::TICK_INTERVAL.as_millis()
                ));
            });
        });

        draw_equations_sidebar(ctx, M::TITLE, M::EQUATIONS, M::VARIABLES);

        egui::SidePanel::left("parameters").default_width(260.0).show(ctx, |ui| {
            let unlocked = !self.controller.requires_input_lock();

            ui.heading("Parameters");
            egui::Grid::new("parameter_grid").num_columns(4).show(ui, |ui| {
                for (index, field) in M::fields().iter().enumerate() {
                    ui.label(M::field_name(*field));
                    ui.add_enabled(
                        unlocked,
                        egui::TextEdit::singleline(&mut self.inputs[index]).desired_width(80.0),
                    );
                    if ui.add_enabled(unlocked, egui::Button::new("OK")).clicked() {
                        self.apply_input(index);
                    }
                    if ui.add_enabled(unlocked, egui::Button::new("Reset")).clicked() {
                        self.reset_input(index);
                    }
                    ui.end_row();
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                let on = self.controller.model().air_friction();
                ui.label("Air friction");
                if ui.add_enabled(unlocked, egui::SelectableLabel::new(on, "On")).clicked() {
                    self.set_air_friction(true);
                }
                if ui.add_enabled(unlocked, egui::SelectableLabel::new(!on, "Off")).clicked() {
                    self.set_air_friction(false);
                }
            });

            ui.separator();
            ui.heading("Read-outs");
            let snapshot = self.controller.snapshot();
            egui::Grid::new("readout_grid").num_columns(2).striped(true).show(ui, |ui| {
                for (label, value) in M::readouts(&snapshot) {
                    ui.label(label);
                    ui.label(RichText::new(value).monospace());
                    ui.end_row();
                }
            });
        });

        if let Some(notice) = self.notice.clone() {
            egui::Window::new(notice.title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(notice.text.as_str());
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
        }

        match command {
            Some(Command::Exit) => true,
            Some(cmd) => {
                self.run_command(cmd);
                false
            }
            None => false,
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Space => self.run_command(Command::Pause),
            KeyCode::KeyS => self.run_command(Command::Start),
            KeyCode::KeyR => self.run_command(Command::Reset),
            KeyCode::Escape => return true,
            _ => {}
        }
        false
    }

    fn prepare_scene(&self, camera: &mut Camera2D) -> Scene {
        let model = self.controller.model();
        let snapshot = self.controller.snapshot();
        let (min, max) = model.bounds(&snapshot);
        camera.frame(min, max, SCENE_MARGIN);
        model.scene(&snapshot)
    }
}

pub enum Screen {
    Chooser,
    Pendulum(Panel<MathPendulumModel>),
    Spring(Panel<SpringOscillatorModel>),
}

impl Screen {
    fn advance(&mut self, elapsed: Duration) {
        match self {
            Screen::Chooser => {}
            Screen::Pendulum(panel) => {
                panel.controller.advance(elapsed);
            }
            Screen::Spring(panel) => {
                panel.controller.advance(elapsed);
            }
        }
    }
}

fn chooser_ui(ctx: &egui::Context) -> Option<Screen> {
    let mut next = None;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.heading(RichText::new("Mechanical Oscillators").color(Color32::LIGHT_BLUE));
            ui.add_space(16.0);
            if ui.button(MathPendulumModel::TITLE).clicked() {
                next = Some(Screen::Pendulum(Panel::new(MathPendulumModel::new())));
            }
            ui.add_space(8.0);
            if ui.button(SpringOscillatorModel::TITLE).clicked() {
                next = Some(Screen::Spring(Panel::new(SpringOscillatorModel::new())));
            }
        });
    });
    next
}

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

pub struct App {
    pub ctx: GraphicsContext,
    renderer: LineRenderer,
    camera: Camera2D,
    screen: Screen,
    egui: EguiState,
}

impl App {
    pub fn new(ctx: GraphicsContext) -> Self {
        let renderer = LineRenderer::new(&ctx, MAX_VERTICES);
        let camera = Camera2D::new(ctx.aspect_ratio());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1, false);

        Self {
            ctx,
            renderer,
            camera,
            screen: Screen::Chooser,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.screen.advance(elapsed);
    }

    /// Keyboard shortcuts not consumed by egui
    pub fn handle_key(&mut self, key: KeyCode) {
        let exit = match &mut self.screen {
            Screen::Chooser => false,
            Screen::Pendulum(panel) => panel.handle_key(key),
            Screen::Spring(panel) => panel.handle_key(key),
        };
        if exit {
            self.exit_to_chooser();
        }
    }

    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }

    fn exit_to_chooser(&mut self) {
        log::info!("returning to oscillator chooser");
        self.screen = Screen::Chooser;
    }

    fn build_ui(&mut self, ctx: &egui::Context) {
        let mut next = None;
        let exit = match &mut self.screen {
            Screen::Chooser => {
                next = chooser_ui(ctx);
                false
            }
            Screen::Pendulum(panel) => panel.ui(ctx),
            Screen::Spring(panel) => panel.ui(ctx),
        };
        if let Some(screen) = next {
            self.screen = screen;
        } else if exit {
            self.exit_to_chooser();
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let egui_ctx = self.egui.ctx.clone();
        let mut scene_rect = egui::Rect::NOTHING;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            self.build_ui(ctx);
            scene_rect = ctx.available_rect();
        });
        let pixels_per_point = full_output.pixels_per_point;

        let viewport: Viewport = [
            scene_rect.min.x * pixels_per_point,
            scene_rect.min.y * pixels_per_point,
            scene_rect.width() * pixels_per_point,
            scene_rect.height() * pixels_per_point,
        ];
        self.camera
            .update_aspect_ratio(viewport[2].max(1.0) / viewport[3].max(1.0));

        let scene = match &self.screen {
            Screen::Chooser => None,
            Screen::Pendulum(panel) => Some(panel.prepare_scene(&mut self.camera)),
            Screen::Spring(panel) => Some(panel.prepare_scene(&mut self.camera)),
        };
        match scene {
            Some(scene) => self.renderer.update_scene(&self.ctx.queue, &scene),
            None => self.renderer.clear_scene(),
        }
        self.renderer.update_camera(&self.ctx.queue, &self.camera);

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, Some(clamp_viewport(viewport, &self.ctx)));

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// wgpu rejects viewports that leave the render target
fn clamp_viewport([x, y, w, h]: Viewport, ctx: &GraphicsContext) -> Viewport {
    let width = ctx.config.width as f32;
    let height = ctx.config.height as f32;
    let x = x.clamp(0.0, width);
    let y = y.clamp(0.0, height);
    [x, y, w.min(width - x).max(0.0), h.min(height - y).max(0.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readouts_use_five_decimals() {
        assert_eq!(fixed(6.343_739_8), "6.34374");
        assert_eq!(fixed(0.0), "0.00000");
        assert_eq!(optional(None), "-");
    }

    #[test]
    fn test_apply_input_rejects_garbage() {
        let mut panel = Panel::new(MathPendulumModel::new());
        panel.set_input(0, "abc");
        panel.apply_input(0);
        assert_eq!(panel.notice().unwrap().text, "length must be a number");
        assert_eq!(panel.controller.model().params().length_for_calculations, 10.0);
    }

    #[test]
    fn test_apply_input_reports_range() {
        let mut panel = Panel::new(MathPendulumModel::new());
        panel.set_input(1, "120");
        panel.apply_input(1);
        assert!(panel.notice().unwrap().text.contains("[-90, 90]"));
        assert_eq!(panel.controller.model().params().angle_deg, 0.0);
    }

    #[test]
    fn test_apply_and_reset_input_roundtrip() {
        let mut panel = Panel::new(SpringOscillatorModel::new());
        panel.set_input(2, " 40 ");
        panel.apply_input(2);
        assert!(panel.notice().is_none());
        assert_eq!(panel.input(2), Some("40"));
        assert_eq!(panel.controller.model().state().position, 40.0);

        panel.reset_input(2);
        assert_eq!(panel.input(2), Some("0"));
    }

    #[test]
    fn test_spring_start_without_stretch_warns() {
        let mut panel = Panel::new(SpringOscillatorModel::new());
        panel.start();
        assert_eq!(panel.controller.state(), AnimationState::Idle);
        assert!(panel.notice().is_some());
    }

    #[test]
    fn test_locked_inputs_while_running() {
        let mut panel = Panel::new(MathPendulumModel::new());
        panel.set_input(1, "30");
        panel.apply_input(1);
        panel.start();
        panel.set_input(1, "10");
        panel.apply_input(1);
        assert!(panel.notice().unwrap().text.contains("cannot be changed"));
        assert_eq!(panel.controller.model().params().angle_deg, 30.0);
    }

    #[test]
    fn test_spring_bounds_follow_mode() {
        let mut model = SpringOscillatorModel::new();
        model.set_parameter(SpringField::MaxStretch, 100.0).unwrap();
        let snapshot = model.snapshot(None, crate::model::Motion::Live);
        let (min, max) = model.bounds(&snapshot);
        let expected = (snapshot.equilibrium_length + 100.0) as f32 + BOB_RADIUS;
        assert!((min.y + expected).abs() < 1e-3);
        assert_eq!(max.y, 0.0);
    }
}
