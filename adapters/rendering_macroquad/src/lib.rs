#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the maze solver editor.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The editor draws into a [`PixelBuffer`]; this adapter uploads that buffer
//! into a texture every frame, scales it into the window next to a control
//! panel and translates mouse and keyboard activity into [`FrameInput`]. All
//! immediate-mode UI calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};
use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    color::WHITE,
    input::{
        is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
        KeyCode, MouseButton,
    },
    math::Vec2 as MacroquadVec2,
    texture::{draw_texture_ex, DrawTextureParams, FilterMode, Image, Texture2D},
};
use maze_solver_core::{AlgorithmId, ALGORITHMS};
use maze_solver_rendering::{
    Color, FrameFeedback, FrameInput, NoticeBoard, PixelBuffer, PointerButton, PointerEvent,
    Presentation, RenderingBackend, Surface,
};

const DEFAULT_PANEL_WIDTH: f32 = 240.0;
const MIN_WINDOW_HEIGHT: f32 = 320.0;

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    clear_latched: bool,
    solve_latched: bool,
    cycle_algorithm_latched: bool,
    dismiss_latched: bool,
}

impl ControlPanelInputState {
    /// Returns whether the UI requested a grid clear and clears the latch so the
    /// action fires only once.
    pub fn take_clear(&mut self) -> bool {
        std::mem::take(&mut self.clear_latched)
    }

    /// Records that the control-panel button requested a grid clear this frame.
    pub fn register_clear(&mut self) {
        self.clear_latched = true;
    }

    /// Returns the latched solve request, clearing it so the action fires once.
    pub fn take_solve(&mut self) -> bool {
        std::mem::take(&mut self.solve_latched)
    }

    /// Records that the control-panel button requested a solve this frame.
    pub fn register_solve(&mut self) {
        self.solve_latched = true;
    }

    /// Returns the latched algorithm cycle request, clearing it so the action fires once.
    pub fn take_cycle_algorithm(&mut self) -> bool {
        std::mem::take(&mut self.cycle_algorithm_latched)
    }

    /// Records that the control-panel button requested the next algorithm this frame.
    pub fn register_cycle_algorithm(&mut self) {
        self.cycle_algorithm_latched = true;
    }

    /// Returns the latched notice dismissal, clearing it so the action fires once.
    pub fn take_dismiss(&mut self) -> bool {
        std::mem::take(&mut self.dismiss_latched)
    }

    /// Records that the control-panel button dismissed the notice this frame.
    pub fn register_dismiss(&mut self) {
        self.dismiss_latched = true;
    }
}

/// Algorithm currently chosen in the control panel.
#[derive(Clone, Debug, PartialEq, Eq)]
struct AlgorithmSelection {
    current: AlgorithmId,
}

impl AlgorithmSelection {
    fn new(initial: AlgorithmId) -> Self {
        Self { current: initial }
    }

    fn current(&self) -> &AlgorithmId {
        &self.current
    }

    /// Advances to the next catalogue entry, wrapping around.
    ///
    /// Identifiers missing from the catalogue advance to its first entry.
    fn cycle(&mut self) {
        let next = ALGORITHMS
            .iter()
            .position(|algorithm| algorithm.id == self.current.as_str())
            .map_or(0, |index| (index + 1) % ALGORITHMS.len());
        self.current = AlgorithmId::from(ALGORITHMS[next].id);
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` dismisses the notice, or quits when none is shown.
    escape: bool,
    /// `C` clears the grid.
    clear: bool,
    /// `Enter` or `S` requests a solve.
    solve: bool,
    /// `A` selects the next algorithm.
    cycle_algorithm: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            escape: is_key_pressed(KeyCode::Escape),
            clear: is_key_pressed(KeyCode::C),
            solve: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::S),
            cycle_algorithm: is_key_pressed(KeyCode::A),
        }
    }
}

/// Mouse button edges observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PointerObservations {
    primary_pressed: bool,
    primary_released: bool,
    secondary_pressed: bool,
}

impl PointerObservations {
    fn poll() -> Self {
        Self {
            primary_pressed: is_mouse_button_pressed(MouseButton::Left),
            primary_released: is_mouse_button_released(MouseButton::Left),
            secondary_pressed: is_mouse_button_pressed(MouseButton::Right),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    panel_width: f32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            panel_width: DEFAULT_PANEL_WIDTH,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_frame: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut PixelBuffer) -> FrameFeedback + 'static,
    {
        let Self {
            swap_interval,
            panel_width,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            surface,
            algorithm,
        } = presentation;

        let texture_width =
            u16::try_from(surface.width()).context("surface width exceeds texture limits")?;
        let texture_height =
            u16::try_from(surface.height()).context("surface height exceeds texture limits")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (surface.width() as f32 + panel_width).round() as i32,
            window_height: (surface.height() as f32).max(MIN_WINDOW_HEIGHT).round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        tracing::info!(
            width = surface.width(),
            height = surface.height(),
            "opening editor window"
        );

        macroquad::Window::from_config(config, async move {
            let mut surface = surface;
            let texture = Texture2D::from_rgba8(texture_width, texture_height, surface.as_rgba8());
            texture.set_filter(FilterMode::Nearest);

            let background = to_macroquad_color(clear_color);
            let mut selection = AlgorithmSelection::new(algorithm);
            let mut notices = NoticeBoard::new();
            let mut control_panel_input = ControlPanelInputState::default();
            let mut last_cursor: Option<Vec2> = None;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                let dismiss = control_panel_input.take_dismiss() || keyboard.escape;
                if dismiss && notices.dismiss().is_none() && keyboard.escape {
                    tracing::info!("escape pressed without a notice, closing editor window");
                    break;
                }

                if control_panel_input.take_cycle_algorithm() || keyboard.cycle_algorithm {
                    selection.cycle();
                    tracing::debug!(
                        algorithm = selection.current().as_str(),
                        "algorithm selected"
                    );
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let layout = SurfaceLayout::new(
                    surface.width(),
                    surface.height(),
                    screen_width,
                    screen_height,
                    panel_width,
                );

                let (cursor_x, cursor_y) = mouse_position();
                let pointer = gather_pointer_events(
                    &layout,
                    Vec2::new(cursor_x, cursor_y),
                    PointerObservations::poll(),
                    &mut last_cursor,
                );
                let clear = control_panel_input.take_clear() || keyboard.clear;
                let solve = control_panel_input.take_solve() || keyboard.solve;

                let frame_input = gate_input(
                    notices.blocks_input(),
                    FrameInput {
                        pointer,
                        clear_requested: clear,
                        solve_requested: solve.then(|| selection.current().clone()),
                    },
                );

                let feedback = update_frame(frame_input, &mut surface);
                notices.apply(feedback);

                texture.update(&Image {
                    bytes: surface.as_rgba8().to_vec(),
                    width: texture_width,
                    height: texture_height,
                });
                draw_texture_ex(
                    texture,
                    layout.offset.x,
                    layout.offset.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(MacroquadVec2::new(
                            surface.width() as f32 * layout.scale,
                            surface.height() as f32 * layout.scale,
                        )),
                        ..DrawTextureParams::default()
                    },
                );

                let panel_context = draw_control_panel(
                    &selection,
                    &notices,
                    screen_width,
                    screen_height,
                    panel_width,
                );
                {
                    let mut control_panel_ui = macroquad::ui::root_ui();
                    let ControlPanelUiResult {
                        clear_pressed,
                        solve_pressed,
                        cycle_algorithm_pressed,
                        dismiss_pressed,
                    } = draw_control_panel_ui(&mut control_panel_ui, panel_context);
                    if clear_pressed {
                        control_panel_input.register_clear();
                    }
                    if solve_pressed {
                        control_panel_input.register_solve();
                    }
                    if cycle_algorithm_pressed {
                        control_panel_input.register_cycle_algorithm();
                    }
                    if dismiss_pressed {
                        control_panel_input.register_dismiss();
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Placement of the surface inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SurfaceLayout {
    scale: f32,
    offset: Vec2,
    width: f32,
    height: f32,
}

impl SurfaceLayout {
    /// Fits the surface into the window area left of the control panel, centred
    /// and scaled uniformly.
    fn new(
        surface_width: u32,
        surface_height: u32,
        screen_width: f32,
        screen_height: f32,
        panel_width: f32,
    ) -> Self {
        let width = surface_width as f32;
        let height = surface_height as f32;
        let available_width = (screen_width - panel_width).max(0.0);

        let scale = if width <= f32::EPSILON || height <= f32::EPSILON {
            0.0
        } else {
            (available_width / width).min(screen_height / height).max(0.0)
        };

        let offset = Vec2::new(
            ((available_width - width * scale) / 2.0).max(0.0),
            ((screen_height - height * scale) / 2.0).max(0.0),
        );

        Self {
            scale,
            offset,
            width,
            height,
        }
    }

    /// Converts a window position into surface pixels.
    fn to_surface(&self, screen: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some((screen - self.offset) / self.scale)
    }

    fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width
            && position.y < self.height
    }
}

/// Translates raw mouse observations into pointer events in surface pixels.
///
/// Presses only count when they land on the surface. Movement is reported
/// whenever the cursor changed position since the previous frame, even
/// outside the surface, so an in-progress drag can leave and re-enter the grid.
fn gather_pointer_events(
    layout: &SurfaceLayout,
    cursor: Vec2,
    observations: PointerObservations,
    last_cursor: &mut Option<Vec2>,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let Some(position) = layout.to_surface(cursor) else {
        return events;
    };
    let inside = layout.contains(position);

    if observations.primary_pressed && inside {
        events.push(PointerEvent::Pressed {
            button: PointerButton::Primary,
            position,
        });
    } else if *last_cursor != Some(position) {
        events.push(PointerEvent::Moved { position });
    }
    *last_cursor = Some(position);

    if observations.secondary_pressed && inside {
        events.push(PointerEvent::Pressed {
            button: PointerButton::Secondary,
            position,
        });
    }

    if observations.primary_released {
        events.push(PointerEvent::Released {
            button: PointerButton::Primary,
        });
    }

    events
}

/// Withholds input from the editor while a blocking notice is shown.
///
/// Releases still pass through so a drag that began before the notice ends.
fn gate_input(blocked: bool, input: FrameInput) -> FrameInput {
    if !blocked {
        return input;
    }

    FrameInput {
        pointer: input
            .pointer
            .into_iter()
            .filter(|event| matches!(event, PointerEvent::Released { .. }))
            .collect(),
        ..FrameInput::default()
    }
}

fn draw_control_panel(
    selection: &AlgorithmSelection,
    notices: &NoticeBoard,
    screen_width: f32,
    screen_height: f32,
    panel_width: f32,
) -> ControlPanelUiContext {
    let left = (screen_width - panel_width).max(0.0);
    let background_color = macroquad::color::Color::from_rgba(44, 62, 80, 255);
    macroquad::shapes::draw_rectangle(left, 0.0, panel_width, screen_height, background_color);

    ControlPanelUiContext {
        origin: MacroquadVec2::new(left, 0.0),
        size: MacroquadVec2::new(panel_width, screen_height),
        background: background_color,
        algorithm_label: selection.current().label().to_owned(),
        notice: notices.current().cloned(),
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::from_rgba(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SurfaceLayout {
        SurfaceLayout::new(800, 400, 1040.0, 400.0, DEFAULT_PANEL_WIDTH)
    }

    #[test]
    fn layout_fits_surface_beside_panel() {
        let layout = layout();

        assert_eq!(layout.scale, 1.0);
        assert_eq!(layout.offset, Vec2::ZERO);
    }

    #[test]
    fn layout_scales_uniformly_and_centres() {
        let layout = SurfaceLayout::new(800, 400, 640.0, 400.0, 240.0);

        assert_eq!(layout.scale, 0.5);
        assert_eq!(layout.offset, Vec2::new(0.0, 100.0));
        assert_eq!(
            layout.to_surface(Vec2::new(200.0, 200.0)),
            Some(Vec2::new(400.0, 200.0))
        );
    }

    #[test]
    fn collapsed_window_yields_no_pointer_events() {
        let layout = SurfaceLayout::new(800, 400, 100.0, 400.0, 240.0);
        let mut last = None;

        let events = gather_pointer_events(
            &layout,
            Vec2::new(10.0, 10.0),
            PointerObservations {
                primary_pressed: true,
                ..PointerObservations::default()
            },
            &mut last,
        );

        assert!(events.is_empty());
    }

    #[test]
    fn presses_only_register_inside_the_surface() {
        let layout = layout();
        let mut last = None;
        let press = PointerObservations {
            primary_pressed: true,
            secondary_pressed: true,
            ..PointerObservations::default()
        };

        let outside = gather_pointer_events(&layout, Vec2::new(900.0, 10.0), press, &mut last);
        assert_eq!(
            outside,
            vec![PointerEvent::Moved {
                position: Vec2::new(900.0, 10.0)
            }]
        );

        let inside = gather_pointer_events(&layout, Vec2::new(30.0, 50.0), press, &mut last);
        assert_eq!(
            inside,
            vec![
                PointerEvent::Pressed {
                    button: PointerButton::Primary,
                    position: Vec2::new(30.0, 50.0),
                },
                PointerEvent::Pressed {
                    button: PointerButton::Secondary,
                    position: Vec2::new(30.0, 50.0),
                },
            ]
        );
    }

    #[test]
    fn stationary_cursor_reports_no_movement() {
        let layout = layout();
        let mut last = None;
        let idle = PointerObservations::default();

        let first = gather_pointer_events(&layout, Vec2::new(5.0, 5.0), idle, &mut last);
        let second = gather_pointer_events(&layout, Vec2::new(5.0, 5.0), idle, &mut last);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn release_is_reported_anywhere() {
        let layout = layout();
        let mut last = Some(Vec2::new(900.0, 10.0));

        let events = gather_pointer_events(
            &layout,
            Vec2::new(900.0, 10.0),
            PointerObservations {
                primary_released: true,
                ..PointerObservations::default()
            },
            &mut last,
        );

        assert_eq!(
            events,
            vec![PointerEvent::Released {
                button: PointerButton::Primary
            }]
        );
    }

    #[test]
    fn blocked_frames_only_forward_releases() {
        let input = FrameInput {
            pointer: vec![
                PointerEvent::Pressed {
                    button: PointerButton::Primary,
                    position: Vec2::new(5.0, 5.0),
                },
                PointerEvent::Moved {
                    position: Vec2::new(25.0, 5.0),
                },
                PointerEvent::Released {
                    button: PointerButton::Primary,
                },
            ],
            clear_requested: true,
            solve_requested: Some(AlgorithmId::from("bfs")),
        };

        let gated = gate_input(true, input.clone());

        assert_eq!(
            gated,
            FrameInput {
                pointer: vec![PointerEvent::Released {
                    button: PointerButton::Primary
                }],
                ..FrameInput::default()
            }
        );
        assert_eq!(gate_input(false, input.clone()), input);
    }

    #[test]
    fn algorithm_selection_cycles_through_catalogue() {
        let mut selection = AlgorithmSelection::new(AlgorithmId::from("bfs"));
        let mut seen = vec![selection.current().clone()];
        for _ in 0..ALGORITHMS.len() {
            selection.cycle();
            seen.push(selection.current().clone());
        }

        assert_eq!(seen[1], AlgorithmId::from("dfs"));
        assert_eq!(seen[5], AlgorithmId::from("bidirectional_bfs"));
        assert_eq!(seen[6], AlgorithmId::from("bfs"));
    }

    #[test]
    fn unknown_algorithm_cycles_to_first_entry() {
        let mut selection = AlgorithmSelection::new(AlgorithmId::from("greedy"));

        selection.cycle();

        assert_eq!(selection.current(), &AlgorithmId::from(ALGORITHMS[0].id));
    }
}
