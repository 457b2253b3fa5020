//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use maze_solver_rendering::{Notice, NoticeKind};

/// Outcome of rendering the control panel UI for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Whether the clear button was pressed during this frame.
    pub(crate) clear_pressed: bool,
    /// Whether the solve button was pressed during this frame.
    pub(crate) solve_pressed: bool,
    /// Whether the algorithm button was pressed during this frame.
    pub(crate) cycle_algorithm_pressed: bool,
    /// Whether the notice dismiss button was pressed during this frame.
    pub(crate) dismiss_pressed: bool,
}

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin so the UI matches the
    /// adapter's solid rectangle.
    pub(crate) background: Color,
    /// Label of the algorithm the next solve will use.
    pub(crate) algorithm_label: String,
    /// Notice currently shown to the user.
    pub(crate) notice: Option<Notice>,
}

/// Renders the control panel's interactive elements for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(52, 152, 219, 255))
        .color_hovered(Color::from_rgba(41, 128, 185, 255))
        .color_clicked(Color::from_rgba(31, 97, 141, 255))
        .color_selected(Color::from_rgba(52, 152, 219, 255))
        .color_selected_hovered(Color::from_rgba(41, 128, 185, 255))
        .color_inactive(Color::from_rgba(31, 97, 141, 200))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = ControlPanelUiResult::default();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        ui.label(None, "Left click: start, end, then walls");
        ui.label(None, "Right click: erase");

        let algorithm = format!("Algorithm: {}", context.algorithm_label);
        ui.label(None, algorithm.as_str());
        result.cycle_algorithm_pressed = ui.button(None, "Next algorithm (A)");
        result.solve_pressed = ui.button(None, "Solve (Enter)");
        result.clear_pressed = ui.button(None, "Clear (C)");

        if let Some(notice) = &context.notice {
            ui.separator();
            let heading = match notice.kind {
                NoticeKind::Info => "Info",
                NoticeKind::Warning => "Warning",
                NoticeKind::Error => "Error",
            };
            ui.label(None, heading);
            ui.label(None, notice.message.as_str());
            result.dismiss_pressed = ui.button(None, "Dismiss (Esc)");
        }
    });

    ui.pop_skin();

    result
}
