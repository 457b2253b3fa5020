#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for maze solver adapters.
//!
//! The crate is backend agnostic: grid state is rasterised into any
//! [`Surface`] by [`render`] and [`paint_cell`], while windowed backends
//! implement [`RenderingBackend`] and forward user input as [`FrameInput`].

mod geometry;
mod raster;
mod renderer;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_solver_core::AlgorithmId;
use std::{error::Error, fmt};

pub use geometry::{cell_to_pixel_rect, is_in_bounds, pixel_to_cell, GridGeometry, PixelRect};
pub use raster::{PixelBuffer, Surface};
pub use renderer::{paint_cell, render, Palette};

/// RGBA color with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
    /// Alpha channel intensity.
    pub alpha: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a new color from byte channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Parses an opaque `#rrggbb` color.
    pub fn from_hex(value: &str) -> Result<Self, RenderingError> {
        let invalid = || RenderingError::InvalidColor {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Channels in `[red, green, blue, alpha]` order.
    #[must_use]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Pointer button distinguished by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Button used to place endpoints and paint walls.
    Primary,
    /// Button used to erase cells.
    Secondary,
}

/// Pointer activity expressed in surface pixels relative to its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// A button was pressed at the provided position.
    Pressed {
        /// Button that was pressed.
        button: PointerButton,
        /// Pointer location on the surface.
        position: Vec2,
    },
    /// The pointer moved to the provided position.
    Moved {
        /// Pointer location on the surface.
        position: Vec2,
    },
    /// A button was released.
    Released {
        /// Button that was released.
        button: PointerButton,
    },
}

/// Input snapshot gathered by adapters for a single frame.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer activity in the order it occurred.
    pub pointer: Vec<PointerEvent>,
    /// Whether the user asked to clear the grid on this frame.
    pub clear_requested: bool,
    /// Algorithm to solve with when the user asked for a solve on this frame.
    pub solve_requested: Option<AlgorithmId>,
}

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Neutral outcome such as an unsolvable maze.
    Info,
    /// User action that cannot proceed; blocks grid input until dismissed.
    Warning,
    /// Failure reported by the solve service or the transport.
    Error,
}

/// Message presented to the user by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Notice {
    /// Severity of the notice.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Creates a new notice.
    #[must_use]
    pub fn new<T>(kind: NoticeKind, message: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Notice raised when a solve is requested before both endpoints exist.
    #[must_use]
    pub fn missing_endpoints() -> Self {
        Self::new(NoticeKind::Warning, "Please set start and end points")
    }

    /// Notice raised when the solve service found no path.
    #[must_use]
    pub fn no_path_found() -> Self {
        Self::new(NoticeKind::Info, "No path found")
    }

    /// Reports whether the notice must be dismissed before the grid accepts input.
    #[must_use]
    pub const fn blocks_input(&self) -> bool {
        matches!(self.kind, NoticeKind::Warning)
    }
}

/// Notice display state shared by backends.
///
/// Only the most recently raised notice is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Creates an empty notice board.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Notice currently displayed, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Reports whether grid input must be withheld from the editor.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        self.current.as_ref().is_some_and(Notice::blocks_input)
    }

    /// Removes the displayed notice, returning it.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }

    /// Applies the feedback produced by one editor frame.
    pub fn apply(&mut self, feedback: FrameFeedback) {
        if feedback.dismiss_notices {
            self.current = None;
        }
        if let Some(notice) = feedback.raised.into_iter().last() {
            self.current = Some(notice);
        }
    }
}

/// Outcome of one editor frame reported back to the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameFeedback {
    /// Notices raised during the frame, oldest first.
    pub raised: Vec<Notice>,
    /// Whether previously shown notices are obsolete.
    pub dismiss_notices: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame behind the surface.
    pub clear_color: Color,
    /// Raster surface shown inside the window, already rendered once.
    pub surface: PixelBuffer,
    /// Algorithm initially selected in the control panel.
    pub algorithm: AlgorithmId,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        surface: PixelBuffer,
        algorithm: AlgorithmId,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            surface,
            algorithm,
        }
    }
}

/// Rendering backend capable of presenting the maze editor.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_frame` closure is invoked once per frame with the
    /// input captured by the adapter and the surface to draw into. The backend
    /// presents the surface after the closure returns and applies the returned
    /// feedback to its notice display.
    fn run<F>(self, presentation: Presentation, update_frame: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut PixelBuffer) -> FrameFeedback + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Cell size must be positive to avoid a zero-sized cell.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: u32,
    },
    /// The surface cannot hold a single cell along one of its axes.
    SurfaceTooSmall {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
        /// Requested cell size in pixels.
        cell_size: u32,
    },
    /// A color string was not of the `#rrggbb` form.
    InvalidColor {
        /// Provided value that failed to parse.
        value: String,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
            Self::SurfaceTooSmall {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "surface of {width}x{height} pixels cannot hold a {cell_size} pixel cell"
            ),
            Self::InvalidColor { value } => {
                write!(f, "expected a #rrggbb color (received {value:?})")
            }
        }
    }
}

impl Error for RenderingError {}
