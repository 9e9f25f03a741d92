#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod document;
pub mod element;
pub mod error;
pub mod input;
pub mod panels;
pub mod redraw;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;

pub use app::SketchApp;
pub use command::Command;
pub use config::SketchConfig;
pub use controller::Sketchpad;
pub use document::Document;
pub use element::{DrawingRecord, ShapeKind, ShapeRecord, StrokeRecord};
pub use error::{SketchError, SketchResult};
pub use input::{InputEvent, InputHandler};
pub use state::{GestureState, ToolKind, ToolState};
pub use stroke::StrokeRecorder;
pub use surface::{BlendMode, RasterSurface};
