use std::path::{Path, PathBuf};

use egui::{TextureHandle, TextureId, TextureOptions};

use crate::command::Command;
use crate::config::SketchConfig;
use crate::controller::Sketchpad;
use crate::error::SketchResult;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};

/// Native host for a [`Sketchpad`]: a tool palette on the left and the canvas
/// in the middle.
pub struct SketchApp {
    pub(crate) pad: Sketchpad,
    pub(crate) input: InputHandler,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    export_path: PathBuf,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchConfig) -> SketchResult<Self> {
        Ok(Self {
            pad: Sketchpad::from_config(&config)?,
            input: InputHandler::new(),
            texture: None,
            uploaded_revision: None,
            export_path: config.export_path,
            status: None,
        })
    }

    pub fn pad(&self) -> &Sketchpad {
        &self.pad
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Last export result, shown under the palette
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Run a palette command; failures are logged and shown, never fatal
    pub fn execute(&mut self, command: Command) {
        let name = command.name();
        let saving = matches!(command, Command::SaveImage(_));
        match self.pad.execute(command) {
            Ok(()) if saving => {
                self.status = Some(format!("Saved {}", self.export_path.display()));
            }
            Ok(()) => {}
            Err(err) => {
                log::warn!("{} failed: {}", name, err);
                self.status = Some(err.to_string());
            }
        }
    }

    /// Texture mirroring the surface, re-uploaded only when the surface changed
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let revision = self.pad.surface().revision();
        let stale = self.uploaded_revision != Some(revision);

        let texture = match self.texture.take() {
            Some(mut texture) => {
                if stale {
                    texture.set(self.pad.surface().to_color_image(), TextureOptions::LINEAR);
                }
                texture
            }
            None => ctx.load_texture(
                "sketch_canvas",
                self.pad.surface().to_color_image(),
                TextureOptions::LINEAR,
            ),
        };

        let id = texture.id();
        self.texture = Some(texture);
        self.uploaded_revision = Some(revision);
        id
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
