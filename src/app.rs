use crate::canvas::DrawingCanvas;
use crate::config::SurfaceConfig;
use crate::error::SurfaceResult;
use crate::metrics::Unit;

/// Crayon palette offered next to the canvas
const PALETTE: &[&str] = &[
    "#FF000000", "#FFFFFFFF", "#FFE53935", "#FFFB8C00", "#FFFDD835", "#FF43A047", "#FF1E88E5",
    "#FF8E24AA", "#FF6D4C41",
];

/// Brush choices remembered between runs. Strokes are never persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct BrushSettings {
    pub color: String,
    /// Brush size in device-independent pixels
    pub size_dp: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: PALETTE[0].to_owned(),
            size_dp: 20.0,
        }
    }
}

pub struct DoodleApp {
    canvas: DrawingCanvas,
    settings: BrushSettings,
    // Text typed into the custom color field
    custom_color: String,
    color_error: Option<String>,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> SurfaceResult<Self> {
        let mut settings: BrushSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut canvas = DrawingCanvas::new(&cc.egui_ctx, &SurfaceConfig::default())?;
        restore_brush(&mut canvas, &mut settings)?;

        Ok(Self {
            canvas,
            custom_color: settings.color.clone(),
            settings,
            color_error: None,
        })
    }

    fn apply_color(&mut self, spec: &str) {
        match self.canvas.surface_mut().set_brush_color(spec) {
            Ok(()) => {
                self.settings.color = spec.to_owned();
                self.color_error = None;
            }
            Err(err) => {
                log::info!("Rejected brush color: {err}");
                self.color_error = Some(err.to_string());
            }
        }
    }

    fn brush_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Brush");
        ui.separator();

        ui.horizontal_wrapped(|ui| {
            for spec in PALETTE {
                let color = crate::color::parse_color(spec).unwrap_or(egui::Color32::BLACK);
                let swatch = egui::Button::new("   ")
                    .fill(color)
                    .selected(self.settings.color == *spec);
                if ui.add(swatch).clicked() {
                    self.apply_color(spec);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color:");
            ui.text_edit_singleline(&mut self.custom_color);
            if ui.button("Apply").clicked() {
                let spec = self.custom_color.trim().to_owned();
                self.apply_color(&spec);
            }
        });
        if let Some(err) = &self.color_error {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }

        ui.horizontal(|ui| {
            ui.label("Size:");
            if ui
                .add(egui::Slider::new(&mut self.settings.size_dp, 1.0..=50.0).suffix(" dp"))
                .changed()
            {
                self.canvas.set_brush_size(self.settings.size_dp, Unit::Dip);
            }
        });

        ui.separator();
        let can_undo = self.canvas.surface().can_undo();
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            self.canvas.surface_mut().undo();
        }
    }
}

/// Apply stored settings to the canvas brush. A color that no longer parses is replaced by the default.
fn restore_brush(canvas: &mut DrawingCanvas, settings: &mut BrushSettings) -> SurfaceResult<()> {
    if let Err(err) = canvas.surface_mut().set_brush_color(&settings.color) {
        log::warn!("Ignoring stored brush color: {err}");
        settings.color = BrushSettings::default().color;
        canvas.surface_mut().set_brush_color(&settings.color)?;
    }
    canvas.set_brush_size(settings.size_dp, Unit::Dip);
    Ok(())
}

impl eframe::App for DoodleApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("brush_panel")
            .resizable(false)
            .show(ctx, |ui| self.brush_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                self.canvas.show(ui);
            });
    }
}
