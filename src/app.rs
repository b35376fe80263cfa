use eframe::egui;

use crate::render::Figure;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Shows one rendered figure until the window is closed.
pub struct FigureViewerApp {
    texture: egui::TextureHandle,
}

impl FigureViewerApp {
    /// Upload the figure raster as a texture of the new window.
    pub fn new(ctx: &egui::Context, figure: &Figure) -> Self {
        let size = [figure.width() as usize, figure.height() as usize];
        let image = egui::ColorImage::from_rgb(size, figure.image().as_raw());
        let texture = ctx.load_texture("figure", image, egui::TextureOptions::LINEAR);
        Self { texture }
    }
}

impl eframe::App for FigureViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                            &self.texture,
                        ))
                        .shrink_to_fit(),
                    );
                });
            });
    }
}
