use eframe::egui;
use log::info;

use crate::app::FigureViewerApp;
use crate::error::{MapError, Result};
use crate::render::Figure;

/// Open a native window showing `figure` and block until it is closed.
pub fn show_figure(figure: &Figure) -> Result<()> {
    let size = [figure.width() as f32, figure.height() as f32];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([size[0] / 4.0, size[1] / 4.0]),
        ..Default::default()
    };

    let title = if figure.title().is_empty() {
        "Figure".to_string()
    } else {
        figure.title().to_string()
    };

    // the app creator must own what it captures
    let figure = figure.clone();

    info!("showing figure, close the window to continue");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(FigureViewerApp::new(&cc.egui_ctx, &figure)))),
    )
    .map_err(|e| MapError::Viewer(e.to_string()))
}
