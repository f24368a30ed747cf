//! Top-level entry point for running the scaler as a native window.

use eframe::egui;

use crate::config::ScalerConfig;
use crate::service::CalcWorker;
use crate::session::ScalerSession;

use super::scaler_app::ScalerApp;

/// Launch the scaler dialog in a native window.
///
/// Builds a [`ScalerSession`] from `cfg` (loading the persisted history), opens
/// the window and blocks until it is closed.
pub fn run_scaler(mut cfg: ScalerConfig) -> eframe::Result<()> {
    let session = ScalerSession::from_config(&cfg);
    log::info!(
        "Starting {} with {} ({} history entries)",
        cfg.title,
        session.service().describe(),
        session.controller.history().len()
    );

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1]));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            // Repaint as soon as a background calculation finishes.
            let mut session = session;
            let ctx = cc.egui_ctx.clone();
            let worker = CalcWorker::new(session.service().clone())
                .with_waker(move || ctx.request_repaint());
            session.set_worker(worker);

            Ok(Box::new(ScalerApp::new(session)))
        }),
    )
}

/// Attempt to load the project's `icon.svg` as an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed/rendered.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}
