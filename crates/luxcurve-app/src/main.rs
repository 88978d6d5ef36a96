//! Main application entry point.

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Luxcurve");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Luxcurve"),
        ..Default::default()
    };
    eframe::run_native(
        "luxcurve",
        options,
        Box::new(|cc| Ok(Box::new(luxcurve_app::App::new(cc)))),
    )
}
