use circle_progress::CircleProgress;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

use crate::app::App;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = cli::get_args();

    let mut ring = CircleProgress::new();
    ring.set_stroke_width(args.stroke_width);
    ring.set_animated(args.animated);
    ring.set_animation_duration(args.duration);

    let colors = args
        .colors
        .iter()
        .filter_map(|c| cli::parse_color(c))
        .collect();
    ring.set_colors(colors);

    let percentages = if args.percentages.is_empty() {
        vec![0.45, 0.25, 0.15]
    } else {
        args.percentages.clone()
    };
    if let Err(err) = ring.try_set_percentages(percentages) {
        tracing::error!(%err, "rejected --percentages, falling back to defaults");
        ring.set_percentages(vec![0.45, 0.25, 0.15]);
    }

    let app = App::new(ring, &args);

    let mut options = eframe::NativeOptions::default();
    options.initial_window_size = Some(egui::vec2(520.0, 400.0));

    eframe::run_native("Circle Progress", options, Box::new(|_cc| Box::new(app)));
}
