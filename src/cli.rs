use clap::Parser;
use egui::Color32;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Comma-separated percentage values in [0, 1], e.g. 0.45,0.25,0.15
    #[clap(short, long, use_value_delimiter = true)]
    pub percentages: Vec<f32>,

    /// Comma-separated segment colors as #rrggbb hex
    #[clap(short, long, use_value_delimiter = true)]
    pub colors: Vec<String>,

    #[clap(short, long, default_value = "12.0")]
    pub stroke_width: f32,

    /// Animate the reveal on every rebuild
    #[clap(short, long)]
    pub animated: bool,

    /// Animation duration in seconds
    #[clap(short, long, default_value = "0.5")]
    pub duration: f32,
}

pub fn get_args() -> Args {
    Args::parse()
}

/// Parse a `#rrggbb` (or bare `rrggbb`) hex color.
pub fn parse_color(value: &str) -> Option<Color32> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let n = u32::from_str_radix(hex, 16).ok()?;
    Some(Color32::from_rgb((n >> 16) as u8, (n >> 8) as u8, n as u8))
}
