use egui::Color32;
use rand::Rng;

/// Source of fallback colors for segments that have no configured color.
///
/// Injectable so hosts and tests can substitute a deterministic generator
/// for the default random one.
pub trait ColorSource {
    fn next_color(&mut self) -> Color32;
}

impl<F: FnMut() -> Color32> ColorSource for F {
    fn next_color(&mut self) -> Color32 {
        self()
    }
}

/// Default color source: a fresh opaque color per draw.
pub struct RandomColors;

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color32 {
        let mut rng = rand::thread_rng();
        Color32::from_rgb(rng.gen(), rng.gen(), rng.gen())
    }
}
