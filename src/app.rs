use circle_progress::CircleProgress;
use eframe::egui;
use egui::{CentralPanel, Color32, SidePanel, Slider, TopBottomPanel};

use crate::cli::Args;

const BLUE: Color32 = Color32::from_rgb(66, 133, 244);
const GREEN: Color32 = Color32::from_rgb(52, 168, 83);

pub struct App {
    ring: CircleProgress,
    single_value: f32,
    animated: bool,
    stroke_width: f32,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Circle Progress");
        });

        SidePanel::left("controls").show(ctx, |ui| {
            if ui
                .add(Slider::new(&mut self.single_value, 0.0..=1.0).text("percentage"))
                .changed()
            {
                self.ring.set_percentage(Some(self.single_value), Some(BLUE));
            }

            if ui.button("Thirds preset").clicked() {
                // two configured colors, the third is left to the fallback
                self.ring.set_colors(vec![BLUE, GREEN]);
                self.ring.set_percentages(vec![0.45, 0.25, 0.15]);
            }

            if ui.button("Clear").clicked() {
                self.ring.set_percentage(None, None);
            }

            if ui.checkbox(&mut self.animated, "Animated").changed() {
                self.ring.set_animated(self.animated);
            }

            if ui
                .add(Slider::new(&mut self.stroke_width, 1.0..=40.0).text("stroke width"))
                .changed()
            {
                self.ring.set_stroke_width(self.stroke_width);
            }
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.add(&mut self.ring);
            });
        });
    }
}

impl App {
    pub fn new(ring: CircleProgress, args: &Args) -> Self {
        App {
            ring,
            single_value: 0.0,
            animated: args.animated,
            stroke_width: args.stroke_width,
        }
    }
}
