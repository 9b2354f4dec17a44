//! Circular progress ring widget

use std::f32::consts::PI;

use egui::epaint::{PathShape, Stroke};
use egui::{Color32, Painter, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};

use crate::color::{ColorSource, RandomColors};
use crate::geometry::ArcGeometry;
use crate::segment::{build_segments, validate_percentages, PercentageError, Segment};

/// The `emath` ease-in-ease-out (smoothstep) curve. Provided locally
/// because it is absent from the pinned `emath` 0.18; the definition
/// matches `emath::ease_in_ease_out`.
fn ease_in_ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (3.0 * t * t - 2.0 * t * t * t).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AnimationPhase {
    Idle,
    /// A rebuild requested a reveal; the clock starts on the next paint.
    Armed,
    Running {
        started_at: f64,
    },
}

/// A circular progress indicator drawing one or more colored arc segments
/// over a background ring.
///
/// Retained widget state: the host owns a `CircleProgress`, mutates it
/// through the setters, and shows it with [`CircleProgress::ui`] (or
/// `ui.add(&mut ring)`). Every data mutation rebuilds the segment list
/// wholesale; geometry is re-derived whenever the allocated bounds change.
pub struct CircleProgress {
    percentages: Vec<f32>,
    colors: Vec<Color32>,
    background_color: Color32,
    start_angle: f32,
    end_angle: f32,
    clockwise: bool,
    stroke_width: f32,
    animated: bool,
    animation_duration: f32,
    desired_size: Vec2,
    color_source: Box<dyn ColorSource>,

    segments: Vec<Segment>,
    bounds: Option<Rect>,
    geometry: Option<ArcGeometry>,
    track: Vec<Pos2>,
    segment_paths: Vec<Vec<Pos2>>,
    animation: AnimationPhase,
}

impl Default for CircleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleProgress {
    pub fn new() -> Self {
        CircleProgress {
            percentages: Vec::new(),
            colors: Vec::new(),
            background_color: Color32::from_gray(230),
            start_angle: PI,
            end_angle: 3.0 * PI,
            clockwise: true,
            stroke_width: 12.0,
            animated: false,
            animation_duration: 0.5,
            desired_size: Vec2::splat(256.0),
            color_source: Box::new(RandomColors),
            segments: Vec::new(),
            bounds: None,
            geometry: None,
            track: Vec::new(),
            segment_paths: Vec::new(),
            animation: AnimationPhase::Idle,
        }
    }

    /// Replace the fallback color generator (the default draws random
    /// opaque colors).
    pub fn with_color_source(mut self, source: impl ColorSource + 'static) -> Self {
        self.color_source = Box::new(source);
        self
    }

    // --- Data setters (each one rebuilds the segment list) ---

    /// Single-value mode: replace the whole segment list with zero or one
    /// segment. Passing `None` clears all segments.
    ///
    /// Panics on a contract violation, like [`CircleProgress::set_percentages`].
    pub fn set_percentage(&mut self, value: Option<f32>, color: Option<Color32>) {
        if let Err(err) = self.try_set_percentage(value, color) {
            panic!("invalid percentages: {err}");
        }
    }

    /// Fallible twin of [`CircleProgress::set_percentage`].
    pub fn try_set_percentage(
        &mut self,
        value: Option<f32>,
        color: Option<Color32>,
    ) -> Result<(), PercentageError> {
        let values: Vec<f32> = value.into_iter().collect();
        validate_percentages(&values)?;

        self.percentages = values;
        self.colors = color.into_iter().collect();
        self.rebuild_segments();
        Ok(())
    }

    /// Replace the full percentage list.
    ///
    /// Panics if the list breaks the caller contract (10 or more entries,
    /// a negative entry, or a sum above 1.0). These are programmer errors
    /// fixed at configuration time; nothing is mutated before the check,
    /// so a previously valid state survives untouched. Hosts that prefer
    /// a recoverable signal use [`CircleProgress::try_set_percentages`].
    pub fn set_percentages(&mut self, values: Vec<f32>) {
        if let Err(err) = self.try_set_percentages(values) {
            panic!("invalid percentages: {err}");
        }
    }

    /// Fallible twin of [`CircleProgress::set_percentages`].
    pub fn try_set_percentages(&mut self, values: Vec<f32>) -> Result<(), PercentageError> {
        validate_percentages(&values)?;

        self.percentages = values;
        self.rebuild_segments();
        Ok(())
    }

    /// Set per-segment colors, index-aligned with the percentages. A list
    /// shorter than the percentages is fine; the missing tail falls back
    /// to generated colors on rebuild. No length validation.
    pub fn set_colors(&mut self, values: Vec<Color32>) {
        self.colors = values;
        self.rebuild_segments();
    }

    // --- Configuration (plain assignment, effective on the next rebuild
    //     or bounds pass) ---

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
    }

    pub fn set_start_angle(&mut self, radians: f32) {
        self.start_angle = radians;
    }

    pub fn set_end_angle(&mut self, radians: f32) {
        self.end_angle = radians;
    }

    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    pub fn set_animation_duration(&mut self, seconds: f32) {
        self.animation_duration = seconds;
    }

    pub fn set_desired_size(&mut self, size: Vec2) {
        self.desired_size = size;
    }

    // --- Accessors ---

    pub fn percentages(&self) -> &[f32] {
        &self.percentages
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    // --- Internals ---

    /// Discard and recreate every segment from the current percentages
    /// and colors, then re-derive their paths if bounds are known.
    fn rebuild_segments(&mut self) {
        self.segments = build_segments(
            &self.percentages,
            &self.colors,
            self.color_source.as_mut(),
        );
        self.refresh_paths();

        // A new rebuild supersedes any in-flight reveal.
        self.animation = if self.animated && !self.segments.is_empty() {
            AnimationPhase::Armed
        } else {
            AnimationPhase::Idle
        };

        tracing::debug!(count = self.segments.len(), "rebuilt segments");
    }

    /// Re-derive arc geometry for the background ring and every existing
    /// segment from new pixel bounds. Fractions and colors stay as they
    /// are, so a segment keeps its percentage while matching the new
    /// dimensions. Idempotent for identical bounds.
    pub fn on_bounds_changed(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.geometry = Some(ArcGeometry::from_bounds(
            bounds,
            self.stroke_width,
            self.start_angle,
            self.end_angle,
            self.clockwise,
        ));
        self.refresh_paths();

        tracing::trace!(?bounds, "recomputed arc geometry");
    }

    fn refresh_paths(&mut self) {
        match self.geometry {
            Some(geometry) => {
                self.track = geometry.arc_points(0.0, 1.0);
                self.segment_paths = self
                    .segments
                    .iter()
                    .map(|segment| geometry.arc_points(segment.start, segment.end))
                    .collect();
            }
            None => {
                self.track.clear();
                self.segment_paths.clear();
            }
        }
    }

    /// Reveal fraction of the in-flight animation, or `None` when static.
    /// The clock is read lazily so setter calls never need one.
    fn reveal_fraction(&mut self, ui: &Ui) -> Option<f32> {
        match self.animation {
            AnimationPhase::Idle => None,
            AnimationPhase::Armed => {
                self.animation = AnimationPhase::Running {
                    started_at: ui.input().time,
                };
                Some(0.0)
            }
            AnimationPhase::Running { started_at } => {
                let elapsed = (ui.input().time - started_at) as f32;
                if self.animation_duration <= 0.0 || elapsed >= self.animation_duration {
                    self.animation = AnimationPhase::Idle;
                    None
                } else {
                    Some(ease_in_ease_out(elapsed / self.animation_duration))
                }
            }
        }
    }

    fn paint(&mut self, ui: &Ui) {
        let geometry = match self.geometry {
            Some(geometry) => geometry,
            None => return,
        };

        let reveal = self.reveal_fraction(ui);
        let painter = ui.painter();

        self.stroke_polyline(painter, &self.track, self.background_color);

        match reveal {
            // Static: segments hold their final fractions and cached paths.
            None => {
                for (segment, path) in self.segments.iter().zip(&self.segment_paths) {
                    if segment.end > segment.start {
                        self.stroke_polyline(painter, path, segment.color);
                    }
                }
            }
            // Animating: a cosmetic overlay scales the drawn fractions
            // toward their final values; stored state is untouched.
            Some(k) => {
                for segment in &self.segments {
                    let end = segment.end * k;
                    let start = segment.start * k;
                    if end > start {
                        let path = geometry.arc_points(start, end);
                        self.stroke_polyline(painter, &path, segment.color);
                    }
                }
                ui.ctx().request_repaint();
            }
        }
    }

    /// Stroke an arc polyline with round caps at both ends.
    fn stroke_polyline(&self, painter: &Painter, points: &[Pos2], color: Color32) {
        if points.len() < 2 {
            return;
        }

        painter.add(PathShape::line(
            points.to_vec(),
            Stroke::new(self.stroke_width, color),
        ));

        let cap_radius = self.stroke_width / 2.0;
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            painter.circle_filled(first, cap_radius, color);
            painter.circle_filled(last, cap_radius, color);
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.desired_size, Sense::hover());

        if self.bounds != Some(rect) {
            self.on_bounds_changed(rect);
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui);
        }

        response
    }
}

impl Widget for &mut CircleProgress {
    fn ui(self, ui: &mut Ui) -> Response {
        CircleProgress::ui(self, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    const TOLERANCE: f32 = 1e-6;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn bounds(size: f32) -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(size))
    }

    fn ring() -> CircleProgress {
        CircleProgress::new().with_color_source(|| Color32::WHITE)
    }

    #[test]
    fn defaults_match_the_contract() {
        let ring = CircleProgress::new();

        assert!(close(ring.start_angle, PI));
        assert!(close(ring.end_angle, 3.0 * PI));
        assert!(ring.clockwise);
        assert!(close(ring.stroke_width, 12.0));
        assert_eq!(ring.background_color, Color32::from_gray(230));
        assert!(!ring.animated);
        assert!(close(ring.animation_duration, 0.5));
        assert!(ring.segments().is_empty());
    }

    #[test]
    fn two_segment_scenario() {
        let mut ring = ring();
        ring.set_colors(vec![Color32::BLUE, Color32::GREEN]);
        ring.set_percentages(vec![0.5, 0.2]);

        let segments = ring.segments();
        assert_eq!(segments.len(), 2);
        assert!(close(segments[0].start, 0.0));
        assert!(close(segments[0].end, 0.5));
        assert_eq!(segments[0].color, Color32::BLUE);
        assert!(close(segments[1].start, 0.5));
        assert!(close(segments[1].end, 0.7));
        assert_eq!(segments[1].color, Color32::GREEN);

        // the background track spans the full angle range regardless
        assert_eq!(ring.background_color(), Color32::from_gray(230));
    }

    #[test]
    fn single_value_mode_replaces_the_list() {
        let mut ring = ring();
        ring.set_percentages(vec![0.1, 0.2, 0.3]);

        ring.set_percentage(Some(0.4), Some(Color32::RED));
        assert_eq!(ring.segments().len(), 1);
        assert!(close(ring.segments()[0].end, 0.4));
        assert_eq!(ring.segments()[0].color, Color32::RED);
    }

    #[test]
    fn clearing_drops_all_segments_but_not_the_track() {
        let mut ring = ring();
        ring.set_percentages(vec![0.5]);
        ring.on_bounds_changed(bounds(100.0));

        ring.set_percentage(None, None);
        assert!(ring.segments().is_empty());
        assert!(ring.segment_paths.is_empty());
        assert!(!ring.track.is_empty());
        assert_eq!(ring.background_color(), Color32::from_gray(230));
    }

    #[test]
    fn full_ring_scenario() {
        let mut ring = ring();
        ring.set_percentages(vec![1.0]);

        assert_eq!(ring.segments().len(), 1);
        assert!(close(ring.segments()[0].start, 0.0));
        assert!(close(ring.segments()[0].end, 1.0));
    }

    #[test]
    fn setting_colors_rebuilds_segments() {
        let mut ring = ring();
        ring.set_percentages(vec![0.2, 0.2]);
        assert_eq!(ring.segments()[1].color, Color32::WHITE);

        ring.set_colors(vec![Color32::BLUE, Color32::GREEN]);
        assert_eq!(ring.segments()[0].color, Color32::BLUE);
        assert_eq!(ring.segments()[1].color, Color32::GREEN);
    }

    #[test]
    fn short_color_lists_use_the_fallback_source() {
        let mut ring = CircleProgress::new().with_color_source(|| Color32::from_rgb(9, 9, 9));
        ring.set_colors(vec![Color32::RED]);
        ring.set_percentages(vec![0.3, 0.3]);

        assert_eq!(ring.segments()[0].color, Color32::RED);
        assert_eq!(ring.segments()[1].color, Color32::from_rgb(9, 9, 9));
        assert_eq!(ring.segments()[1].color.a(), 255);
    }

    #[test]
    #[should_panic(expected = "invalid percentages")]
    fn too_many_percentages_is_fatal() {
        ring().set_percentages(vec![0.05; 10]);
    }

    #[test]
    #[should_panic(expected = "invalid percentages")]
    fn negative_percentage_is_fatal() {
        ring().set_percentages(vec![0.2, -0.1]);
    }

    #[test]
    #[should_panic(expected = "invalid percentages")]
    fn sum_above_one_is_fatal() {
        ring().set_percentages(vec![0.8, 0.3]);
    }

    #[test]
    #[should_panic(expected = "invalid percentages")]
    fn single_value_above_one_is_fatal() {
        ring().set_percentage(Some(1.5), None);
    }

    #[test]
    fn rejected_input_leaves_state_untouched() {
        let mut ring = ring();
        ring.set_percentages(vec![0.5, 0.2]);
        let before = ring.segments().to_vec();

        let result = catch_unwind(AssertUnwindSafe(|| {
            ring.set_percentages(vec![0.8, 0.8]);
        }));
        assert!(result.is_err());
        assert_eq!(ring.segments(), before.as_slice());
        assert_eq!(ring.percentages(), &[0.5, 0.2]);
    }

    #[test]
    fn try_setters_report_instead_of_panicking() {
        let mut ring = ring();

        assert!(ring.try_set_percentages(vec![0.5]).is_ok());
        assert_eq!(
            ring.try_set_percentages(vec![-1.0]),
            Err(PercentageError::Negative {
                index: 0,
                value: -1.0
            })
        );
        assert_eq!(ring.percentages(), &[0.5]);
    }

    #[test]
    fn bounds_recomputation_is_idempotent() {
        let mut ring = ring();
        ring.set_percentages(vec![0.3, 0.4]);

        ring.on_bounds_changed(bounds(200.0));
        let track = ring.track.clone();
        let paths = ring.segment_paths.clone();

        ring.on_bounds_changed(bounds(200.0));
        assert_eq!(ring.track, track);
        assert_eq!(ring.segment_paths, paths);
    }

    #[test]
    fn bounds_changes_keep_fractions_and_rescale_geometry() {
        let mut ring = ring();
        ring.set_percentages(vec![0.25]);

        ring.on_bounds_changed(bounds(100.0));
        let small = ring.geometry.expect("geometry");
        assert!(close(small.radius, 44.0));
        assert_eq!(small.center, pos2(50.0, 50.0));

        ring.on_bounds_changed(bounds(300.0));
        let large = ring.geometry.expect("geometry");
        assert!(close(large.radius, 144.0));
        assert!(close(ring.segments()[0].end, 0.25));
        assert_eq!(ring.segment_paths.len(), 1);
    }

    #[test]
    fn animated_rebuild_arms_the_reveal_but_stores_final_state() {
        let mut ring = ring();
        ring.set_animated(true);
        ring.set_percentages(vec![0.6]);

        assert_eq!(ring.animation, AnimationPhase::Armed);
        assert!(close(ring.segments()[0].end, 0.6));

        // a follow-up rebuild supersedes the armed reveal
        ring.set_animated(false);
        ring.set_percentages(vec![0.3]);
        assert_eq!(ring.animation, AnimationPhase::Idle);
    }
}
