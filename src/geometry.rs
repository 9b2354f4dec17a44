use egui::{pos2, Pos2, Rect};

/// Polyline samples for a full sweep of the angular range. Sub-arcs scale
/// this down proportionally so curvature stays uniform.
const ARC_STEPS: usize = 128;

/// Arc geometry shared by the background ring and every segment: a center,
/// a radius, and the configured angular span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Pos2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl ArcGeometry {
    /// Derive geometry from pixel bounds: center is the bounds center,
    /// radius is half the smaller side minus half the stroke width so the
    /// stroke stays inside the bounds.
    pub fn from_bounds(
        bounds: Rect,
        stroke_width: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> Self {
        ArcGeometry {
            center: bounds.center(),
            radius: bounds.width().min(bounds.height()) / 2.0 - stroke_width / 2.0,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Angle at `fraction` of the span. Angles grow downward-clockwise in
    /// screen space, so the clockwise direction adds the sweep and the
    /// counterclockwise direction subtracts it.
    pub fn angle_at(&self, fraction: f32) -> f32 {
        let sweep = self.end_angle - self.start_angle;
        if self.clockwise {
            self.start_angle + fraction * sweep
        } else {
            self.start_angle - fraction * sweep
        }
    }

    pub fn point_at(&self, fraction: f32) -> Pos2 {
        let angle = self.angle_at(fraction);
        pos2(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Sample the arc between fractions `from` and `to` as a polyline.
    pub fn arc_points(&self, from: f32, to: f32) -> Vec<Pos2> {
        let steps = (((to - from).abs() * ARC_STEPS as f32).ceil() as usize).max(1);

        (0..=steps)
            .map(|i| {
                let t = i as f32 / steps as f32;
                self.point_at(from + (to - from) * t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-4;

    fn geometry(clockwise: bool) -> ArcGeometry {
        let bounds = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 80.0));
        ArcGeometry::from_bounds(bounds, 12.0, PI, 3.0 * PI, clockwise)
    }

    #[test]
    fn center_and_radius_come_from_bounds() {
        let g = geometry(true);

        assert_eq!(g.center, pos2(50.0, 40.0));
        // min(100, 80) / 2 - 12 / 2
        assert!((g.radius - 34.0).abs() < TOLERANCE);
    }

    #[test]
    fn fractions_map_onto_the_angular_span() {
        let g = geometry(true);

        assert!((g.angle_at(0.0) - PI).abs() < TOLERANCE);
        assert!((g.angle_at(0.25) - 1.5 * PI).abs() < TOLERANCE);
        assert!((g.angle_at(1.0) - 3.0 * PI).abs() < TOLERANCE);
    }

    #[test]
    fn counterclockwise_sweeps_the_other_way() {
        let g = geometry(false);

        assert!((g.angle_at(0.0) - PI).abs() < TOLERANCE);
        assert!((g.angle_at(0.25) - 0.5 * PI).abs() < TOLERANCE);
    }

    #[test]
    fn arc_start_sits_on_the_circle() {
        let g = geometry(true);
        let start = g.point_at(0.0);

        // start angle π is the leftmost point of the ring
        assert!((start.x - (g.center.x - g.radius)).abs() < TOLERANCE);
        assert!((start.y - g.center.y).abs() < TOLERANCE);
    }

    #[test]
    fn arc_points_span_the_requested_fractions() {
        let g = geometry(true);
        let points = g.arc_points(0.0, 0.5);

        assert_eq!(points.first().copied(), Some(g.point_at(0.0)));
        assert_eq!(points.last().copied(), Some(g.point_at(0.5)));
        assert!(points.len() > 2);
    }
}
