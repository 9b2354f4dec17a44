//! A circular progress indicator for egui: one or more colored arc
//! segments drawn over a background ring, optionally revealed with an
//! ease-in-ease-out animation.

mod color;
mod geometry;
mod ring;
mod segment;

pub use color::{ColorSource, RandomColors};
pub use geometry::ArcGeometry;
pub use ring::CircleProgress;
pub use segment::{
    build_segments, validate_percentages, PercentageError, Segment, MAX_PERCENTAGES,
};
