use egui::Color32;
use thiserror::Error;

use crate::color::ColorSource;

/// Upper bound (exclusive) on the number of percentage values.
pub const MAX_PERCENTAGES: usize = 10;

/// One colored arc covering `start..end` of the ring's angular span.
///
/// Fractions live in `[0, 1]`; `end - start` is the percentage the segment
/// represents. Segments built together are contiguous: each one starts
/// where the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f32,
    pub end: f32,
    pub color: Color32,
}

impl Segment {
    /// The share of the ring this segment covers.
    pub fn percentage(&self) -> f32 {
        self.end - self.start
    }
}

/// A rejected percentage list. These are caller-contract violations, fixed
/// at configuration time, not recoverable runtime conditions.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PercentageError {
    #[error("too many percentage values: {0} (must be fewer than 10)")]
    TooMany(usize),

    #[error("negative percentage value {value} at index {index}")]
    Negative { index: usize, value: f32 },

    #[error("percentage values sum to {0}, which exceeds 1.0")]
    SumExceedsOne(f32),
}

/// Check the percentage-list invariants: fewer than [`MAX_PERCENTAGES`]
/// entries, every entry non-negative, total at most 1.0.
pub fn validate_percentages(values: &[f32]) -> Result<(), PercentageError> {
    if values.len() >= MAX_PERCENTAGES {
        return Err(PercentageError::TooMany(values.len()));
    }

    for (index, &value) in values.iter().enumerate() {
        if value < 0.0 {
            return Err(PercentageError::Negative { index, value });
        }
    }

    let sum: f32 = values.iter().sum();
    if sum > 1.0 {
        return Err(PercentageError::SumExceedsOne(sum));
    }

    Ok(())
}

/// Build contiguous segments from an already-validated percentage list.
///
/// Walks the values in order keeping a running sum, so segment `i` starts
/// at the cumulative total of everything before it. Indices past the end
/// of `colors` draw a fresh color from `fallback`.
pub fn build_segments(
    percentages: &[f32],
    colors: &[Color32],
    fallback: &mut dyn ColorSource,
) -> Vec<Segment> {
    let mut summary = 0.0_f32;

    percentages
        .iter()
        .enumerate()
        .map(|(index, &p)| {
            let start = summary;
            summary += p;

            Segment {
                start,
                end: summary,
                color: colors
                    .get(index)
                    .copied()
                    .unwrap_or_else(|| fallback.next_color()),
            }
        })
        .collect()
}
