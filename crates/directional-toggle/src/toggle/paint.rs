//! Rendering seam and label color interpolation.

use crate::types::{Color, Rect, RoundedRect};

/// Drawing operations the toggle needs from its host renderer.
pub trait Painter {
    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Draw `text` centered in `bounds`.
    fn draw_text(&mut self, text: &str, bounds: Rect, font_size: f32, color: Color);
}

/// Color of the label at `index` for a thumb at `offset`.
///
/// Piecewise-linear through `center - extent` (inactive), `center` (active)
/// and `center + extent` (inactive), clamped outside that range, where
/// `center = index * item_extent`. Without a measured extent every label is
/// inactive.
///
/// ```
/// use directional_toggle::{Color, label_color};
///
/// let active = Color::BLACK;
/// let inactive = Color::WHITE;
///
/// assert_eq!(label_color(1, 50.0, 50.0, active, inactive), active);
/// assert_eq!(label_color(1, 0.0, 50.0, active, inactive), inactive);
/// assert_eq!(label_color(1, 75.0, 50.0, active, inactive), Color::from_rgb(0.5, 0.5, 0.5));
/// ```
pub fn label_color(
    index: usize,
    offset: f32,
    item_extent: f32,
    active: Color,
    inactive: Color,
) -> Color {
    if item_extent <= 0.0 || !offset.is_finite() {
        return inactive;
    }

    let center = index as f32 * item_extent;
    let distance = ((offset - center) / item_extent).abs();
    if distance >= 1.0 {
        inactive
    } else {
        active.lerp(inactive, distance)
    }
}
