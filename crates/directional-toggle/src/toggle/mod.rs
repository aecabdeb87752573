//! Directional toggle widget implementation.
//!
//! This module provides [`DirectionalToggle`], a row or column of discrete
//! options with a sliding thumb that can be tapped or dragged between them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use directional_toggle::{DirectionalToggle, EventLoop, Size, ToggleOption};
//!
//! let main_loop = EventLoop::new();
//! let mut toggle = DirectionalToggle::new(vec![
//!     ToggleOption::text("A"),
//!     ToggleOption::text("B"),
//!     ToggleOption::text("C"),
//! ])
//! .with_value("B");
//!
//! toggle.on_change(|value| println!("selected {value}"));
//!
//! toggle.resize(Size::new(150.0, 36.0));
//! assert_eq!(toggle.item_extent(), 50.0);
//! assert_eq!(toggle.offset(), 50.0);
//!
//! toggle.press(2);
//! toggle.tick(Duration::from_millis(100));
//! assert_eq!(toggle.offset(), 100.0);
//!
//! // The change callback runs on the next main-cycle iteration.
//! assert_eq!(main_loop.process_pending(), 1);
//! ```

mod config;
mod option;
mod paint;

use std::time::Duration;

use directional_toggle_core::logging::targets;
use directional_toggle_core::{ConnectionId, ConnectionType, PerfSpan, Signal};

use crate::animation::{AnimatedValue, AnimationSpec};
use crate::gesture::{GestureState, PanRecognizer, PointerEvent, RecognizedGesture, TouchPhase};
use crate::types::{Color, Orientation, Point, Rect, RoundedRect, Size};

pub use config::{
    AnimationConfig, ConfigError, FALLBACK_DAMPING, FALLBACK_DURATION_MS, FALLBACK_STIFFNESS,
    ToggleConfig, ToggleStyle,
};
pub use option::{OptionValue, ToggleOption};
pub use paint::{Painter, label_color};

/// Gesture state of the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    /// A drag is in progress, anchored at the index the thumb started from.
    Dragging { anchor_index: usize },
}

/// An animated, draggable toggle between two or more options.
///
/// The toggle mirrors a caller-owned selection. The thumb position is a
/// continuous offset along the active axis; at rest it equals
/// `active_index * item_extent`. Taps animate with the time-based profile,
/// released drags settle with the spring profile, and both report the
/// committed option through [`value_changed`](Self::value_changed).
///
/// # Signals
///
/// - `value_changed(OptionValue)`: Emitted when the user commits an option.
///   Delivery is always queued onto the main cycle of the connecting thread.
pub struct DirectionalToggle {
    options: Vec<ToggleOption>,
    orientation: Orientation,
    style: ToggleStyle,
    animation: AnimationConfig,

    /// Last measured container size.
    size: Size,
    /// Extent of one option along the active axis.
    item_extent: f32,

    /// Selected value as last set by the caller or committed by the user.
    value: Option<OptionValue>,
    /// Index of `value` in `options`.
    active_index: Option<usize>,

    /// Thumb offset along the active axis.
    offset: AnimatedValue,

    drag: DragState,
    /// External value received mid-drag, applied once the drag is over.
    deferred_value: Option<Option<OptionValue>>,
    recognizer: PanRecognizer,

    /// Signal emitted with the committed option's value.
    pub value_changed: Signal<OptionValue>,
}

impl DirectionalToggle {
    /// Create a horizontal toggle with no selection.
    pub fn new(options: Vec<ToggleOption>) -> Self {
        Self {
            options,
            orientation: Orientation::Horizontal,
            style: ToggleStyle::default(),
            animation: AnimationConfig::default(),
            size: Size::ZERO,
            item_extent: 0.0,
            value: None,
            active_index: None,
            offset: AnimatedValue::new(0.0),
            drag: DragState::Idle,
            deferred_value: None,
            recognizer: PanRecognizer::new(Orientation::Horizontal),
            value_changed: Signal::new(),
        }
    }

    /// Create a toggle from a loaded configuration.
    pub fn from_config(config: ToggleConfig) -> Self {
        let ToggleConfig {
            orientation,
            options,
            value,
            style,
            animation,
        } = config;

        let mut toggle = Self::new(options)
            .with_orientation(orientation)
            .with_style(style)
            .with_animation(animation);
        toggle.apply_value(value);
        toggle
    }

    // =========================================================================
    // Options and selection
    // =========================================================================

    /// Get the options in display order.
    pub fn options(&self) -> &[ToggleOption] {
        &self.options
    }

    /// Replace the options.
    ///
    /// The current value is looked up again and the thumb is placed without
    /// animation, as for a new measurement.
    pub fn set_options(&mut self, options: Vec<ToggleOption>) {
        self.options = options;
        self.active_index = self.resolve(self.value.as_ref());
        if let DragState::Dragging { anchor_index } = self.drag
            && anchor_index >= self.options.len()
        {
            self.drag = DragState::Dragging {
                anchor_index: self.options.len().saturating_sub(1),
            };
        }
        tracing::debug!(
            target: targets::TOGGLE,
            count = self.options.len(),
            active_index = ?self.active_index,
            "options replaced"
        );
        self.relayout();
    }

    /// Get the selected value.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value.as_ref()
    }

    /// Set the selected value from outside.
    ///
    /// A value matching an option animates the thumb there. A value resolving
    /// to the already active option does nothing. A value matching no option
    /// clears the selection and leaves the thumb where it is. During a drag the
    /// change is held back until the drag is over.
    pub fn set_value(&mut self, value: impl Into<OptionValue>) {
        self.apply_value(Some(value.into()));
    }

    /// Clear the selection.
    pub fn clear_value(&mut self) {
        self.apply_value(None);
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.set_value(value);
        self
    }

    /// Index of the selected option.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the axis options are laid out along.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.recognizer.set_axis(orientation);
            self.drag = DragState::Idle;
            self.relayout();
            self.apply_deferred();
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.set_orientation(orientation);
        self
    }

    pub fn style(&self) -> &ToggleStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ToggleStyle) {
        self.style = style;
    }

    pub fn with_style(mut self, style: ToggleStyle) -> Self {
        self.style = style;
        self
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn set_animation(&mut self, animation: AnimationConfig) {
        self.animation = animation;
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Preferred size of the toggle.
    ///
    /// Horizontal toggles take their width from the parent, so the hinted
    /// width is zero. Vertical toggles have a fixed width and one `height` per
    /// option.
    pub fn size_hint(&self) -> Size {
        match self.orientation {
            Orientation::Horizontal => Size::new(0.0, self.style.height),
            Orientation::Vertical => Size::new(
                self.style.vertical_width,
                self.style.height * self.options.len() as f32,
            ),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Apply a new measured container size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.relayout();
    }

    /// Last measured container size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Extent of one option along the active axis; zero until measured.
    #[inline]
    pub fn item_extent(&self) -> f32 {
        self.item_extent
    }

    /// Largest offset the thumb can reach.
    pub fn max_offset(&self) -> f32 {
        self.options.len().saturating_sub(1) as f32 * self.item_extent
    }

    fn relayout(&mut self) {
        let count = self.options.len();
        let extent = self.orientation.extent(self.size);
        self.item_extent = if count > 0 && extent.is_finite() && extent > 0.0 {
            extent / count as f32
        } else {
            0.0
        };

        tracing::debug!(
            target: targets::TOGGLE,
            extent,
            count,
            item_extent = self.item_extent,
            "layout resolved"
        );

        match self.active_index {
            Some(index) if !self.is_dragging() => {
                self.offset.set(index as f32 * self.item_extent);
            }
            _ => {
                let max = self.max_offset();
                self.offset.set(self.offset.value().clamp(0.0, max));
            }
        }
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Current thumb offset along the active axis, kept on the track.
    ///
    /// A settling spring may briefly overshoot an end of the track; the raw
    /// value is available from [`offset_value`](Self::offset_value).
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset.value().clamp(0.0, self.max_offset())
    }

    /// The animated offset, for observing its change signal.
    pub fn offset_value(&self) -> &AnimatedValue {
        &self.offset
    }

    /// Whether the offset is currently animating.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Advance animations by `dt`. Returns `true` while still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.offset.tick(dt)
    }

    fn resolve(&self, value: Option<&OptionValue>) -> Option<usize> {
        let value = value?;
        self.options.iter().position(|option| &option.value == value)
    }

    fn apply_value(&mut self, value: Option<OptionValue>) {
        if self.is_dragging() {
            tracing::debug!(target: targets::TOGGLE, ?value, "value change deferred until drag ends");
            self.deferred_value = Some(value);
            return;
        }

        let index = self.resolve(value.as_ref());
        self.value = value;

        if index == self.active_index {
            return;
        }
        self.active_index = index;

        match index {
            Some(index) if self.item_extent > 0.0 => {
                let target = index as f32 * self.item_extent;
                tracing::debug!(target: targets::TOGGLE, index, target, "syncing to external value");
                self.offset
                    .animate_to(target, AnimationSpec::Timing(self.animation.timing()));
            }
            Some(index) => {
                tracing::trace!(target: targets::TOGGLE, index, "value recorded before layout");
            }
            None => {
                tracing::debug!(target: targets::TOGGLE, value = ?self.value, "value matches no option");
            }
        }
    }

    // =========================================================================
    // Taps and drags
    // =========================================================================

    /// Commit the option at `index` as if it were tapped.
    ///
    /// Ignored while dragging and for indices out of range. Before the first
    /// measurement the tap is consumed without effect.
    pub fn press(&mut self, index: usize) {
        if self.is_dragging() {
            tracing::trace!(target: targets::TOGGLE, index, "tap ignored while dragging");
            return;
        }
        if index >= self.options.len() {
            tracing::trace!(target: targets::TOGGLE, index, "tap outside options ignored");
            return;
        }
        if self.item_extent <= 0.0 {
            tracing::debug!(target: targets::TOGGLE, index, "tap before layout ignored");
            return;
        }

        tracing::debug!(target: targets::TOGGLE, index, "tap commit");
        self.commit(index);
        self.offset.animate_to(
            index as f32 * self.item_extent,
            AnimationSpec::Timing(self.animation.timing()),
        );
        self.emit(index);
    }

    /// Whether a drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Start a drag.
    ///
    /// The drag is anchored at the last committed option, or at the option
    /// nearest the thumb when nothing is selected, and the thumb is placed on
    /// the anchor. Returns `false` if a drag is already in progress.
    pub fn begin_drag(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }

        let anchor_index = self
            .active_index
            .unwrap_or_else(|| self.nearest_index(self.offset()));
        self.drag = DragState::Dragging { anchor_index };
        if self.item_extent > 0.0 {
            self.offset.set(anchor_index as f32 * self.item_extent);
        } else {
            self.offset.stop();
        }
        tracing::debug!(target: targets::TOGGLE, anchor_index, "drag started");
        true
    }

    /// Move the thumb by `translation` along the active axis, measured from
    /// where the drag started.
    ///
    /// The offset is clamped to the track and not snapped.
    pub fn update_drag(&mut self, translation: f32) {
        let DragState::Dragging { anchor_index } = self.drag else {
            return;
        };
        if self.item_extent <= 0.0 || !translation.is_finite() {
            return;
        }

        let anchor = anchor_index as f32 * self.item_extent;
        let offset = (anchor + translation).clamp(0.0, self.max_offset());
        tracing::trace!(target: targets::TOGGLE, translation, offset, "drag update");
        self.offset.set(offset);
    }

    /// Release the drag, committing the option nearest the thumb.
    ///
    /// A value change held back during the drag is dropped in favour of the
    /// commit.
    pub fn end_drag(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.drag = DragState::Idle;

        if self.options.is_empty() || self.item_extent <= 0.0 {
            tracing::debug!(target: targets::TOGGLE, "drag released before layout");
            self.apply_deferred();
            return;
        }

        if let Some(value) = self.deferred_value.take() {
            tracing::debug!(target: targets::TOGGLE, ?value, "deferred value superseded by drag commit");
        }

        let index = self.nearest_index(self.offset());
        tracing::debug!(target: targets::TOGGLE, index, offset = self.offset(), "drag commit");
        self.commit(index);
        self.offset.animate_to(
            index as f32 * self.item_extent,
            AnimationSpec::Spring(self.animation.spring()),
        );
        self.emit(index);
    }

    /// Abandon the drag without committing.
    ///
    /// The thumb springs back to where the drag started, then any value
    /// change held back during the drag is applied.
    pub fn cancel_drag(&mut self) {
        let DragState::Dragging { anchor_index } = self.drag else {
            return;
        };
        self.drag = DragState::Idle;
        tracing::debug!(target: targets::TOGGLE, anchor_index, "drag cancelled");

        if self.item_extent > 0.0 {
            self.offset.animate_to(
                anchor_index as f32 * self.item_extent,
                AnimationSpec::Spring(self.animation.spring()),
            );
        }
        self.apply_deferred();
    }

    fn apply_deferred(&mut self) {
        if let Some(value) = self.deferred_value.take() {
            self.apply_value(value);
        }
    }

    fn nearest_index(&self, offset: f32) -> usize {
        let last = self.options.len().saturating_sub(1);
        if self.item_extent <= 0.0 {
            return 0;
        }
        (offset / self.item_extent).round().clamp(0.0, last as f32) as usize
    }

    fn commit(&mut self, index: usize) {
        self.active_index = Some(index);
        self.value = self.options.get(index).map(|option| option.value.clone());
    }

    /// Index of the option under `point`, in local coordinates.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if self.options.is_empty() || self.item_extent <= 0.0 {
            return None;
        }
        let last = (self.options.len() - 1) as f32;
        let position = self.orientation.main(point) / self.item_extent;
        Some(position.floor().clamp(0.0, last) as usize)
    }

    /// Feed a pointer event in local coordinates.
    ///
    /// Returns `true` while the toggle claims the pointer. Movement that leaves
    /// the slop radius across the active axis is handed back.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match self.recognizer.process(event) {
            Some(RecognizedGesture::Tap { position }) => {
                if let Some(index) = self.hit_test(position) {
                    self.press(index);
                }
                true
            }
            Some(RecognizedGesture::Pan {
                state, translation, ..
            }) => {
                match state {
                    GestureState::Started => {
                        self.begin_drag();
                        self.update_drag(translation);
                    }
                    GestureState::Updated => self.update_drag(translation),
                    GestureState::Ended => {
                        self.update_drag(translation);
                        self.end_drag();
                    }
                    GestureState::Cancelled => self.cancel_drag(),
                }
                // A new pointer interrupting a pan is tracked afresh.
                state != GestureState::Cancelled || event.phase == TouchPhase::Started
            }
            Some(RecognizedGesture::Failed) => false,
            None => self.recognizer.is_tracking(),
        }
    }

    // =========================================================================
    // Change notification
    // =========================================================================

    /// Report the option at `index` to listeners.
    ///
    /// The index is clamped into range; nothing is reported for an empty
    /// option list. Delivery is queued onto the main cycle.
    pub fn emit(&self, index: usize) {
        let Some(last) = self.options.len().checked_sub(1) else {
            tracing::trace!(target: targets::TOGGLE, index, "emit with no options suppressed");
            return;
        };
        let option = &self.options[index.min(last)];
        tracing::debug!(target: targets::TOGGLE, value = %option.value, "value changed");
        self.value_changed.emit_queued(option.value.clone());
    }

    /// Connect a change callback, delivered on this thread's main cycle.
    pub fn on_change<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&OptionValue) + Send + Sync + 'static,
    {
        self.value_changed
            .connect_with_type(callback, ConnectionType::Queued)
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Container bounds in local coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    /// Bounds of the option at `index`.
    pub fn item_rect(&self, index: usize) -> Rect {
        let start = index as f32 * self.item_extent;
        match self.orientation {
            Orientation::Horizontal => Rect::new(start, 0.0, self.item_extent, self.size.height),
            Orientation::Vertical => Rect::new(0.0, start, self.size.width, self.item_extent),
        }
    }

    /// Thumb bounds at the current offset.
    pub fn thumb_rect(&self) -> RoundedRect {
        let offset = self.offset();
        let item = match self.orientation {
            Orientation::Horizontal => {
                Rect::new(offset, 0.0, self.item_extent, self.size.height)
            }
            Orientation::Vertical => Rect::new(0.0, offset, self.size.width, self.item_extent),
        };
        RoundedRect::new(item.deflate(self.style.thumb_inset), self.style.thumb_radius)
    }

    /// Label color of the option at `index` for the current offset.
    pub fn label_color(&self, index: usize) -> Color {
        label_color(
            index,
            self.offset(),
            self.item_extent,
            self.style.active_text,
            self.style.inactive_text,
        )
    }

    /// Paint the container, then the thumb, then the labels.
    pub fn paint(&self, painter: &mut dyn Painter) {
        let _span = PerfSpan::new("toggle.paint");

        painter.fill_rounded_rect(
            RoundedRect::new(self.rect(), self.style.container_radius),
            self.style.background,
        );

        if self.item_extent <= 0.0 {
            return;
        }

        painter.fill_rounded_rect(self.thumb_rect(), self.style.thumb);

        for (index, option) in self.options.iter().enumerate() {
            painter.draw_text(
                &option.label,
                self.item_rect(index),
                self.style.font_size,
                self.label_color(index),
            );
        }
    }
}

impl std::fmt::Debug for DirectionalToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionalToggle")
            .field("options", &self.options.len())
            .field("orientation", &self.orientation)
            .field("active_index", &self.active_index)
            .field("item_extent", &self.item_extent)
            .field("offset", &self.offset.value())
            .field("drag", &self.drag)
            .finish()
    }
}

// Ensure DirectionalToggle is Send + Sync for use across threads.
static_assertions::assert_impl_all!(DirectionalToggle: Send, Sync);
