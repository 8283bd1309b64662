//! Spring-animated tab-row scrolling.
//!
//! ## Usage
//!
//! Hosts whose scroll views cannot animate on their own feed each
//! [`ScrollRequest`](crate::ScrollRequest) into a [`TabRowScroller`] and
//! apply [`TabRowScroller::offset`] every frame.

use std::time::Duration;

use crate::tab::Tab;

const STIFFNESS: f32 = 700.0;
const DAMPING_RATIO: f32 = 0.9;
const MAX_STEP: f32 = 0.05;
const REST_THRESHOLD: f32 = 0.5;

/// A damped spring driving a scroll offset that never leaves its range.
///
/// Overshoot past either end of the range is cut off at the bound and the
/// spring loses its velocity there.
#[derive(Clone, PartialEq, Copy, Debug)]
pub struct OffsetSpring {
    value: f32,
    velocity: f32,
    target: f32,
    min: f32,
    max: f32,
}

impl OffsetSpring {
    /// Creates a spring at rest at `value` with the range `[value, value]`.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            min: value,
            max: value,
        }
    }

    /// Replaces the allowed range and pulls value and target inside it.
    pub fn set_range(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max.max(min);
        self.target = self.clamp(self.target);
        let value = self.clamp(self.value);
        if value != self.value {
            self.value = value;
            self.velocity = 0.0;
        }
    }

    /// Jumps to `value`, clamped to the range, and stops.
    pub fn jump_to(&mut self, value: f32) {
        let value = self.clamp(value);
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Sets a new rest position, clamped to the range.
    pub fn retarget(&mut self, target: f32) {
        self.target = self.clamp(target);
    }

    /// Advances the spring by `dt` seconds. Steps are capped at 50 ms.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_STEP);
        let damping = 2.0 * DAMPING_RATIO * STIFFNESS.sqrt();
        let acceleration = -STIFFNESS * (self.value - self.target) - damping * self.velocity;
        self.velocity += acceleration * dt;

        let next = self.value + self.velocity * dt;
        self.value = self.clamp(next);
        if self.value != next {
            self.velocity = 0.0;
        }

        if !self.is_moving() {
            self.jump_to(self.target);
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Rest position.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the spring is still travelling toward its target.
    pub fn is_moving(&self) -> bool {
        (self.value - self.target).abs() >= REST_THRESHOLD || self.velocity.abs() >= REST_THRESHOLD
    }

    fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// Horizontal scroll position of the tab strip.
#[derive(Clone, Debug, PartialEq)]
pub struct TabRowScroller {
    offset: OffsetSpring,
    viewport_width: f32,
    content_width: f32,
}

impl TabRowScroller {
    /// Creates a scroller for a strip `viewport_width` wide, scrolled to the
    /// start.
    pub fn new(viewport_width: f32) -> Self {
        Self {
            offset: OffsetSpring::new(0.0),
            viewport_width: viewport_width.max(0.0),
            content_width: 0.0,
        }
    }

    /// Sets the total width of the strip content and re-clamps the offset.
    pub fn set_content_width(&mut self, width: f32) {
        self.content_width = width.max(0.0);
        self.offset.set_range(0.0, self.max_offset());
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scrolls by the smallest amount that makes `tab` fully visible.
    ///
    /// Unmeasured tabs are ignored.
    pub fn scroll_into_view(&mut self, tab: &Tab, animated: bool) {
        let Some(measurement) = tab.measurement() else {
            return;
        };
        let current = self.offset.target();
        let target = if measurement.min_x < current {
            measurement.min_x
        } else if measurement.max_x() > current + self.viewport_width {
            measurement.max_x() - self.viewport_width
        } else {
            current
        };

        if animated {
            self.offset.retarget(target);
        } else {
            self.offset.jump_to(target);
        }
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.offset.step(dt.as_secs_f32());
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    /// Offset the scroller is heading for.
    pub fn target_offset(&self) -> f32 {
        self.offset.target()
    }

    /// Whether a scroll animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.offset.is_moving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::{TabMeasurement, TabRegistry};

    const FRAME: Duration = Duration::from_millis(16);

    fn registry() -> TabRegistry {
        let mut registry = TabRegistry::from_labels(TabRegistry::default_labels());
        let ids: Vec<_> = registry.iter().map(|t| t.id()).collect();
        for (k, id) in ids.into_iter().enumerate() {
            registry.record_measurement(id, TabMeasurement::new(k as f32 * 100.0, 100.0));
        }
        registry
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = OffsetSpring::new(0.0);
        spring.set_range(0.0, 500.0);
        spring.retarget(200.0);
        assert!(spring.is_moving());
        for _ in 0..240 {
            spring.step(1.0 / 60.0);
        }
        assert!(!spring.is_moving());
        assert_eq!(spring.value(), 200.0);
    }

    #[test]
    fn test_spring_never_leaves_range() {
        let mut spring = OffsetSpring::new(0.0);
        spring.set_range(0.0, 100.0);
        spring.retarget(100.0);
        for _ in 0..240 {
            spring.step(1.0 / 60.0);
            assert!(spring.value() <= 100.0, "overshot to {}", spring.value());
        }
        assert_eq!(spring.value(), 100.0);

        spring.retarget(400.0);
        assert_eq!(spring.target(), 100.0);
    }

    #[test]
    fn test_shrinking_range_pulls_value_inside() {
        let mut spring = OffsetSpring::new(0.0);
        spring.set_range(0.0, 300.0);
        spring.jump_to(250.0);
        spring.set_range(0.0, 120.0);
        assert_eq!(spring.value(), 120.0);
        assert_eq!(spring.target(), 120.0);
        assert!(!spring.is_moving());
    }

    #[test]
    fn test_animated_scroll_moves_gradually() {
        let registry = registry();
        let mut scroller = TabRowScroller::new(375.0);
        scroller.set_content_width(900.0);

        scroller.scroll_into_view(registry.by_index(6).unwrap(), true);
        assert_eq!(scroller.target_offset(), 225.0);
        assert_eq!(scroller.offset(), 0.0);

        scroller.tick(FRAME);
        assert!(scroller.offset() > 0.0 && scroller.offset() < 225.0);

        for _ in 0..240 {
            scroller.tick(FRAME);
        }
        assert_eq!(scroller.offset(), 225.0);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_scroll_back_aligns_leading_edge() {
        let registry = registry();
        let mut scroller = TabRowScroller::new(375.0);
        scroller.set_content_width(900.0);
        scroller.scroll_into_view(registry.by_index(9).unwrap(), false);
        assert_eq!(scroller.offset(), 525.0);

        scroller.scroll_into_view(registry.by_index(3).unwrap(), false);
        assert_eq!(scroller.offset(), 200.0);
    }

    #[test]
    fn test_visible_tab_keeps_offset() {
        let registry = registry();
        let mut scroller = TabRowScroller::new(375.0);
        scroller.set_content_width(900.0);
        scroller.scroll_into_view(registry.by_index(2).unwrap(), true);
        assert_eq!(scroller.target_offset(), 0.0);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_offset_is_clamped_to_content() {
        let registry = registry();
        let mut scroller = TabRowScroller::new(375.0);
        scroller.set_content_width(300.0);
        scroller.scroll_into_view(registry.by_index(9).unwrap(), false);
        assert_eq!(scroller.offset(), 0.0);
    }
}
