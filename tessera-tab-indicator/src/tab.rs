//! Tab descriptors and the ordered registry that owns them.
//!
//! Tabs are created once from a static ordered list and live for the whole
//! session. Their label geometry is filled in by the first layout pass of the
//! tab strip and never re-measured afterwards.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Opaque, unique identifier of a tab.
    pub struct TabId;
}

/// Horizontal geometry of a tab label as reported by the layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabMeasurement {
    /// Left edge of the label in tab-strip content coordinates.
    pub min_x: f32,
    /// Width of the label.
    pub width: f32,
}

impl TabMeasurement {
    /// Creates a measurement from a label's left edge and width.
    pub fn new(min_x: f32, width: f32) -> Self {
        Self { min_x, width }
    }

    /// Right edge of the label.
    pub fn max_x(&self) -> f32 {
        self.min_x + self.width
    }

    fn is_usable(&self) -> bool {
        self.min_x.is_finite() && self.width.is_finite() && self.width > 0.0
    }
}

/// A single tab in the strip.
#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    id: TabId,
    label: String,
    index: usize,
    measurement: Option<TabMeasurement>,
}

impl Tab {
    /// Identifier of this tab.
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Label text shown in the tab strip.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 1-based position of the tab in the strip.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The recorded label geometry, if the tab has been measured.
    pub fn measurement(&self) -> Option<TabMeasurement> {
        self.measurement
    }

    /// Whether the label geometry has been recorded.
    pub fn is_measured(&self) -> bool {
        self.measurement.is_some()
    }

    /// Measured label width, `0.0` while unmeasured.
    pub fn width(&self) -> f32 {
        self.measurement.map_or(0.0, |m| m.width)
    }

    /// Measured label left edge, `0.0` while unmeasured.
    pub fn min_x(&self) -> f32 {
        self.measurement.map_or(0.0, |m| m.min_x)
    }

    /// Measured label right edge, `0.0` while unmeasured.
    pub fn max_x(&self) -> f32 {
        self.measurement.map_or(0.0, |m| m.max_x())
    }
}

/// Ordered collection of tabs with dense 1-based indices.
#[derive(Clone, Debug, Default)]
pub struct TabRegistry {
    tabs: SlotMap<TabId, Tab>,
    order: Vec<TabId>,
}

impl TabRegistry {
    /// Labels of the stock news-feed tab strip.
    pub fn default_labels() -> [&'static str; 9] {
        [
            "Flash",
            "Live Analysis",
            "Daily Picks",
            "24/7",
            "Domestic",
            "World",
            "Finance Focus",
            "Finance",
            "Society",
        ]
    }

    /// Builds a registry whose tab indices follow the iteration order,
    /// starting at 1.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for label in labels {
            registry.push(label.into());
        }
        registry
    }

    fn push(&mut self, label: String) -> TabId {
        let index = self.order.len() + 1;
        let id = self.tabs.insert_with_key(|id| Tab {
            id,
            label,
            index,
            measurement: None,
        });
        self.order.push(id);
        id
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no tabs.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks a tab up by id.
    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(id)
    }

    /// Looks a tab up by its 1-based index.
    pub fn by_index(&self, index: usize) -> Option<&Tab> {
        let id = self.order.get(index.checked_sub(1)?)?;
        self.tabs.get(*id)
    }

    /// Tab at zero-based `position`. Callers guarantee `position < len()`.
    pub(crate) fn tab_at(&self, position: usize) -> &Tab {
        &self.tabs[self.order[position]]
    }

    /// Iterates tabs in strip order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.order.iter().filter_map(|id| self.tabs.get(*id))
    }

    /// Records a tab's label geometry once.
    ///
    /// Returns `true` only when the geometry was written. Later calls for a
    /// measured tab, calls for unknown tabs and measurements without a
    /// positive finite width leave the registry unchanged.
    pub fn record_measurement(&mut self, id: TabId, measurement: TabMeasurement) -> bool {
        let Some(tab) = self.tabs.get_mut(id) else {
            return false;
        };
        if tab.measurement.is_some() || !measurement.is_usable() {
            return false;
        }
        tab.measurement = Some(measurement);
        true
    }

    /// Whether every tab has been measured.
    pub fn is_fully_measured(&self) -> bool {
        self.iter().all(Tab::is_measured)
    }

    /// Per-tab widths in strip order.
    pub fn width_breakpoints(&self) -> Vec<f32> {
        self.iter().map(Tab::width).collect()
    }

    /// Per-tab left edges in strip order.
    pub fn position_breakpoints(&self) -> Vec<f32> {
        self.iter().map(Tab::min_x).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_one_based() {
        let registry = TabRegistry::from_labels(TabRegistry::default_labels());
        assert_eq!(registry.len(), 9);
        for (position, tab) in registry.iter().enumerate() {
            assert_eq!(tab.index(), position + 1);
            assert_eq!(registry.by_index(position + 1).map(Tab::id), Some(tab.id()));
        }
        assert!(registry.by_index(0).is_none());
        assert!(registry.by_index(10).is_none());
    }

    #[test]
    fn test_unmeasured_tabs_report_zero_geometry() {
        let registry = TabRegistry::from_labels(["a", "b"]);
        let tab = registry.by_index(1).unwrap();
        assert!(!tab.is_measured());
        assert_eq!(tab.width(), 0.0);
        assert_eq!(tab.min_x(), 0.0);
        assert!(!registry.is_fully_measured());
    }

    #[test]
    fn test_measurement_is_write_once() {
        let mut registry = TabRegistry::from_labels(["a", "b"]);
        let id = registry.by_index(1).unwrap().id();

        assert!(registry.record_measurement(id, TabMeasurement::new(12.0, 40.0)));
        assert!(!registry.record_measurement(id, TabMeasurement::new(99.0, 10.0)));

        let tab = registry.get(id).unwrap();
        assert_eq!(tab.min_x(), 12.0);
        assert_eq!(tab.width(), 40.0);
        assert_eq!(tab.max_x(), 52.0);
    }

    #[test]
    fn test_zero_origin_counts_as_measured() {
        let mut registry = TabRegistry::from_labels(["a", "b"]);
        let id = registry.by_index(1).unwrap().id();
        assert!(registry.record_measurement(id, TabMeasurement::new(0.0, 40.0)));
        assert!(!registry.record_measurement(id, TabMeasurement::new(5.0, 40.0)));
        assert_eq!(registry.get(id).unwrap().min_x(), 0.0);
    }

    #[test]
    fn test_unusable_measurement_is_ignored() {
        let mut registry = TabRegistry::from_labels(["a", "b"]);
        let id = registry.by_index(2).unwrap().id();
        assert!(!registry.record_measurement(id, TabMeasurement::new(10.0, 0.0)));
        assert!(!registry.record_measurement(id, TabMeasurement::new(f32::NAN, 10.0)));
        assert!(!registry.get(id).unwrap().is_measured());
        assert!(registry.record_measurement(id, TabMeasurement::new(10.0, 30.0)));
    }

    #[test]
    fn test_breakpoints_follow_strip_order() {
        let mut registry = TabRegistry::from_labels(["a", "b", "c"]);
        let ids: Vec<_> = registry.iter().map(Tab::id).collect();
        for (k, id) in ids.iter().enumerate() {
            let k = k as f32;
            registry.record_measurement(*id, TabMeasurement::new(10.0 + 50.0 * k, 40.0 + k));
        }
        assert!(registry.is_fully_measured());
        assert_eq!(registry.width_breakpoints(), vec![40.0, 41.0, 42.0]);
        assert_eq!(registry.position_breakpoints(), vec![10.0, 60.0, 110.0]);
    }
}
