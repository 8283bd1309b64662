//! Swipe-driven selection and indicator geometry for a paged tab strip.
//!
//! ## Usage
//!
//! Feed layout callbacks from the host into a [`TabIndicatorCoordinator`]:
//! label rectangles through [`TabIndicatorCoordinator::on_tab_measured`],
//! page rectangles through [`TabIndicatorCoordinator::on_page_offset_changed`]
//! and taps or settled swipes through [`TabIndicatorCoordinator::select_tab`].
//! Paint the bar from [`TabIndicatorCoordinator::indicator`] and honour
//! [`TabIndicatorCoordinator::take_scroll_request`].

use std::fmt;

use derive_setters::Setters;
use thiserror::Error;
use tracing::{trace, warn};

use crate::{
    auto_scroll::{AutoScrollParams, ScrollRequest, evaluate_auto_scroll},
    interpolation::{InterpolationError, LinearInterpolation},
    tab::{Tab, TabId, TabMeasurement, TabRegistry},
};

/// Defaults for [`TabStripArgs`].
pub struct TabStripDefaults;

impl TabStripDefaults {
    /// Visible width of the tab strip.
    pub const VIEWPORT_WIDTH: f32 = 375.0;
    /// Inset subtracted from the left auto-scroll boundary.
    pub const LEADING_INSET: f32 = 20.0;
    /// Tabs of context kept before the selection.
    pub const CONTEXT_TABS: usize = 2;
    /// 1-based index of the initially selected tab.
    pub const INITIAL_TAB: usize = 1;
    /// Whether scroll requests ask for animation.
    pub const ANIMATE_SCROLL: bool = true;
}

/// Configuration for a [`TabIndicatorCoordinator`].
#[derive(Clone, Debug, PartialEq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TabStripArgs {
    /// Visible width of the tab strip.
    pub viewport_width: f32,
    /// Inset subtracted from the left auto-scroll boundary.
    pub leading_inset: f32,
    /// Tabs of context kept before the selection.
    pub context_tabs: usize,
    /// 1-based index of the initially selected tab.
    pub initial_tab: usize,
    /// Whether scroll requests ask for animation.
    pub animate_scroll: bool,
}

impl Default for TabStripArgs {
    fn default() -> Self {
        Self {
            viewport_width: TabStripDefaults::VIEWPORT_WIDTH,
            leading_inset: TabStripDefaults::LEADING_INSET,
            context_tabs: TabStripDefaults::CONTEXT_TABS,
            initial_tab: TabStripDefaults::INITIAL_TAB,
            animate_scroll: TabStripDefaults::ANIMATE_SCROLL,
        }
    }
}

impl TabStripArgs {
    fn auto_scroll_params(&self) -> AutoScrollParams {
        AutoScrollParams {
            viewport_width: self.viewport_width,
            leading_inset: self.leading_inset,
            context_tabs: self.context_tabs,
            animated: self.animate_scroll,
        }
    }
}

/// Width and left edge of the indicator bar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorGeometry {
    /// Bar width.
    pub width: f32,
    /// Bar left edge in tab-strip content coordinates.
    pub position: f32,
}

/// Notifications dispatched to subscribers after each state change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabStripEvent {
    /// The indicator moved or resized.
    IndicatorChanged(IndicatorGeometry),
    /// A different tab became selected.
    SelectionChanged {
        /// Previously selected tab.
        from: TabId,
        /// Newly selected tab.
        to: TabId,
    },
    /// The tab strip should bring a tab into view.
    ScrollIntoView(ScrollRequest),
}

/// Errors reported by [`TabIndicatorCoordinator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabStripError {
    /// A strip needs at least two tabs to interpolate between.
    #[error("a tab strip needs at least 2 tabs, got {0}")]
    TooFewTabs(usize),
    /// The configured initial tab does not exist.
    #[error("initial tab {index} is out of range for {tab_count} tabs")]
    InitialTabOutOfRange {
        /// Configured 1-based index.
        index: usize,
        /// Number of tabs in the strip.
        tab_count: usize,
    },
    /// The indicator tables could not be built.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
    /// The tab id does not belong to this strip.
    #[error("tab {0:?} is not part of this strip")]
    UnknownTab(TabId),
    /// The zero-based page does not exist.
    #[error("page {page} is out of range for {page_count} pages")]
    PageOutOfRange {
        /// Requested zero-based page.
        page: usize,
        /// Number of pages.
        page_count: usize,
    },
}

type Listener = Box<dyn FnMut(&TabStripEvent)>;

#[derive(Clone, Debug)]
struct IndicatorTables {
    page_extent: f32,
    width: LinearInterpolation,
    position: LinearInterpolation,
}

impl IndicatorTables {
    fn build(registry: &TabRegistry, page_extent: f32) -> Result<Self, InterpolationError> {
        let inputs: Vec<f32> = (0..registry.len())
            .map(|k| page_extent * k as f32)
            .collect();
        Ok(Self {
            page_extent,
            width: LinearInterpolation::new(inputs.clone(), registry.width_breakpoints())?,
            position: LinearInterpolation::new(inputs, registry.position_breakpoints())?,
        })
    }

    fn evaluate(&self, x: f32) -> IndicatorGeometry {
        IndicatorGeometry {
            width: self.width.evaluate(x),
            position: self.position.evaluate(x),
        }
    }
}

/// Owns selection, swipe offset and the derived indicator geometry of one
/// tab strip.
pub struct TabIndicatorCoordinator {
    registry: TabRegistry,
    args: TabStripArgs,
    selected_index: usize,
    previous_index: usize,
    content_offset: f32,
    page_extent: f32,
    tables: Option<IndicatorTables>,
    indicator: IndicatorGeometry,
    pending_scroll: Option<ScrollRequest>,
    listeners: Vec<Listener>,
    warned_unmeasured: bool,
}

impl TabIndicatorCoordinator {
    /// Creates a coordinator over `registry`.
    pub fn new(registry: TabRegistry, args: TabStripArgs) -> Result<Self, TabStripError> {
        let tab_count = registry.len();
        if tab_count < 2 {
            return Err(TabStripError::TooFewTabs(tab_count));
        }
        if args.initial_tab == 0 || args.initial_tab > tab_count {
            return Err(TabStripError::InitialTabOutOfRange {
                index: args.initial_tab,
                tab_count,
            });
        }
        let tables = IndicatorTables::build(&registry, 0.0)?;

        Ok(Self {
            selected_index: args.initial_tab,
            previous_index: args.initial_tab,
            registry,
            args,
            content_offset: 0.0,
            page_extent: 0.0,
            tables: Some(tables),
            indicator: IndicatorGeometry::default(),
            pending_scroll: None,
            listeners: Vec::new(),
            warned_unmeasured: false,
        })
    }

    /// Tabs managed by this coordinator.
    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// The selected tab.
    pub fn selected(&self) -> &Tab {
        self.registry.tab_at(self.selected_index - 1)
    }

    /// 1-based index of the selected tab.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// 1-based index of the tab selected before the last transition.
    pub fn previous_index(&self) -> usize {
        self.previous_index
    }

    /// Horizontal displacement of the visible page.
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    /// Current indicator geometry.
    pub fn indicator(&self) -> IndicatorGeometry {
        self.indicator
    }

    /// Drains the pending scroll-into-view request, if any.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    /// Registers a listener that is called synchronously after each change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&TabStripEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Records a tab label's geometry from the first layout pass.
    ///
    /// Returns `true` when the geometry was written; see
    /// [`TabRegistry::record_measurement`].
    pub fn on_tab_measured(&mut self, tab: TabId, measurement: TabMeasurement) -> bool {
        if !self.registry.record_measurement(tab, measurement) {
            return false;
        }
        self.tables = None;
        if self.page_extent > 0.0 && self.registry.is_fully_measured() {
            self.refresh_indicator();
        }
        true
    }

    /// Updates the swipe offset from the selected page's rectangle.
    ///
    /// `raw_min_x` is the page's left edge and `page_extent` its width.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_page_offset_changed(
        &mut self,
        raw_min_x: f32,
        page_extent: f32,
    ) -> IndicatorGeometry {
        let page_extent = sanitize_extent(page_extent);
        self.content_offset = raw_min_x - page_extent * (self.selected_index - 1) as f32;
        self.page_extent = page_extent;

        if !self.registry.is_fully_measured() && !self.warned_unmeasured {
            warn!("indicator queried before every tab was measured");
            self.warned_unmeasured = true;
        }

        self.refresh_indicator();
        self.indicator
    }

    /// Handles a layout report for any page.
    ///
    /// Only the selected page moves the swipe offset; every report refreshes
    /// the page extent and the indicator.
    pub fn on_page_layout(
        &mut self,
        tab: TabId,
        raw_min_x: f32,
        page_extent: f32,
    ) -> Result<IndicatorGeometry, TabStripError> {
        let index = self
            .registry
            .get(tab)
            .map(Tab::index)
            .ok_or(TabStripError::UnknownTab(tab))?;

        if index == self.selected_index {
            return Ok(self.on_page_offset_changed(raw_min_x, page_extent));
        }

        self.page_extent = sanitize_extent(page_extent);
        self.refresh_indicator();
        Ok(self.indicator)
    }

    /// Selects `tab`, e.g. after a tap on its label.
    ///
    /// Returns the scroll request issued for this transition, which is also
    /// kept until [`Self::take_scroll_request`] drains it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn select_tab(&mut self, tab: TabId) -> Result<Option<ScrollRequest>, TabStripError> {
        let index = self
            .registry
            .get(tab)
            .map(Tab::index)
            .ok_or(TabStripError::UnknownTab(tab))?;
        Ok(self.transition_to(index))
    }

    /// Selects the tab shown on zero-based `page`, e.g. after a swipe settles.
    pub fn select_page(&mut self, page: usize) -> Result<Option<ScrollRequest>, TabStripError> {
        let page_count = self.registry.len();
        if page >= page_count {
            return Err(TabStripError::PageOutOfRange { page, page_count });
        }
        Ok(self.transition_to(page + 1))
    }

    fn transition_to(&mut self, index: usize) -> Option<ScrollRequest> {
        let from = self.selected().id();
        let request = evaluate_auto_scroll(
            &self.registry,
            index,
            self.selected_index,
            &self.args.auto_scroll_params(),
        );

        self.previous_index = self.selected_index;
        self.selected_index = index;

        let to = self.selected().id();
        if from != to {
            self.emit(TabStripEvent::SelectionChanged { from, to });
        }
        if let Some(request) = request {
            self.pending_scroll = Some(request);
            self.emit(TabStripEvent::ScrollIntoView(request));
        }
        request
    }

    fn refresh_indicator(&mut self) {
        let stale = self
            .tables
            .as_ref()
            .is_none_or(|tables| tables.page_extent != self.page_extent);
        if stale {
            match IndicatorTables::build(&self.registry, self.page_extent) {
                Ok(tables) => self.tables = Some(tables),
                Err(err) => {
                    warn!(%err, "failed to rebuild indicator tables");
                    return;
                }
            }
        }
        let Some(tables) = self.tables.as_ref() else {
            return;
        };

        let geometry = tables.evaluate(-self.content_offset);
        trace!(
            width = geometry.width,
            position = geometry.position,
            "indicator geometry"
        );
        if geometry != self.indicator {
            self.indicator = geometry;
            self.emit(TabStripEvent::IndicatorChanged(geometry));
        }
        if self.registry.is_fully_measured() {
            self.warned_unmeasured = false;
        }
    }

    fn emit(&mut self, event: TabStripEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for TabIndicatorCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabIndicatorCoordinator")
            .field("args", &self.args)
            .field("selected_index", &self.selected_index)
            .field("previous_index", &self.previous_index)
            .field("content_offset", &self.content_offset)
            .field("page_extent", &self.page_extent)
            .field("indicator", &self.indicator)
            .field("pending_scroll", &self.pending_scroll)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}
