//! Indicator geometry and auto-scroll for swipeable tab strips.
//!
//! # Usage
//!
//! Build a [`TabRegistry`] from the tab labels, hand it to a
//! [`TabIndicatorCoordinator`] and forward layout and gesture callbacks from
//! the host UI. The coordinator publishes the indicator width and position
//! for every swipe frame and asks the tab strip to scroll when the selection
//! nears its edges.
//!
//! ```
//! use tessera_tab_indicator::{
//!     TabIndicatorCoordinator, TabMeasurement, TabRegistry, TabStripArgs,
//! };
//!
//! let registry = TabRegistry::from_labels(["Inbox", "Sent", "Archive"]);
//! let mut strip = TabIndicatorCoordinator::new(registry, TabStripArgs::default())?;
//!
//! // First layout pass of the tab strip.
//! let ids: Vec<_> = strip.registry().iter().map(|tab| tab.id()).collect();
//! for (k, id) in ids.iter().enumerate() {
//!     strip.on_tab_measured(*id, TabMeasurement::new(16.0 + 96.0 * k as f32, 64.0));
//! }
//!
//! // The user drags the first page halfway out of a 390 wide pager.
//! let indicator = strip.on_page_offset_changed(-195.0, 390.0);
//! assert_eq!(indicator.position, 64.0);
//!
//! // The swipe settles on the second page.
//! strip.select_page(1)?;
//! assert_eq!(strip.selected().label(), "Sent");
//! # Ok::<(), tessera_tab_indicator::TabStripError>(())
//! ```
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod auto_scroll;
pub mod coordinator;
pub mod interpolation;
pub mod spring;
pub mod tab;


pub use crate::{
    auto_scroll::{AutoScrollParams, ScrollRequest, evaluate_auto_scroll},
    coordinator::{
        IndicatorGeometry, TabIndicatorCoordinator, TabStripArgs, TabStripDefaults,
        TabStripError, TabStripEvent,
    },
    interpolation::{InterpolationError, LinearInterpolation},
    spring::{OffsetSpring, TabRowScroller},
    tab::{Tab, TabId, TabMeasurement, TabRegistry},
};
