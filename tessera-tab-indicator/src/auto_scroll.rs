//! Keeps the selected tab and its neighbours inside the visible tab strip.
//!
//! When the selection moves forward and the tabs to its right would spill
//! past the viewport edge, the strip is asked to reveal the next tab. Moving
//! backward near the left edge reveals the previous tab instead.

use tracing::debug;

use crate::tab::{TabId, TabRegistry};

/// A request for the tab strip to bring a tab into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Tab that should become visible.
    pub tab: TabId,
    /// 1-based index of that tab.
    pub index: usize,
    /// Whether the scroll should be animated rather than applied at once.
    pub animated: bool,
}

/// Parameters of the auto-scroll heuristic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScrollParams {
    /// Visible width of the tab strip.
    pub viewport_width: f32,
    /// Inset subtracted from the left boundary.
    pub leading_inset: f32,
    /// Number of tabs kept as context before the selection.
    pub context_tabs: usize,
    /// Whether emitted requests are animated.
    pub animated: bool,
}

/// Decides whether selecting `index` (coming from `previous_index`) should
/// scroll the strip.
///
/// Any failed neighbour lookup means there is nothing to reveal and yields
/// `None`.
pub fn evaluate_auto_scroll(
    registry: &TabRegistry,
    index: usize,
    previous_index: usize,
    params: &AutoScrollParams,
) -> Option<ScrollRequest> {
    if index == 0 || index > registry.len() {
        return None;
    }

    let effective_index = if index > params.context_tabs {
        index - params.context_tabs
    } else {
        index
    };

    let current = registry.by_index(effective_index)?;
    let next = registry.by_index(index + 1)?;
    let first = registry.by_index(index - 1)?;

    let right_boundary = current.max_x() + next.max_x();
    let left_boundary = current.min_x() - first.max_x() - params.leading_inset;
    debug!(index, previous_index, right_boundary, left_boundary, "auto-scroll boundaries");

    let target = if right_boundary >= params.viewport_width && index > previous_index {
        next
    } else if left_boundary <= 0.0 && index < previous_index {
        first
    } else {
        return None;
    };

    debug!(target = target.index(), "requesting scroll into view");
    Some(ScrollRequest {
        tab: target.id(),
        index: target.index(),
        animated: params.animated,
    })
}
