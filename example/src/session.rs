use std::time::Duration;

use anyhow::{Result, bail};
use tessera_tab_indicator::{
    Tab, TabIndicatorCoordinator, TabMeasurement, TabRegistry, TabRowScroller, TabStripArgs,
    TabStripEvent,
};
use tracing::{debug, info};

const PAGE_WIDTH: f32 = 375.0;
const TAB_WIDTH: f32 = 80.0;
const STRIP_PADDING: f32 = 20.0;
const FRAME: Duration = Duration::from_millis(16);
const MAX_SETTLE_FRAMES: u32 = 600;

/// Summary of one scripted swipe run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    /// Frames rendered, including the tab row settling afterwards.
    pub frames: u32,
    /// Scroll-into-view requests the strip issued.
    pub scroll_requests: usize,
    /// Tab row offset once the scroll animation came to rest.
    pub tab_row_offset: f32,
}

/// A tab strip plus the scroll view hosting it.
pub struct Session {
    strip: TabIndicatorCoordinator,
    scroller: TabRowScroller,
}

impl Session {
    /// Builds the stock strip and runs its first layout pass.
    pub fn new(args: TabStripArgs) -> Result<Self> {
        let scroller = TabRowScroller::new(args.viewport_width);
        let registry = TabRegistry::from_labels(TabRegistry::default_labels());
        let mut strip = TabIndicatorCoordinator::new(registry, args)?;

        strip.subscribe(|event| match event {
            TabStripEvent::SelectionChanged { from, to } => {
                debug!(?from, ?to, "selection changed")
            }
            TabStripEvent::ScrollIntoView(request) => {
                debug!(index = request.index, "scroll requested")
            }
            TabStripEvent::IndicatorChanged(_) => {}
        });

        let ids: Vec<_> = strip.registry().iter().map(Tab::id).collect();
        let mut content_width = STRIP_PADDING;
        for id in ids {
            strip.on_tab_measured(id, TabMeasurement::new(content_width, TAB_WIDTH));
            content_width += TAB_WIDTH;
        }

        let mut session = Self { strip, scroller };
        session
            .scroller
            .set_content_width(content_width + STRIP_PADDING);
        session.strip.on_page_offset_changed(0.0, PAGE_WIDTH);
        Ok(session)
    }

    /// The coordinator under test.
    pub fn strip(&self) -> &TabIndicatorCoordinator {
        &self.strip
    }

    /// Swipes page by page until tab `target` (1-based) is selected.
    pub fn swipe_to(&mut self, target: usize, frames_per_page: u32) -> Result<SessionReport> {
        let tab_count = self.strip.registry().len();
        if target == 0 || target > tab_count {
            bail!("target tab {target} is out of range for {tab_count} tabs");
        }

        let mut report = SessionReport {
            frames: 0,
            scroll_requests: 0,
            tab_row_offset: self.scroller.offset(),
        };

        while self.strip.selected_index() != target {
            let forward = target > self.strip.selected_index();
            let direction = if forward { -1.0 } else { 1.0 };

            for frame in 1..=frames_per_page {
                let progress = frame as f32 / frames_per_page as f32;
                let geometry = self
                    .strip
                    .on_page_offset_changed(direction * PAGE_WIDTH * progress, PAGE_WIDTH);
                self.scroller.tick(FRAME);
                report.frames += 1;
                debug!(
                    width = geometry.width,
                    position = geometry.position,
                    tab_row = self.scroller.offset(),
                    "frame"
                );
            }

            let page = self.strip.selected_index() - 1;
            let next_page = if forward { page + 1 } else { page - 1 };
            self.strip.select_page(next_page)?;
            if let Some(request) = self.strip.take_scroll_request() {
                report.scroll_requests += 1;
                if let Some(tab) = self.strip.registry().get(request.tab) {
                    self.scroller.scroll_into_view(tab, request.animated);
                }
            }
            self.strip.on_page_offset_changed(0.0, PAGE_WIDTH);
            info!(tab = self.strip.selected().label(), "page settled");
        }

        let mut settle_frames = 0;
        while self.scroller.is_animating() && settle_frames < MAX_SETTLE_FRAMES {
            self.scroller.tick(FRAME);
            settle_frames += 1;
        }
        report.frames += settle_frames;
        report.tab_row_offset = self.scroller.offset();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_session_reveals_upcoming_tabs() {
        let mut session = Session::new(TabStripArgs::default()).unwrap();
        let report = session.swipe_to(5, 4).unwrap();

        assert_eq!(session.strip().selected_index(), 5);
        assert_eq!(report.scroll_requests, 4);
        // Tab 6 ends at 20 + 6 * 80, aligned with the right edge.
        assert_eq!(report.tab_row_offset, 500.0 - 375.0);

        let indicator = session.strip().indicator();
        assert_eq!(indicator.width, TAB_WIDTH);
        assert_eq!(indicator.position, STRIP_PADDING + 4.0 * TAB_WIDTH);
    }

    #[test]
    fn test_round_trip_returns_tab_row_to_start() {
        let mut session = Session::new(TabStripArgs::default()).unwrap();
        session.swipe_to(5, 4).unwrap();
        let report = session.swipe_to(1, 4).unwrap();

        assert_eq!(session.strip().selected_index(), 1);
        assert_eq!(report.tab_row_offset, STRIP_PADDING);
        assert_eq!(session.strip().indicator().position, STRIP_PADDING);
    }

    #[test]
    fn test_long_swipe_still_lets_tab_row_settle() {
        let mut session = Session::new(TabStripArgs::default()).unwrap();
        let report = session.swipe_to(5, 150).unwrap();

        assert!(report.frames > 4 * 150);
        assert_eq!(report.tab_row_offset, 500.0 - 375.0);
    }

    #[test]
    fn test_rejects_unknown_target() {
        let mut session = Session::new(TabStripArgs::default()).unwrap();
        assert!(session.swipe_to(0, 4).is_err());
        assert!(session.swipe_to(10, 4).is_err());
    }
}
