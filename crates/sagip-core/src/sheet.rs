// ── Bottom-sheet drag controller ──
//
// A two-state machine (idle / dragging) over three detents. Pointer input
// arrives as `SheetEvent`s through a single transition function,
// `BottomSheet::handle`, which returns the `SheetEffect` the rendering layer
// should apply. Moves are coalesced: only the latest pointer position is
// kept until the next `Frame` event recomputes the live height.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tokio::sync::watch;
use tracing::debug;

use crate::scroll::{ScrollGuard, ScrollLock};

/// Viewport width at and above which the desktop layout applies.
pub const DESKTOP_MIN_WIDTH: f64 = 768.0;

/// Duration of the eased snap to a detent.
pub const SNAP_TRANSITION: Duration = Duration::from_millis(300);

// ── Configuration ────────────────────────────────────────────────────

/// Detent heights as fractions of the viewport height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub collapsed_mobile: f64,
    pub collapsed_desktop: f64,
    pub mid: f64,
    pub full: f64,
    /// Width (logical px) from which `collapsed_desktop` is used.
    pub desktop_min_width: f64,
    /// Snap transition length in milliseconds.
    pub transition_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            collapsed_mobile: 0.17,
            collapsed_desktop: 0.19,
            mid: 0.55,
            full: 0.9,
            desktop_min_width: DESKTOP_MIN_WIDTH,
            transition_ms: 300,
        }
    }
}

/// A detent fraction outside `0 < collapsed < mid < full <= 1`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid sheet.{field}: {reason}")]
pub struct InvalidSheetConfig {
    pub field: &'static str,
    pub reason: String,
}

impl SheetConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Check that every fraction is finite and the detents stack in order.
    pub fn validate(&self) -> Result<(), InvalidSheetConfig> {
        let fractions = [
            ("collapsed_mobile", self.collapsed_mobile),
            ("collapsed_desktop", self.collapsed_desktop),
            ("mid", self.mid),
            ("full", self.full),
        ];
        for (field, value) in fractions {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(InvalidSheetConfig {
                    field,
                    reason: format!("expected a fraction in (0, 1], got {value}"),
                });
            }
        }
        for (field, collapsed) in [
            ("collapsed_mobile", self.collapsed_mobile),
            ("collapsed_desktop", self.collapsed_desktop),
        ] {
            if collapsed >= self.mid {
                return Err(InvalidSheetConfig {
                    field,
                    reason: format!("{collapsed} must be below mid ({})", self.mid),
                });
            }
        }
        if self.mid >= self.full {
            return Err(InvalidSheetConfig {
                field: "mid",
                reason: format!("{} must be below full ({})", self.mid, self.full),
            });
        }
        if !self.desktop_min_width.is_finite() || self.desktop_min_width < 0.0 {
            return Err(InvalidSheetConfig {
                field: "desktop_min_width",
                reason: format!("expected a non-negative width, got {}", self.desktop_min_width),
            });
        }
        Ok(())
    }

    /// Whether `viewport` uses the desktop collapsed height.
    pub fn is_desktop(&self, viewport: Viewport) -> bool {
        viewport.width >= self.desktop_min_width
    }

    /// Pixel heights for a viewport.
    pub fn heights(&self, viewport: Viewport) -> DetentHeights {
        let collapsed = if self.is_desktop(viewport) {
            self.collapsed_desktop
        } else {
            self.collapsed_mobile
        };
        DetentHeights::new(
            viewport.height * collapsed,
            viewport.height * self.mid,
            viewport.height * self.full,
        )
    }
}

/// Logical viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ── Detents ──────────────────────────────────────────────────────────

/// Resting position of the sheet, listed low to high.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Detent {
    #[default]
    Collapsed,
    Mid,
    Full,
}

/// Pixel heights for each detent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetentHeights {
    pub collapsed: f64,
    pub mid: f64,
    pub full: f64,
}

impl DetentHeights {
    pub fn new(collapsed: f64, mid: f64, full: f64) -> Self {
        Self {
            collapsed,
            mid,
            full,
        }
    }

    pub fn height(&self, detent: Detent) -> f64 {
        match detent {
            Detent::Collapsed => self.collapsed,
            Detent::Mid => self.mid,
            Detent::Full => self.full,
        }
    }

    /// Bound a live height to the collapsed..full range.
    pub fn clamp(&self, height: f64) -> f64 {
        height.max(self.collapsed).min(self.full)
    }

    /// Detent closest to `height`. Ties go to the earlier-listed detent.
    pub fn nearest(&self, height: f64) -> Detent {
        let mut best = Detent::Collapsed;
        let mut best_gap = (self.collapsed - height).abs();
        for detent in Detent::iter().skip(1) {
            let gap = (self.height(detent) - height).abs();
            if gap < best_gap {
                best = detent;
                best_gap = gap;
            }
        }
        best
    }
}

// ── Events and effects ───────────────────────────────────────────────

/// Input to the controller, independent of any event API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    /// Pointer or touch pressed on the drag handle.
    PointerDown { y: f64 },
    /// Pointer or touch moved anywhere while pressed.
    PointerMove { y: f64 },
    /// Animation frame tick; flushes the latest coalesced move.
    Frame,
    /// Pointer or touch released.
    PointerUp,
    /// Collapse unconditionally (e.g. a list item was selected).
    Reset,
    /// Viewport changed size.
    Resize(Viewport),
}

/// Timing curve for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Easing {
    /// Follow the pointer with no animation.
    None,
    Ease,
}

/// Where the panel should end up and how to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetTransition {
    pub detent: Detent,
    pub height: f64,
    /// Offset from the top of the viewport (`viewport height - height`).
    pub translate_y: f64,
    pub duration: Duration,
    pub easing: Easing,
}

/// What the rendering layer should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEffect {
    /// Nothing to render.
    None,
    /// Schedule a `Frame` event on the next animation frame.
    RequestFrame,
    /// Follow the pointer: set the panel height without animation.
    Live { height: f64, translate_y: f64 },
    /// Animate to a detent.
    Snap(SheetTransition),
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetState {
    Idle {
        detent: Detent,
    },
    Dragging {
        /// Detent the drag started from.
        resting: Detent,
        start_y: f64,
        /// Latest pointer Y not yet applied by a frame.
        pending_y: Option<f64>,
        live_height: f64,
    },
}

// ── Controller ───────────────────────────────────────────────────────

/// Bottom-sheet drag controller.
///
/// Observers subscribe to the resting detent via [`BottomSheet::subscribe`].
/// With [`BottomSheet::lock_scroll_when_expanded`], the sheet holds a
/// scroll lock whenever it rests above the collapsed detent.
pub struct BottomSheet {
    config: SheetConfig,
    viewport: Viewport,
    heights: DetentHeights,
    state: SheetState,
    detent_tx: watch::Sender<Detent>,
    scroll_lock: Option<ScrollLock>,
    scroll_guard: Option<ScrollGuard>,
}

impl BottomSheet {
    /// New sheet resting at `collapsed`.
    pub fn new(config: SheetConfig, viewport: Viewport) -> Self {
        let heights = config.heights(viewport);
        let (detent_tx, _) = watch::channel(Detent::Collapsed);
        Self {
            config,
            viewport,
            heights,
            state: SheetState::Idle {
                detent: Detent::Collapsed,
            },
            detent_tx,
            scroll_lock: None,
            scroll_guard: None,
        }
    }

    /// Hold `lock` while the sheet rests at `mid` or `full`.
    pub fn lock_scroll_when_expanded(mut self, lock: ScrollLock) -> Self {
        self.scroll_lock = Some(lock);
        self.sync_scroll_lock(self.detent());
        self
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    pub fn heights(&self) -> DetentHeights {
        self.heights
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current resting detent (the drag origin while dragging).
    pub fn detent(&self) -> Detent {
        match self.state {
            SheetState::Idle { detent } => detent,
            SheetState::Dragging { resting, .. } => resting,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SheetState::Dragging { .. })
    }

    /// Height the panel currently occupies.
    pub fn current_height(&self) -> f64 {
        match self.state {
            SheetState::Idle { detent } => self.heights.height(detent),
            SheetState::Dragging { live_height, .. } => live_height,
        }
    }

    /// Watch the resting detent.
    pub fn subscribe(&self) -> watch::Receiver<Detent> {
        self.detent_tx.subscribe()
    }

    /// Apply one event. This is the only way state changes.
    pub fn handle(&mut self, event: SheetEvent) -> SheetEffect {
        match (self.state, event) {
            (SheetState::Idle { detent }, SheetEvent::PointerDown { y }) => {
                self.state = SheetState::Dragging {
                    resting: detent,
                    start_y: y,
                    pending_y: None,
                    live_height: self.heights.height(detent),
                };
                SheetEffect::None
            }
            (
                SheetState::Dragging {
                    resting,
                    start_y,
                    pending_y,
                    live_height,
                },
                SheetEvent::PointerMove { y },
            ) => {
                self.state = SheetState::Dragging {
                    resting,
                    start_y,
                    pending_y: Some(y),
                    live_height,
                };
                if pending_y.is_some() {
                    SheetEffect::None
                } else {
                    SheetEffect::RequestFrame
                }
            }
            (SheetState::Dragging { .. }, SheetEvent::Frame) => match self.flush_pending() {
                Some(height) => SheetEffect::Live {
                    height,
                    translate_y: self.viewport.height - height,
                },
                None => SheetEffect::None,
            },
            (SheetState::Dragging { .. }, SheetEvent::PointerUp) => {
                self.flush_pending();
                let target = self.heights.nearest(self.current_height());
                SheetEffect::Snap(self.settle(target, Easing::Ease))
            }
            (_, SheetEvent::Reset) => SheetEffect::Snap(self.settle(Detent::Collapsed, Easing::Ease)),
            (_, SheetEvent::Resize(viewport)) => self.resize(viewport),
            // Stray input: moves/ups with no press, or a second press mid-drag.
            (
                SheetState::Idle { .. },
                SheetEvent::PointerMove { .. } | SheetEvent::Frame | SheetEvent::PointerUp,
            )
            | (SheetState::Dragging { .. }, SheetEvent::PointerDown { .. }) => SheetEffect::None,
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Apply the latest coalesced move. Returns the new live height if one
    /// was pending.
    fn flush_pending(&mut self) -> Option<f64> {
        let SheetState::Dragging {
            resting,
            start_y,
            pending_y: Some(y),
            ..
        } = self.state
        else {
            return None;
        };
        // Dragging up (pointer Y decreasing) grows the panel.
        let delta = start_y - y;
        let height = self.heights.clamp(self.heights.height(resting) + delta);
        self.state = SheetState::Dragging {
            resting,
            start_y,
            pending_y: None,
            live_height: height,
        };
        Some(height)
    }

    /// Come to rest at `detent`, notifying observers if it changed.
    fn settle(&mut self, detent: Detent, easing: Easing) -> SheetTransition {
        let previous = self.detent();
        self.state = SheetState::Idle { detent };
        if previous != detent {
            debug!(from = %previous, to = %detent, "sheet detent changed");
        }
        self.detent_tx.send_if_modified(|current| {
            let changed = *current != detent;
            *current = detent;
            changed
        });
        self.sync_scroll_lock(detent);

        let height = self.heights.height(detent);
        SheetTransition {
            detent,
            height,
            translate_y: self.viewport.height - height,
            duration: match easing {
                Easing::Ease => self.config.transition(),
                Easing::None => Duration::ZERO,
            },
            easing,
        }
    }

    fn resize(&mut self, viewport: Viewport) -> SheetEffect {
        self.viewport = viewport;
        self.heights = self.config.heights(viewport);
        match self.state {
            SheetState::Idle { detent } => SheetEffect::Snap(self.settle(detent, Easing::None)),
            SheetState::Dragging {
                resting,
                start_y,
                pending_y,
                live_height,
            } => {
                self.state = SheetState::Dragging {
                    resting,
                    start_y,
                    pending_y,
                    live_height: self.heights.clamp(live_height),
                };
                SheetEffect::None
            }
        }
    }

    fn sync_scroll_lock(&mut self, detent: Detent) {
        let Some(lock) = &self.scroll_lock else {
            return;
        };
        if detent == Detent::Collapsed {
            self.scroll_guard = None;
        } else if self.scroll_guard.is_none() {
            self.scroll_guard = Some(lock.acquire("bottom-sheet"));
        }
    }
}
