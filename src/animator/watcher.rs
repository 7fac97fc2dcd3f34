#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchKind {
    Card,
    TimelineItem,
    ImpactCard,
    StatsContainer,
}

impl WatchKind {
    pub fn selector(self) -> &'static str {
        match self {
            WatchKind::Card => ".card",
            WatchKind::TimelineItem => ".timeline-item",
            WatchKind::ImpactCard => ".impact-card",
            WatchKind::StatsContainer => ".stats-container",
        }
    }
}

pub struct Watched<E> {
    pub kind: WatchKind,
    pub element: E,
    visible: bool,
}

impl<E> Watched<E> {
    pub fn new(kind: WatchKind, element: E) -> Self {
        Self {
            kind,
            element,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips to visible. Returns false if it already was.
    pub fn mark_visible(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }
}

/// Bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Share of `rect` inside the viewport once its bottom edge is pulled up by
/// `bottom_inset`.
pub fn visible_fraction(rect: Rect, viewport: Viewport, bottom_inset: f64) -> f64 {
    let area = rect.width * rect.height;
    if area <= 0.0 {
        return 0.0;
    }

    let top = rect.top.max(0.0);
    let bottom = rect.bottom().min(viewport.height - bottom_inset);
    let left = rect.left.max(0.0);
    let right = rect.right().min(viewport.width);

    let visible_height = (bottom - top).max(0.0);
    let visible_width = (right - left).max(0.0);
    visible_width * visible_height / area
}

/// Browsers report the crossing ratio with some rounding.
pub fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    ratio + 1e-3 >= threshold
}
