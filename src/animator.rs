pub mod connections;
pub mod counter;
pub mod hover;
pub mod scroll;
pub mod watcher;

#[cfg(test)]
pub mod testing;

use log::debug;

use crate::config::AnimatorConfig;
use connections::ConnectionLines;
use counter::StatCounter;
use hover::{HoverTarget, Pointer};
use scroll::{ScrollFrame, ScrollSampler};
use watcher::{Rect, Viewport, WatchKind, Watched};

/// The handful of element operations the effects need. Implemented for
/// `web_sys::HtmlElement` and for an in-memory node in tests.
pub trait Surface: Clone {
    fn add_class(&self, class: &str);
    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str);
    /// Appends an empty `div` child and returns it.
    fn append_div(&self) -> Option<Self>;
    fn client_rect(&self) -> Option<Rect>;
}

pub struct StatsGroup<E> {
    pub container: E,
    /// Each `.stat-number` with its parsed `data-target`.
    pub stats: Vec<(E, f64)>,
}

/// Everything the animator touches, looked up once by the caller.
pub struct PageElements<E> {
    pub header: Option<E>,
    pub hero: Option<E>,
    pub globe: Option<E>,
    pub connections: Option<E>,
    pub cards: Vec<E>,
    pub timeline_items: Vec<E>,
    pub impact_cards: Vec<E>,
    pub stats: Option<StatsGroup<E>>,
}

impl<E> Default for PageElements<E> {
    fn default() -> Self {
        Self {
            header: None,
            hero: None,
            globe: None,
            connections: None,
            cards: Vec::new(),
            timeline_items: Vec::new(),
            impact_cards: Vec::new(),
            stats: None,
        }
    }
}

pub struct ViewportAnimator<E> {
    config: AnimatorConfig,
    watched: Vec<Watched<E>>,
    counters: Vec<StatCounter<E>>,
    sampler: ScrollSampler,
    header: Option<E>,
    hero: Option<E>,
    globe: Option<E>,
    connections_host: Option<E>,
    connections: ConnectionLines,
}

impl<E: Surface> ViewportAnimator<E> {
    pub fn new(config: AnimatorConfig, page: PageElements<E>) -> Self {
        let mut watched = Vec::new();
        watched.extend(page.cards.into_iter().map(|e| Watched::new(WatchKind::Card, e)));
        watched.extend(
            page.timeline_items
                .into_iter()
                .map(|e| Watched::new(WatchKind::TimelineItem, e)),
        );
        watched.extend(
            page.impact_cards
                .into_iter()
                .map(|e| Watched::new(WatchKind::ImpactCard, e)),
        );

        let mut counters = Vec::new();
        if let Some(stats) = page.stats {
            watched.push(Watched::new(WatchKind::StatsContainer, stats.container));
            counters.extend(
                stats
                    .stats
                    .into_iter()
                    .map(|(element, target)| StatCounter::new(element, target)),
            );
        }

        Self {
            config,
            watched,
            counters,
            sampler: ScrollSampler::default(),
            header: page.header,
            hero: page.hero,
            globe: page.globe,
            connections_host: page.connections,
            connections: ConnectionLines::default(),
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn watched_elements(&self) -> impl Iterator<Item = (usize, WatchKind, &E)> + '_ {
        self.watched
            .iter()
            .enumerate()
            .map(|(index, w)| (index, w.kind, &w.element))
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    pub fn counters(&self) -> &[StatCounter<E>] {
        &self.counters
    }

    #[cfg(test)]
    pub fn is_visible(&self, index: usize) -> bool {
        self.watched.get(index).map_or(false, Watched::is_visible)
    }

    /// Marks a watched element visible. Returns true if this started at
    /// least one counter, in which case the caller has to drive
    /// [`advance_counters`](Self::advance_counters) with frames.
    pub fn reveal(&mut self, index: usize, now: f64) -> bool {
        let watched = match self.watched.get_mut(index) {
            Some(watched) => watched,
            None => return false,
        };
        if !watched.mark_visible() {
            return false;
        }
        watched.element.add_class("visible");
        debug!("Revealed {:?} #{}", watched.kind, index);

        if watched.kind != WatchKind::StatsContainer {
            return false;
        }
        let mut started = false;
        for counter in self.counters.iter_mut() {
            started |= counter.start(now);
        }
        started
    }

    /// Reveals every hidden element that is far enough inside `viewport`.
    /// Used when the browser has no intersection observer.
    pub fn sample_visibility(&mut self, viewport: Viewport, now: f64) -> bool {
        let threshold = self.config.threshold;
        let inset = self.config.bottom_inset_px;
        let due: Vec<usize> = self
            .watched
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_visible())
            .filter_map(|(index, w)| w.element.client_rect().map(|rect| (index, rect)))
            .filter(|(_, rect)| {
                let fraction = watcher::visible_fraction(*rect, viewport, inset);
                fraction > 0.0 && watcher::meets_threshold(fraction, threshold)
            })
            .map(|(index, _)| index)
            .collect();

        let mut started = false;
        for index in due {
            started |= self.reveal(index, now);
        }
        started
    }

    #[cfg(test)]
    pub fn counters_running(&self) -> bool {
        self.counters.iter().any(StatCounter::is_animating)
    }

    /// Returns whether any counter still wants frames.
    pub fn advance_counters(&mut self, now: f64) -> bool {
        let steps = self.config.counter_steps;
        let interval = self.config.counter_interval_ms();
        let mut running = false;
        for counter in self.counters.iter_mut() {
            let was_animating = counter.is_animating();
            let more = counter.advance(now, steps, interval);
            if was_animating && !more {
                debug!("Counter reached {}", counter.current());
            }
            running |= more;
        }
        running
    }

    /// Returns true when the caller has to schedule a frame for
    /// [`flush_scroll`](Self::flush_scroll).
    pub fn on_scroll(&mut self) -> bool {
        self.sampler.request()
    }

    #[cfg(test)]
    pub fn scroll_pending(&self) -> bool {
        self.sampler.is_pending()
    }

    pub fn last_offset(&self) -> f64 {
        self.sampler.last_offset()
    }

    pub fn flush_scroll(&mut self, offset: f64) -> ScrollFrame {
        let frame = self.sampler.flush(offset, &self.config);
        if let Some(header) = &self.header {
            header.set_style("box-shadow", frame.header_shadow.css(&self.config));
        }
        if let Some(hero) = &self.hero {
            hero.set_style("transform", &frame.hero.transform_css());
            hero.set_style("opacity", &frame.hero.opacity_css());
        }
        frame
    }

    pub fn install_connections(&mut self) -> usize {
        let created = self
            .connections
            .install(self.connections_host.as_ref(), &self.config);
        if created > 0 {
            debug!("Installed {} connection lines", created);
        }
        created
    }

    pub fn hover_targets(&self) -> Vec<(HoverTarget, E)> {
        let globe = self
            .globe
            .iter()
            .map(|globe| (HoverTarget::Globe, globe.clone()));
        let cards = self
            .watched
            .iter()
            .enumerate()
            .filter(|(_, w)| w.kind == WatchKind::Card)
            .map(|(index, w)| (HoverTarget::Card(index), w.element.clone()));
        globe.chain(cards).collect()
    }

    pub fn hover(&self, target: HoverTarget, pointer: Pointer) {
        let (element, styles) = match target {
            HoverTarget::Globe => (self.globe.as_ref(), hover::globe_styles(pointer)),
            HoverTarget::Card(index) => (
                self.watched
                    .get(index)
                    .filter(|w| w.kind == WatchKind::Card)
                    .map(|w| &w.element),
                hover::card_styles(pointer),
            ),
        };
        if let Some(element) = element {
            for (property, value) in styles {
                element.set_style(property, value);
            }
        }
    }
}
