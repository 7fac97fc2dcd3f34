pub mod listener;
pub mod runtime;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::animator::counter::parse_target;
use crate::animator::watcher::{Rect, WatchKind};
use crate::animator::{PageElements, StatsGroup, Surface};

impl Surface for HtmlElement {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn append_div(&self) -> Option<Self> {
        let document = self.owner_document()?;
        let div = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        self.append_child(&div).ok()?;
        Some(div)
    }

    fn client_rect(&self) -> Option<Rect> {
        let rect = self.get_bounding_client_rect();
        Some(Rect {
            top: rect.top(),
            left: rect.left(),
            width: rect.width(),
            height: rect.height(),
        })
    }
}

pub fn html_elements(nodes: Result<NodeList, JsValue>) -> Vec<HtmlElement> {
    let nodes = match nodes {
        Ok(nodes) => nodes,
        Err(_) => return Vec::new(),
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    html_elements(document.query_selector_all(selector))
}

pub fn query_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Looks up everything the animator works on. Missing elements are simply
/// left out.
pub fn collect_page(document: &Document) -> PageElements<HtmlElement> {
    PageElements {
        header: query_one(document, "header"),
        hero: query_one(document, ".hero"),
        globe: query_one(document, ".globe"),
        connections: query_one(document, ".connections"),
        cards: query_all(document, WatchKind::Card.selector()),
        timeline_items: query_all(document, WatchKind::TimelineItem.selector()),
        impact_cards: query_all(document, WatchKind::ImpactCard.selector()),
        stats: query_one(document, WatchKind::StatsContainer.selector()).map(collect_stats),
    }
}

fn collect_stats(container: HtmlElement) -> StatsGroup<HtmlElement> {
    let stats = html_elements(container.query_selector_all(".stat-number"))
        .into_iter()
        .filter_map(|stat| {
            let raw = stat.get_attribute("data-target");
            match raw.as_deref().and_then(parse_target) {
                Some(target) => Some((stat, target)),
                None => {
                    warn!("Skipping .stat-number with data-target {:?}", raw);
                    None
                }
            }
        })
        .collect();
    StatsGroup { container, stats }
}

pub fn element_index(element: &Element, attribute: &str) -> Option<usize> {
    element
        .get_attribute(attribute)
        .and_then(|raw| raw.parse::<usize>().ok())
}
