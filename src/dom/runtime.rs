use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use super::listener::EventListener;
use crate::animator::hover::Pointer;
use crate::animator::watcher::{self, Viewport};
use crate::animator::ViewportAnimator;
use crate::config::AnimatorConfig;
use crate::dom;
use crate::error::{JsResultExt, SetupError};
use crate::navigation;

const INDEX_ATTRIBUTE: &str = "data-viewport-index";

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Owns every browser binding of the animator. Closures only hold weak
/// references back, so dropping the last `Rc<Runtime>` tears it all down.
pub struct Runtime {
    window: Window,
    animator: RefCell<ViewportAnimator<HtmlElement>>,
    scroll_frame: RefCell<Option<FrameCallback>>,
    scroll_frame_id: Cell<Option<i32>>,
    counter_frame: RefCell<Option<FrameCallback>>,
    counter_frame_id: Cell<Option<i32>>,
    observer: RefCell<Option<(IntersectionObserver, Closure<dyn FnMut(Array)>)>>,
    sampling: Cell<bool>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Runtime {
    pub fn attach() -> Result<Rc<Self>, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        let config = AnimatorConfig::load(&document);
        let animator = ViewportAnimator::new(config, dom::collect_page(&document));

        let runtime = Rc::new(Self {
            window,
            animator: RefCell::new(animator),
            scroll_frame: RefCell::new(None),
            scroll_frame_id: Cell::new(None),
            counter_frame: RefCell::new(None),
            counter_frame_id: Cell::new(None),
            observer: RefCell::new(None),
            sampling: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        });

        runtime.install_frame_callbacks();
        runtime.animator.borrow_mut().install_connections();
        runtime.watch();
        runtime.listen_scroll();
        runtime.listen_hover();
        runtime.listen_anchors(&document);

        {
            let animator = runtime.animator.borrow();
            info!(
                "Viewport effects attached: {} watched, {} counters, {} listeners{}",
                animator.watched_count(),
                animator.counters().len(),
                runtime.listeners.borrow().len(),
                if runtime.sampling.get() { ", sampling mode" } else { "" }
            );
        }
        Ok(runtime)
    }

    fn install_frame_callbacks(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        *self.scroll_frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(runtime) = weak.upgrade() {
                runtime.flush_scroll();
            }
        }) as Box<dyn FnMut(f64)>));

        let weak = Rc::downgrade(self);
        *self.counter_frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if let Some(runtime) = weak.upgrade() {
                runtime.counter_frame_id.set(None);
                let running = runtime.animator.borrow_mut().advance_counters(now);
                if running {
                    runtime.request_counter_frame();
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }

    fn request_frame(
        &self,
        callback: &RefCell<Option<FrameCallback>>,
        id: &Cell<Option<i32>>,
    ) -> bool {
        if id.get().is_some() {
            return true;
        }
        let callback = callback.borrow();
        let callback = match callback.as_ref() {
            Some(callback) => callback,
            None => return false,
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .context("requestAnimationFrame")
        {
            Ok(handle) => {
                id.set(Some(handle));
                true
            }
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }

    fn request_scroll_frame(&self) -> bool {
        self.request_frame(&self.scroll_frame, &self.scroll_frame_id)
    }

    fn request_counter_frame(&self) {
        self.request_frame(&self.counter_frame, &self.counter_frame_id);
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn viewport(&self) -> Viewport {
        let size = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: size(self.window.inner_width()),
            height: size(self.window.inner_height()),
        }
    }

    fn flush_scroll(&self) {
        self.scroll_frame_id.set(None);
        let offset = self.window.scroll_y().unwrap_or(0.0);
        self.animator.borrow_mut().flush_scroll(offset);
        if self.sampling.get() {
            self.sample();
        }
    }

    fn sample(&self) {
        let viewport = self.viewport();
        let now = self.now();
        let started = self.animator.borrow_mut().sample_visibility(viewport, now);
        if started {
            self.request_counter_frame();
        }
    }

    fn watch(self: &Rc<Self>) {
        let (threshold, root_margin) = {
            let animator = self.animator.borrow();
            (animator.config().threshold, animator.config().root_margin())
        };

        let weak = Rc::downgrade(self);
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            if let Some(runtime) = weak.upgrade() {
                runtime.on_intersections(entries, threshold);
            }
        }) as Box<dyn FnMut(Array)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(&root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .context("IntersectionObserver")
        {
            Ok(observer) => {
                for (index, kind, element) in self.animator.borrow().watched_elements() {
                    match element
                        .set_attribute(INDEX_ATTRIBUTE, &index.to_string())
                        .context("setAttribute")
                    {
                        Ok(()) => observer.observe(element),
                        Err(err) => warn!("Not watching {:?} #{}: {}", kind, index, err),
                    }
                }
                *self.observer.borrow_mut() = Some((observer, callback));
            }
            Err(err) => {
                warn!("{}; revealing on scroll instead", err);
                self.sampling.set(true);
                self.sample();
            }
        }
    }

    fn on_intersections(&self, entries: Array, threshold: f64) {
        let now = self.now();
        let mut started = false;
        {
            let mut animator = self.animator.borrow_mut();
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting()
                    || !watcher::meets_threshold(entry.intersection_ratio(), threshold)
                {
                    continue;
                }
                if let Some(index) = dom::element_index(&entry.target(), INDEX_ATTRIBUTE) {
                    started |= animator.reveal(index, now);
                }
            }
        }
        if started {
            self.request_counter_frame();
        }
    }

    fn listen(&self, listener: Result<EventListener, SetupError>) {
        match listener {
            Ok(listener) => self.listeners.borrow_mut().push(listener),
            Err(err) => warn!("{}", err),
        }
    }

    fn listen_scroll(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.listen(EventListener::new(&self.window, "scroll", move |_: Event| {
            if let Some(runtime) = weak.upgrade() {
                let schedule = runtime.animator.borrow_mut().on_scroll();
                if schedule && !runtime.request_scroll_frame() {
                    runtime.flush_scroll();
                }
            }
        }));
    }

    fn listen_hover(self: &Rc<Self>) {
        let targets = self.animator.borrow().hover_targets();
        for (target, element) in targets {
            for pointer in [Pointer::Enter, Pointer::Leave] {
                let weak: Weak<Self> = Rc::downgrade(self);
                self.listen(EventListener::new(&element, pointer.event(), move |_: Event| {
                    if let Some(runtime) = weak.upgrade() {
                        runtime.animator.borrow().hover(target, pointer);
                    }
                }));
            }
        }
    }

    fn listen_anchors(&self, document: &Document) {
        let anchors = dom::html_elements(document.query_selector_all(r##"a[href^="#"]"##));
        for anchor in anchors {
            let document = document.clone();
            let link = anchor.clone();
            self.listen(EventListener::new(&anchor, "click", move |event: Event| {
                event.prevent_default();
                let target = link
                    .get_attribute("href")
                    .and_then(|href| navigation::anchor_target(&href))
                    .and_then(|id| document.get_element_by_id(&id));
                match target {
                    Some(target) => navigation::smooth_scroll_to(&target),
                    None => debug!("Anchor {:?} has no target", link.get_attribute("href")),
                }
            }));
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        for id in [self.scroll_frame_id.take(), self.counter_frame_id.take()]
            .into_iter()
            .flatten()
        {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some((observer, _)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        debug!(
            "Viewport effects detached at scroll offset {}",
            self.animator.borrow().last_offset()
        );
    }
}
