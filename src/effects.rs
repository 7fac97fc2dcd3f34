use std::rc::Rc;

use log::{error, info, warn};
use stylist::GlobalStyle;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};
use yew::prelude::*;

use crate::dom::runtime::Runtime;
use crate::error::{JsResultExt, SetupError};

pub const ROOT_ID: &str = "viewport-effects-root";

const EFFECTS_CSS: &str = r#"
    @keyframes connectionPulse {
        0%, 100% {
            opacity: 0.3;
            height: 50px;
        }
        50% {
            opacity: 0.8;
            height: 80px;
        }
    }

    .visible {
        animation: fadeInUp 0.8s ease-out;
    }
"#;

/// Keeps the effects alive; dropping it unregisters the stylesheet and
/// detaches every listener.
pub struct Bindings {
    _runtime: Rc<Runtime>,
    style: Option<GlobalStyle>,
}

impl Bindings {
    pub fn attach() -> Result<Self, SetupError> {
        let style = match GlobalStyle::new(EFFECTS_CSS) {
            Ok(style) => Some(style),
            Err(err) => {
                warn!("{}", SetupError::Style(err.to_string()));
                None
            }
        };
        let runtime = Runtime::attach()?;
        info!("The World's Grasp on Society - Page Loaded Successfully");
        info!("Exploring the intersection of technology and human experience...");
        Ok(Self {
            _runtime: runtime,
            style,
        })
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        if let Some(style) = self.style.take() {
            style.unregister();
        }
    }
}

#[function_component(ViewportEffects)]
pub fn viewport_effects() -> Html {
    use_effect_with_deps(
        move |_| {
            let bindings = match Bindings::attach() {
                Ok(bindings) => Some(bindings),
                Err(err) => {
                    error!("Viewport effects disabled: {}", err);
                    None
                }
            };
            move || drop(bindings)
        },
        (),
    );

    html! {}
}

/// Appends the empty element the effects component renders into, so the
/// page's own markup is left alone.
pub fn mount_root(document: &Document) -> Result<Element, SetupError> {
    if let Some(existing) = document.get_element_by_id(ROOT_ID) {
        return Ok(existing);
    }
    let body = document.body().ok_or(SetupError::NoBody)?;
    let root = document.create_element("div").context("createElement")?;
    root.set_id(ROOT_ID);
    body.append_child(&root).context("appendChild")?;
    Ok(root)
}

/// Runs `start` once the document has been parsed.
pub fn when_ready<F>(document: &Document, start: F) -> Result<(), SetupError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        start();
        return Ok(());
    }
    let callback = wasm_bindgen::closure::Closure::once_into_js(start);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .context("addEventListener")
}
