use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Reflect;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

use crate::error::{JsResultExt, SetupError};

const SCROLL_TO_SECTION: &str = "scrollToSection";

/// Element id an in-page link points at. `#` on its own and non-fragment
/// links yield `None`.
pub fn anchor_target(href: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(
        urlencoding::decode(fragment)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| fragment.to_string()),
    )
}

pub fn smooth_scroll_to(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Callable from the page as `scrollToSection("impact")`.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(section_id: &str) -> bool {
    let section = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(section_id));
    match section {
        Some(section) => {
            smooth_scroll_to(&section);
            true
        }
        None => {
            debug!("No section #{} to scroll to", section_id);
            false
        }
    }
}

/// Installs `window.scrollToSection` for inline page scripts. The closure
/// lives as long as the page.
pub fn expose_scroll_to_section(window: &Window) -> Result<(), SetupError> {
    let closure = Closure::wrap(
        Box::new(|section_id: String| scroll_to_section(&section_id)) as Box<dyn Fn(String) -> bool>
    );
    Reflect::set(window, &JsValue::from_str(SCROLL_TO_SECTION), closure.as_ref())
        .context("window.scrollToSection")?;
    closure.forget();
    Ok(())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::js_sys::Function;

    wasm_bindgen_test_configure!(run_in_browser);

    fn call(global: &Function, section_id: &str) -> Option<bool> {
        global
            .call1(&JsValue::NULL, &JsValue::from_str(section_id))
            .unwrap()
            .as_bool()
    }

    #[wasm_bindgen_test]
    fn scroll_to_section_is_a_window_global() {
        let window = web_sys::window().unwrap();
        expose_scroll_to_section(&window).unwrap();

        let global: Function = Reflect::get(&window, &JsValue::from_str(SCROLL_TO_SECTION))
            .unwrap()
            .dyn_into()
            .unwrap();
        assert_eq!(call(&global, "no-such-section"), Some(false));

        let document = window.document().unwrap();
        let section = document.create_element("section").unwrap();
        section.set_id("impact");
        document.body().unwrap().append_child(&section).unwrap();
        assert_eq!(call(&global, "impact"), Some(true));
        section.remove();
    }
}
