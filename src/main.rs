use log::{error, info, warn};
use yew::prelude::*;

mod animator;
mod config;
mod dom;
mod effects;
mod error;
mod navigation;

use effects::ViewportEffects;
use error::SetupError;

#[function_component]
fn App() -> Html {
    html! {
        <ViewportEffects />
    }
}

fn start() -> Result<(), SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;

    if let Err(err) = navigation::expose_scroll_to_section(&window) {
        warn!("{}", err);
    }

    let ready_document = document.clone();
    effects::when_ready(&document, move || match effects::mount_root(&ready_document) {
        Ok(root) => {
            info!("Mounting viewport effects");
            yew::Renderer::<App>::with_root(root).render();
        }
        Err(err) => error!("Could not mount viewport effects: {}", err),
    })
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting viewport effects");
    if let Err(err) = start() {
        error!("Viewport effects not started: {}", err);
    }
}
