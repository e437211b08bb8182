//! Small DOM helpers: alerts, the info panel, overlay buttons, timers.
//!
//! Every helper returns `Result<_, JsValue>` so callers can log and carry on;
//! a missing element never takes the frame loop down.

use orrery_engine::UiCommand;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Window};

const PANEL_STYLE: &str = "position: absolute; top: 10px; right: 10px; \
    background-color: rgba(255, 255, 255, 0.8); padding: 10px; border-radius: 5px; \
    box-shadow: 0 0 10px rgba(0, 0, 0, 0.5);";

const BAR_STYLE: &str = "position: absolute; top: 10px; left: 10px; z-index: 10;";

const BUTTON_BACKGROUND: &str = "rgba(0, 128, 255, 0.8)";
const BUTTON_BACKGROUND_HOVER: &str = "rgba(0, 102, 204, 0.8)";

const BUTTON_STYLE: &str = "background-color: rgba(0, 128, 255, 0.8); color: white; \
    border: none; padding: 10px; margin: 5px; border-radius: 5px; \
    box-shadow: 0 0 10px rgba(0, 0, 0, 0.5); cursor: pointer; \
    transition: background-color 0.3s, transform 0.2s;";

/// Button fill, darker while the pointer is over it.
fn button_background(hovered: bool) -> &'static str {
    if hovered {
        BUTTON_BACKGROUND_HOVER
    } else {
        BUTTON_BACKGROUND
    }
}

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))
}

/// RNG seed from the wall clock.
pub fn wall_clock_seed() -> u64 {
    (js_sys::Date::now() as u64) ^ 0x9E37_79B9_7F4A_7C15
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn utc_date_today() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.split('T').next().unwrap_or_default().to_string()
}

/// Blocking `window.alert`.
pub fn alert(message: &str) -> Result<(), JsValue> {
    window()?.alert_with_message(message)
}

/// Replace the inner HTML of the element with `id`.
pub fn set_inner_html(id: &str, html: &str) -> Result<(), JsValue> {
    let el = document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?;
    el.set_inner_html(html);
    Ok(())
}

/// Apply queued UI commands. Panel updates target the element `panel_id`.
pub fn apply_ui(commands: &[UiCommand], panel_id: &str) {
    for cmd in commands {
        let result = match cmd {
            UiCommand::Alert(msg) => alert(msg),
            UiCommand::SetPanel(html) => set_inner_html(panel_id, html),
        };
        if let Err(e) = result {
            log::error!("ui command {:?} failed: {:?}", cmd, e);
        }
    }
}

/// Create the fixed info panel in the top-right corner.
pub fn create_panel(id: &str, initial_text: &str) -> Result<HtmlElement, JsValue> {
    let doc = document()?;
    let panel = doc.create_element("div")?.dyn_into::<HtmlElement>()?;
    panel.set_id(id);
    panel.set_class_name("message");
    panel.set_inner_html(initial_text);
    panel.set_attribute("style", PANEL_STYLE)?;
    body()?.append_child(&panel)?;
    Ok(panel)
}

/// Create the top-left button bar.
pub fn create_button_bar() -> Result<HtmlElement, JsValue> {
    let bar = document()?.create_element("div")?.dyn_into::<HtmlElement>()?;
    bar.set_attribute("style", BAR_STYLE)?;
    body()?.append_child(&bar)?;
    Ok(bar)
}

/// Append a styled button to `parent` that calls `on_click` when pressed and
/// darkens on hover. The handlers live for the page lifetime.
pub fn add_button(
    parent: &HtmlElement,
    label: &str,
    on_click: impl FnMut() + 'static,
) -> Result<HtmlElement, JsValue> {
    let button = document()?.create_element("button")?.dyn_into::<HtmlElement>()?;
    button.set_inner_text(label);
    button.set_attribute("style", BUTTON_STYLE)?;

    let handler = Closure::<dyn FnMut()>::new(on_click);
    button.set_onclick(Some(handler.as_ref().unchecked_ref()));
    handler.forget();

    for hovered in [true, false] {
        let target = button.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = target.style().set_property("background-color", button_background(hovered)) {
                log::warn!("button hover style: {:?}", e);
            }
        });
        if hovered {
            button.set_onmouseenter(Some(handler.as_ref().unchecked_ref()));
        } else {
            button.set_onmouseleave(Some(handler.as_ref().unchecked_ref()));
        }
        handler.forget();
    }

    parent.append_child(&button)?;
    Ok(button)
}

/// Attach a click handler to an existing element. Returns `Ok(false)` when the
/// element is not in the page.
pub fn on_click_by_id(id: &str, on_click: impl FnMut() + 'static) -> Result<bool, JsValue> {
    let Some(el) = document()?.get_element_by_id(id) else {
        return Ok(false);
    };
    let el = el.dyn_into::<HtmlElement>()?;
    let handler = Closure::<dyn FnMut()>::new(on_click);
    el.set_onclick(Some(handler.as_ref().unchecked_ref()));
    handler.forget();
    Ok(true)
}

/// Add a CSS class to the element with `id`, if present.
pub fn add_class(id: &str, class: &str) -> Result<(), JsValue> {
    if let Some(el) = document()?.get_element_by_id(id) {
        el.class_list().add_1(class)?;
    }
    Ok(())
}

/// Resolve after `ms` milliseconds via `setTimeout`.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let scheduled = window()
            .and_then(|w| w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms));
        if scheduled.is_err() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_darkens_on_hover_and_restores() {
        assert!(BUTTON_STYLE.starts_with(&format!("background-color: {};", button_background(false))));
        assert_eq!(button_background(true), "rgba(0, 102, 204, 0.8)");
        assert_ne!(button_background(true), button_background(false));
    }
}
