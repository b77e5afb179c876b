use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Reflect the sound toggle's state in its class list and accessible label.
pub fn set_sound_toggle_state(document: &web::Document, enabled: bool) {
    if let Some(el) = document.get_element_by_id("sound-toggle") {
        let classes = el.class_list();
        if enabled {
            let _ = classes.add_1("enabled");
            let _ = classes.remove_1("disabled");
        } else {
            let _ = classes.add_1("disabled");
            let _ = classes.remove_1("enabled");
        }
        let label = if enabled { "Mute sound" } else { "Enable sound" };
        let _ = el.set_attribute("aria-label", label);
        let _ = el.set_attribute("title", label);
    }
}

/// Initial toggle state comes from the markup: enabled unless the button
/// starts with the "disabled" class.
pub fn sound_toggle_initial(document: &web::Document) -> bool {
    document
        .get_element_by_id("sound-toggle")
        .map(|el| !el.class_list().contains("disabled"))
        .unwrap_or(true)
}
