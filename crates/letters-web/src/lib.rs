#![cfg(target_arch = "wasm32")]
//! Browser front-end for the hanging-letters logo.
//!
//! Mounts once: finds `#app-canvas`, builds the simulation scene, wires the
//! pointer and the `#sound-toggle` button, then drives everything from a
//! requestAnimationFrame loop.

use instant::Instant;
use letters_core::{default_letters, LetterScene, WindParams};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("letters-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // keep the canvas backing store matched to CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let scene = LetterScene::new(
        default_letters(),
        WindParams::default(),
        constants::SCENE_SEED,
    )
    .map_err(|e| anyhow::anyhow!("scene build failed: {e}"))?;
    let scene = Rc::new(RefCell::new(scene));

    // the audio resource is owned here and shared with the toggle wiring;
    // the context itself is created lazily, ideally inside a click gesture
    let audio = Rc::new(RefCell::new(audio::AudioOutput::new()));
    let sound_enabled = Rc::new(RefCell::new(dom::sound_toggle_initial(&document)));
    dom::set_sound_toggle_state(&document, *sound_enabled.borrow());
    events::wire_sound_toggle(&document, sound_enabled.clone(), audio.clone());

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        sound_enabled,
        audio,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
