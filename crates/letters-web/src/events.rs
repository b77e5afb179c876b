use crate::audio::AudioOutput;
use crate::camera;
use crate::constants::POINTER_PLANE_Z;
use crate::dom;
use crate::input;
use letters_core::{Camera, LetterScene, PICK_RADIUS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn scene_camera(canvas: &web::HtmlCanvasElement) -> Camera {
    Camera::logo(canvas.width() as f32 / canvas.height().max(1) as f32)
}

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<LetterScene>>,
}

/// Pointer handlers: down on the canvas picks and grabs a letter, move
/// drags it along the grab plane, up anywhere in the document releases.
pub fn wire_input_handlers(w: InputWiring) {
    // depth of the plane pointer rays are projected onto; set to the grabbed
    // letter's depth while a drag is active
    let plane_z = Rc::new(RefCell::new(POINTER_PLANE_Z));

    // pointermove
    {
        let scene_m = w.scene.clone();
        let canvas_m = w.canvas.clone();
        let plane_m = plane_z.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                let pos = input::pointer_canvas_px(&ev, &canvas_m);
                let cam = scene_camera(&canvas_m);
                let (ro, rd) = camera::screen_to_world_ray(
                    canvas_m.width() as f32,
                    canvas_m.height() as f32,
                    pos.x,
                    pos.y,
                    &cam,
                );
                if let Some(hit) = camera::ray_plane_z(ro, rd, *plane_m.borrow()) {
                    scene_m.borrow_mut().set_pointer_world(hit);
                }
            }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerdown
    {
        let scene_m = w.scene.clone();
        let canvas_m = w.canvas.clone();
        let plane_m = plane_z.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                let pos = input::pointer_canvas_px(&ev, &canvas_m);
                let cam = scene_camera(&canvas_m);
                let (ro, rd) = camera::screen_to_world_ray(
                    canvas_m.width() as f32,
                    canvas_m.height() as f32,
                    pos.x,
                    pos.y,
                    &cam,
                );
                let centers: Vec<glam::Vec3> = {
                    let scene = scene_m.borrow();
                    (0..scene.letter_count())
                        .filter_map(|i| scene.letter_pose(i).map(|(p, _)| p))
                        .collect()
                };
                if let Some((i, _t)) = input::pick_letter(&centers, ro, rd, PICK_RADIUS) {
                    *plane_m.borrow_mut() = centers[i].z;
                    if let Some(hit) = camera::ray_plane_z(ro, rd, centers[i].z) {
                        scene_m.borrow_mut().begin_grab(i, hit);
                    }
                }
                let _ = canvas_m.set_pointer_capture(ev.pointer_id());
                ev.prevent_default();
            }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup, anywhere in the document
    {
        let scene_m = w.scene.clone();
        let plane_m = plane_z.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                scene_m.borrow_mut().end_grab();
                *plane_m.borrow_mut() = POINTER_PLANE_Z;
                ev.prevent_default();
            }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

/// The on/off sound button: flips the flag, mirrors it into the DOM, and
/// uses the click gesture to unlock the audio context.
pub fn wire_sound_toggle(
    document: &web::Document,
    sound_enabled: Rc<RefCell<bool>>,
    audio: Rc<RefCell<AudioOutput>>,
) {
    let doc = document.clone();
    dom::add_click_listener(document, "sound-toggle", move || {
        let enabled = {
            let mut s = sound_enabled.borrow_mut();
            *s = !*s;
            *s
        };
        if enabled {
            audio.borrow_mut().ensure_started();
        }
        dom::set_sound_toggle_state(&doc, enabled);
        log::info!("[sound] {}", if enabled { "enabled" } else { "muted" });
    });
}
