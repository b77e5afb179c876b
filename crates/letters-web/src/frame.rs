use crate::audio::AudioOutput;
use crate::camera;
use crate::constants::{LETTER_WORLD_HALF_HEIGHT, MAX_FRAME_DT_SEC};
use crate::render;
use instant::Instant;
use letters_core::{Camera, LetterScene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<LetterScene>>,
    pub sound_enabled: Rc<RefCell<bool>>,
    pub audio: Rc<RefCell<AudioOutput>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

fn glyph_id(glyph: char) -> u32 {
    match glyph {
        'A' => 0,
        'U' => 1,
        'W' => 2,
        _ => 3,
    }
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let events = self.scene.borrow_mut().step(dt);
        if !events.is_empty() && *self.sound_enabled.borrow() {
            let mut audio = self.audio.borrow_mut();
            for ev in &events {
                audio.play_chime(&ev.voice);
            }
        }

        let width = self.canvas.width();
        let height = self.canvas.height();
        let cam = Camera::logo(width as f32 / height.max(1) as f32);
        let vp = cam.view_projection();
        let view_right =
            (cam.target - cam.eye).cross(cam.up).normalize() * LETTER_WORLD_HALF_HEIGHT;

        let scene = self.scene.borrow();
        let held = scene.grab.held_letter();
        let mut letters = Vec::with_capacity(scene.letter_count());
        for (i, cfg) in scene.configs.iter().enumerate() {
            let Some((pos, rot)) = scene.letter_pose(i) else {
                continue;
            };
            let Some(uv) = camera::world_to_uv(&vp, pos) else {
                continue;
            };
            let Some(uv_edge) = camera::world_to_uv(&vp, pos + view_right) else {
                continue;
            };
            letters.push(render::LetterInstance {
                uv,
                px_per_unit: render::px_per_world_unit(uv, uv_edge, width as f32, height as f32),
                angle: render::roll_angle(rot),
                color: cfg.material.color_rgb,
                highlight: if held == Some(i) { 1.0 } else { 0.0 },
                glyph: glyph_id(cfg.glyph),
                metalness: cfg.material.metalness,
                roughness: cfg.material.roughness,
            });
        }
        let ropes: Vec<render::RopeInstance> = scene
            .rope_segments()
            .iter()
            .filter_map(|(a, b)| {
                Some(render::RopeInstance {
                    a_uv: camera::world_to_uv(&vp, *a)?,
                    b_uv: camera::world_to_uv(&vp, *b)?,
                })
            })
            .collect();
        drop(scene);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            if let Err(e) = g.render(dt, &letters, &ropes) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
