use glam::Vec3;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest letter hit by the ray, as (index, ray parameter).
#[inline]
pub fn pick_letter(
    centers: &[Vec3],
    ray_origin: Vec3,
    ray_dir: Vec3,
    radius: f32,
) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, center) in centers.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, *center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}

// ---------------- Pointer helpers ----------------
// Browser-only; kept behind cfg so the pure picking math above compiles in
// host-side tests.
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn pointer_canvas_px(
    ev: &web_sys::PointerEvent,
    canvas: &web_sys::HtmlCanvasElement,
) -> glam::Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    glam::Vec2::new(sx, sy)
}
