use glam::{Mat4, Vec3, Vec4};
use letters_core::Camera;

/// Compute a world-space ray from canvas backing-store pixel coordinates.
///
/// Returns `(ray_origin, ray_direction)` for the given camera.
#[inline]
pub fn screen_to_world_ray(
    width: f32,
    height: f32,
    sx: f32,
    sy: f32,
    camera: &Camera,
) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let inv = camera.view_projection().inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p1 - ro).normalize();
    (ro, rd)
}

/// Project a world point into canvas UV space ([0,1] x [0,1], y down).
/// `None` when the point is behind the camera.
#[inline]
pub fn world_to_uv(view_proj: &Mat4, p: Vec3) -> Option<[f32; 2]> {
    let clip = *view_proj * Vec4::new(p.x, p.y, p.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some([0.5 + ndc.x * 0.5, 0.5 - ndc.y * 0.5])
}

/// Intersect a ray with the plane `z = plane_z`.
#[inline]
pub fn ray_plane_z(ro: Vec3, rd: Vec3, plane_z: f32) -> Option<Vec3> {
    if rd.z.abs() <= 1e-6 {
        return None;
    }
    let t = (plane_z - ro.z) / rd.z;
    (t >= 0.0).then(|| ro + rd * t)
}
