// Frontend tuning constants

// Rope/anchor drawing
pub const ROPE_WIDTH_PX: f32 = 1.0;
pub const ROPE_ALPHA: f32 = 0.5;
pub const ANCHOR_RADIUS_PX: f32 = 3.0;

// World size of one letter glyph (cap height ~2 units, like the 3D model)
pub const LETTER_WORLD_HALF_HEIGHT: f32 = 1.0;

// Clamp a frame's dt so a background tab does not explode the simulation
pub const MAX_FRAME_DT_SEC: f32 = 0.05;

// Plane the pointer is projected onto when nothing is grabbed
pub const POINTER_PLANE_Z: f32 = 0.0;

// Seed for the chime detune stream
pub const SCENE_SEED: u64 = 7;
