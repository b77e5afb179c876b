// Shared simulation/visual tuning constants used by the web frontend.

// Scene layout (matches the logo artwork: three slots, ropes from high anchors)
pub const LETTER_SPACING: f32 = 2.5; // world units between slots
pub const ROPE_LENGTH: f32 = 10.0; // anchor height == rope length
pub const LETTER_START_Y: f32 = 0.1; // letters drop from here into the ropes

// Physics
pub const GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];
pub const SUBSTEPS: u32 = 4;
pub const ROPE_ITERATIONS: u32 = 4; // constraint passes per substep
pub const RESTITUTION: f32 = 0.3;

// Letter bodies
pub const LETTER_MASS: f32 = 1.0;
pub const LETTER_RADIUS: f32 = 1.1; // sphere collider approximating the glyph
pub const LETTER_LINEAR_DAMPING: f32 = 0.2;
pub const LETTER_ANGULAR_DAMPING: f32 = 0.6;

// Pointer
pub const POINTER_RADIUS: f32 = 0.4; // kinematic cursor sphere
pub const PICK_RADIUS: f32 = 1.4; // ray-sphere radius for grabbing
pub const GRAB_STIFFNESS: f32 = 8.0; // velocity = error * stiffness
pub const POINTER_PARK: [f32; 3] = [0.0, 0.0, 50.0]; // sensor rest spot, out of the scene
pub const POINTER_SNAP_DIST: f32 = 5.0; // beyond this the sensor teleports, not glides

// Wind
pub const WIND_STRENGTH: f32 = 0.6;
pub const WIND_SPEED: f32 = 0.7;
pub const SLOT_PHASE_STEP: f32 = 1.3; // per-slot phase offset so letters desync

// Chimes
pub const CHIME_COOLDOWN_SEC: f64 = 0.1;
pub const CHIME_MASTER_GAIN: f32 = 0.35;
pub const CHIME_MIN_VELOCITY: f32 = 0.15;
pub const CHIME_MAX_VELOCITY: f32 = 1.0;
pub const CHIME_DETUNE_CENTS: f32 = 4.0; // max per-strike detune either way

// Camera (fixed; orbit/zoom intentionally disabled)
pub const CAMERA_EYE: [f32; 3] = [0.0, -2.0, 10.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, -1.0, 0.0];

// Default per-letter chime fundamentals (C5 / E5 / G5)
pub const DEFAULT_CHIME_HZ: [f32; 3] = [523.25, 659.25, 783.99];
