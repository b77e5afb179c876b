//! Declarative per-letter configuration.
//!
//! Everything that varies per glyph lives in one table: attachment points,
//! extra ropes, material, mass, chime frequency. The scene iterates the table
//! uniformly and never branches on the glyph itself.

use glam::Vec3;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

use crate::constants::{
    DEFAULT_CHIME_HZ, LETTER_ANGULAR_DAMPING, LETTER_LINEAR_DAMPING, LETTER_MASS, LETTER_SPACING,
};

#[derive(Clone, Copy, Debug)]
pub struct LetterMaterial {
    pub color_rgb: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for LetterMaterial {
    fn default() -> Self {
        // near-black, slightly metallic, like the original artwork
        Self {
            color_rgb: [0.02, 0.02, 0.02],
            metalness: 0.3,
            roughness: 0.4,
        }
    }
}

/// One hanging letter: identity, slot, rope attachments, physical and audio
/// parameters. A letter with several attachment offsets gets one rope (and
/// one anchor) per offset.
#[derive(Clone, Debug)]
pub struct LetterConfig {
    pub glyph: char,
    pub slot: usize,
    /// Attachment offsets in letter-local space, rotated by the letter's
    /// orientation before use.
    pub attachments: SmallVec<[Vec3; 2]>,
    pub material: LetterMaterial,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub chime_hz: f32,
}

impl LetterConfig {
    pub fn new(glyph: char, slot: usize, attachment: Vec3, chime_hz: f32) -> Self {
        Self {
            glyph,
            slot,
            attachments: smallvec![attachment],
            material: LetterMaterial::default(),
            mass: LETTER_MASS,
            linear_damping: LETTER_LINEAR_DAMPING,
            angular_damping: LETTER_ANGULAR_DAMPING,
            chime_hz,
        }
    }

    /// Horizontal position of this letter's slot.
    pub fn slot_x(&self) -> f32 {
        slot_x(self.slot)
    }
}

#[inline]
pub fn slot_x(slot: usize) -> f32 {
    slot as f32 * LETTER_SPACING - LETTER_SPACING
}

/// The logo's letter table. Attachment offsets follow the glyph tops of the
/// original model; the wide "W" hangs from two ropes so it does not spin.
pub fn default_letters() -> Vec<LetterConfig> {
    let mut w = LetterConfig::new('W', 2, Vec3::new(-0.8, 1.05, 0.25), DEFAULT_CHIME_HZ[2]);
    w.attachments.push(Vec3::new(0.8, 1.05, 0.25));
    vec![
        LetterConfig::new('A', 0, Vec3::new(0.0, 1.1, 0.25), DEFAULT_CHIME_HZ[0]),
        LetterConfig::new('U', 1, Vec3::new(0.1, 1.05, 0.25), DEFAULT_CHIME_HZ[1]),
        w,
    ]
}

/// Global wind scalars driving the per-frame sway force.
#[derive(Clone, Copy, Debug)]
pub struct WindParams {
    pub strength: f32,
    pub speed: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            strength: crate::constants::WIND_STRENGTH,
            speed: crate::constants::WIND_SPEED,
        }
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("letter table is empty")]
    EmptyLetters,
    #[error("letter '{0}' has no attachment points")]
    NoAttachments(char),
    #[error("letter '{0}' mass must be positive")]
    BadMass(char),
    #[error("letter '{0}' chime frequency must be positive")]
    BadFrequency(char),
    #[error("duplicate slot {0}")]
    DuplicateSlot(usize),
    #[error("rope length must be positive, got {0}")]
    BadRopeLength(f32),
}

/// Reject letter tables the scene cannot build a consistent rig from.
pub fn validate_letters(letters: &[LetterConfig], rope_length: f32) -> Result<(), SceneError> {
    if letters.is_empty() {
        return Err(SceneError::EmptyLetters);
    }
    if !(rope_length > 0.0) {
        return Err(SceneError::BadRopeLength(rope_length));
    }
    let mut seen = fnv::FnvHashSet::default();
    for l in letters {
        if l.attachments.is_empty() {
            return Err(SceneError::NoAttachments(l.glyph));
        }
        if !(l.mass > 0.0) {
            return Err(SceneError::BadMass(l.glyph));
        }
        if !(l.chime_hz > 0.0) {
            return Err(SceneError::BadFrequency(l.glyph));
        }
        if !seen.insert(l.slot) {
            return Err(SceneError::DuplicateSlot(l.slot));
        }
    }
    Ok(())
}
