// Host-side tests for the letter table and scene constants.

use letters_core::config::{default_letters, slot_x, LetterMaterial, WindParams};
use letters_core::constants::*;

#[test]
fn default_table_matches_the_logo() {
    let letters = default_letters();
    assert_eq!(letters.len(), 3);

    let glyphs: Vec<char> = letters.iter().map(|l| l.glyph).collect();
    assert_eq!(glyphs, vec!['A', 'U', 'W']);
    for (i, l) in letters.iter().enumerate() {
        assert_eq!(l.slot, i);
        assert_eq!(l.chime_hz, DEFAULT_CHIME_HZ[i]);
        assert!(l.mass > 0.0);
    }

    // the wide W hangs from two ropes, one off each shoulder
    assert_eq!(letters[0].attachments.len(), 1);
    assert_eq!(letters[1].attachments.len(), 1);
    assert_eq!(letters[2].attachments.len(), 2);
    assert!(letters[2].attachments[0].x < 0.0);
    assert!(letters[2].attachments[1].x > 0.0);
}

#[test]
fn slots_are_centered_and_evenly_spaced() {
    assert_eq!(slot_x(0), -LETTER_SPACING);
    assert_eq!(slot_x(1), 0.0);
    assert_eq!(slot_x(2), LETTER_SPACING);
    // neighbours cannot rest in contact
    assert!(LETTER_SPACING > 2.0 * LETTER_RADIUS);
}

#[test]
fn default_material_is_dark_metal() {
    let m = LetterMaterial::default();
    assert!(m.color_rgb.iter().all(|c| *c < 0.1));
    assert!(m.metalness > 0.0 && m.metalness <= 1.0);
    assert!(m.roughness > 0.0 && m.roughness <= 1.0);
}

#[test]
fn tuning_constants_are_sane() {
    assert!(ROPE_LENGTH > 0.0);
    assert!(SUBSTEPS > 0 && ROPE_ITERATIONS > 0);
    assert!(RESTITUTION >= 0.0 && RESTITUTION < 1.0);
    assert!(CHIME_COOLDOWN_SEC > 0.0);
    assert!(CHIME_MIN_VELOCITY <= CHIME_MAX_VELOCITY);
    assert!(PICK_RADIUS >= LETTER_RADIUS);
    // the park spot is far enough to always trigger the snap, not a sweep
    let park = glam::Vec3::from(POINTER_PARK);
    assert!(park.length() > POINTER_SNAP_DIST);

    let wind = WindParams::default();
    assert!(wind.strength > 0.0 && wind.speed > 0.0);
}
