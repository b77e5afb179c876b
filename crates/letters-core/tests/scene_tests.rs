// Host-side tests for the full scene: rig construction, wind, grab and
// chime emission.

use glam::Vec3;
use letters_core::config::{default_letters, LetterConfig, SceneError, WindParams};
use letters_core::constants::{DEFAULT_CHIME_HZ, ROPE_LENGTH};
use letters_core::scene::{wind_force, LetterScene};

const DT: f32 = 1.0 / 60.0;

fn still_air() -> WindParams {
    WindParams {
        strength: 0.0,
        speed: 0.0,
    }
}

fn make_scene(wind: WindParams) -> LetterScene {
    LetterScene::new(default_letters(), wind, 42).expect("default table should build")
}

#[test]
fn default_scene_builds_with_one_rope_per_attachment() {
    let scene = make_scene(still_air());
    assert_eq!(scene.letter_count(), 3);
    // A and U hang from one rope, W from two
    assert_eq!(scene.rope_segments().len(), 4);
    for i in 0..3 {
        assert!(scene.letter_pose(i).is_some());
    }
    assert!(scene.letter_pose(3).is_none());
}

#[test]
fn bad_letter_tables_are_rejected() {
    let err = |letters: Vec<LetterConfig>| match LetterScene::new(letters, still_air(), 0) {
        Err(e) => e,
        Ok(_) => panic!("invalid table was accepted"),
    };

    assert!(matches!(err(vec![]), SceneError::EmptyLetters));

    let mut no_attach = default_letters();
    no_attach[1].attachments.clear();
    assert!(matches!(err(no_attach), SceneError::NoAttachments('U')));

    let mut bad_mass = default_letters();
    bad_mass[0].mass = 0.0;
    assert!(matches!(err(bad_mass), SceneError::BadMass('A')));

    let mut bad_hz = default_letters();
    bad_hz[2].chime_hz = -1.0;
    assert!(matches!(err(bad_hz), SceneError::BadFrequency('W')));

    let mut dup = default_letters();
    dup[1].slot = 0;
    assert!(matches!(err(dup), SceneError::DuplicateSlot(0)));
}

#[test]
fn ropes_never_stretch_past_their_length() {
    let mut scene = make_scene(WindParams::default());
    for _ in 0..600 {
        scene.step(DT);
        // contact pushes land after the rope solve, so allow a small residual
        for (a, b) in scene.rope_segments() {
            assert!(
                a.distance(b) <= ROPE_LENGTH + 0.05,
                "rope stretched to {}",
                a.distance(b)
            );
        }
    }
}

#[test]
fn wind_force_phase_differs_per_slot() {
    let wind = WindParams::default();
    let f0 = wind_force(1.0, 0, &wind);
    let f1 = wind_force(1.0, 1, &wind);
    assert!((f0.x - f1.x).abs() > 1e-4, "neighbouring slots sway in lockstep");
    assert_eq!(f0.y, 0.0);
    // the out-of-plane component is the weaker one
    assert!(f0.z.abs() <= wind.strength * 0.3 + 1e-6);
}

#[test]
fn wind_moves_letters_and_is_deterministic() {
    let mut s1 = make_scene(WindParams::default());
    let mut s2 = make_scene(WindParams::default());
    let start = s1.letter_pose(0).unwrap().0;
    for _ in 0..300 {
        s1.step(DT);
        s2.step(DT);
    }
    let (p1, _) = s1.letter_pose(0).unwrap();
    let (p2, _) = s2.letter_pose(0).unwrap();
    assert_eq!(p1, p2, "same seed and inputs must replay identically");
    assert!((p1.x - start.x).abs() > 1e-3, "wind never displaced the letter");
}

#[test]
fn still_air_leaves_letters_hanging_quietly() {
    let mut scene = make_scene(still_air());
    for _ in 0..600 {
        let events = scene.step(DT);
        assert!(events.is_empty(), "letters chimed with nothing touching them");
    }
    // slots stay ordered left to right
    let xs: Vec<f32> = (0..3).map(|i| scene.letter_pose(i).unwrap().0.x).collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2]);
}

#[test]
fn grabbed_letter_follows_the_pointer_with_its_offset() {
    let mut scene = make_scene(still_air());
    let (start, _) = scene.letter_pose(1).unwrap();

    // pointer slightly off the letter's center; the offset must be preserved
    let pointer = start + Vec3::new(0.3, -0.2, 0.0);
    scene.begin_grab(1, pointer);
    assert_eq!(scene.grab.held_letter(), Some(1));

    // toward the camera, clear of both neighbours and within rope reach
    let target_pointer = pointer + Vec3::new(0.3, -0.2, 2.0);
    for _ in 0..120 {
        scene.set_pointer_world(target_pointer);
        scene.step(DT);
    }
    let (pos, _) = scene.letter_pose(1).unwrap();
    let expected = target_pointer + (start - pointer);
    assert!(
        pos.distance(expected) < 0.2,
        "letter at {pos:?}, expected near {expected:?}"
    );
}

#[test]
fn release_keeps_the_letter_swinging() {
    let mut scene = make_scene(still_air());
    let (start, _) = scene.letter_pose(0).unwrap();
    scene.begin_grab(0, start);

    // drag sideways to build up speed, then let go
    for i in 0..60 {
        scene.set_pointer_world(start + Vec3::new(0.03 * i as f32, 0.0, 0.0));
        scene.step(DT);
    }
    scene.end_grab();
    assert_eq!(scene.grab.held_letter(), None);

    let (before, _) = scene.letter_pose(0).unwrap();
    scene.step(DT);
    let (after, _) = scene.letter_pose(0).unwrap();
    assert!(
        before.distance(after) > 1e-4,
        "letter froze on release instead of keeping its velocity"
    );
}

#[test]
fn only_one_letter_is_held_at_a_time() {
    let mut scene = make_scene(still_air());
    let (p0, _) = scene.letter_pose(0).unwrap();
    let (p1, _) = scene.letter_pose(1).unwrap();
    scene.begin_grab(0, p0);
    scene.begin_grab(1, p1);
    assert_eq!(scene.grab.held_letter(), Some(1));
}

#[test]
fn colliding_letters_chime_once_per_contact() {
    let mut scene = make_scene(still_air());
    let mut chimes = 0;
    let mut check = |scene: &mut LetterScene| {
        for ev in scene.step(DT) {
            chimes += 1;
            let f = ev.voice.partials[0].frequency_hz;
            let want = DEFAULT_CHIME_HZ[ev.letter];
            // within the detune range
            assert!(
                (f / want - 1.0).abs() < 0.01,
                "letter {} chimed at {f} Hz, expected near {want}",
                ev.letter
            );
            assert!(ev.voice.velocity > 0.0 && ev.voice.velocity <= 1.0);
        }
    };

    // drag A into U, then let go and watch the aftermath
    let (p1, _) = scene.letter_pose(1).unwrap();
    scene.begin_grab(0, scene.letter_pose(0).unwrap().0);
    for _ in 0..90 {
        let here = scene.letter_pose(0).unwrap().0;
        scene.set_pointer_world(here.lerp(p1, 0.2));
        check(&mut scene);
    }
    scene.end_grab();
    for _ in 0..300 {
        check(&mut scene);
    }

    assert!(chimes > 0, "the dragged letter never struck its neighbour");
    // contact-begin gating keeps sustained contact from machine-gunning tones
    assert!(chimes < 100, "chimed {chimes} times, debounce is not working");
}

#[test]
fn zero_dt_emits_nothing() {
    let mut scene = make_scene(WindParams::default());
    let (before, _) = scene.letter_pose(0).unwrap();
    assert!(scene.step(0.0).is_empty());
    let (after, _) = scene.letter_pose(0).unwrap();
    assert_eq!(before, after);
}
