//! The hanging-letters scene: rig construction, per-frame stepping, wind,
//! grab interaction and chime event emission.

use glam::{Quat, Vec3};
use rand::prelude::*;

use crate::chime::{chime_voice, ChimeGate, ChimeVoice};
use crate::config::{validate_letters, LetterConfig, SceneError, WindParams};
use crate::constants::{
    CHIME_DETUNE_CENTS, CHIME_MAX_VELOCITY, CHIME_MIN_VELOCITY, GRAB_STIFFNESS, GRAVITY,
    LETTER_RADIUS, LETTER_START_Y, POINTER_PARK, POINTER_RADIUS, POINTER_SNAP_DIST, ROPE_LENGTH,
    SLOT_PHASE_STEP,
};
use crate::physics::{PhysicsWorld, RigidBody};

/// Ambient sway force for one letter at time `t` (seconds). Horizontal
/// component on x, a weaker out-of-phase component on z; the slot phase
/// keeps neighbouring letters from swinging in lockstep.
#[inline]
pub fn wind_force(t: f32, slot: usize, wind: &WindParams) -> Vec3 {
    let phase = slot as f32 * SLOT_PHASE_STEP;
    let x = (t * wind.speed + phase).sin() * wind.strength;
    let z = (t * wind.speed * 1.5 + phase * 0.5).sin() * wind.strength * 0.3;
    Vec3::new(x, 0.0, z)
}

/// A chime to play: which letter struck, at what frequency and strength.
#[derive(Clone, Copy, Debug)]
pub struct ChimeEvent {
    pub letter: usize,
    pub voice: ChimeVoice,
}

/// Which letter, if any, the pointer holds, and where the pointer is in
/// world space. Owned by the scene; there is no ambient grab global, and the
/// `Option` makes "at most one grabbed letter" structural.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrabState {
    held: Option<(usize, Vec3)>,
    pub pointer_world: Option<Vec3>,
}

impl GrabState {
    pub fn held_letter(&self) -> Option<usize> {
        self.held.map(|(i, _)| i)
    }
}

pub struct LetterScene {
    pub world: PhysicsWorld,
    pub configs: Vec<LetterConfig>,
    pub wind: WindParams,
    pub grab: GrabState,
    letter_bodies: Vec<usize>,
    pointer_body: usize,
    gate: ChimeGate,
    active_contacts: fnv::FnvHashSet<(usize, usize)>,
    detune_rng: StdRng,
    clock: f64,
}

impl LetterScene {
    pub fn new(configs: Vec<LetterConfig>, wind: WindParams, seed: u64) -> Result<Self, SceneError> {
        validate_letters(&configs, ROPE_LENGTH)?;

        let mut world = PhysicsWorld::new(Vec3::from(GRAVITY));
        let mut letter_bodies = Vec::with_capacity(configs.len());
        for cfg in &configs {
            let x = cfg.slot_x();
            let mut body = RigidBody::dynamic(
                Vec3::new(x, LETTER_START_Y, 0.0),
                cfg.mass,
                LETTER_RADIUS,
            );
            body.linear_damping = cfg.linear_damping;
            body.angular_damping = cfg.angular_damping;
            let letter = world.add_body(body);
            // one anchor and one rope per attachment point
            for offset in &cfg.attachments {
                let anchor = world.add_body(RigidBody::fixed(Vec3::new(
                    x + offset.x,
                    ROPE_LENGTH,
                    0.0,
                )));
                world.attach_rope(anchor, letter, *offset, ROPE_LENGTH);
            }
            letter_bodies.push(letter);
        }
        let pointer_body =
            world.add_body(RigidBody::kinematic(Vec3::from(POINTER_PARK), POINTER_RADIUS));

        let gate = ChimeGate::new(configs.len());
        log::info!(
            "[scene] letters={} ropes={} bodies={}",
            configs.len(),
            world.ropes.len(),
            world.bodies.len()
        );
        Ok(Self {
            world,
            configs,
            wind,
            grab: GrabState::default(),
            letter_bodies,
            pointer_body,
            gate,
            active_contacts: fnv::FnvHashSet::default(),
            detune_rng: StdRng::seed_from_u64(seed),
            clock: 0.0,
        })
    }

    pub fn letter_count(&self) -> usize {
        self.configs.len()
    }

    /// World position and orientation of a letter, if it exists.
    pub fn letter_pose(&self, letter: usize) -> Option<(Vec3, Quat)> {
        let body = self.world.body(*self.letter_bodies.get(letter)?)?;
        Some((body.position, body.orientation))
    }

    /// Two-point lines to draw this frame, one per rope: anchor to the
    /// letter's attachment point, the offset rotated by the letter's current
    /// orientation.
    pub fn rope_segments(&self) -> Vec<(Vec3, Vec3)> {
        self.world
            .ropes
            .iter()
            .filter_map(|r| self.world.rope_endpoints(r))
            .collect()
    }

    /// Begin holding `letter`, recording the pointer-to-letter offset so the
    /// letter follows without snapping to the cursor.
    pub fn begin_grab(&mut self, letter: usize, pointer_world: Vec3) {
        let Some((pos, _)) = self.letter_pose(letter) else {
            return;
        };
        self.grab.held = Some((letter, pos - pointer_world));
        self.grab.pointer_world = Some(pointer_world);
        log::info!("[grab] begin on letter {}", letter);
    }

    pub fn set_pointer_world(&mut self, pointer_world: Vec3) {
        self.grab.pointer_world = Some(pointer_world);
    }

    /// Release whatever is held; the letter keeps its current velocity.
    pub fn end_grab(&mut self) {
        if self.grab.held.take().is_some() {
            log::info!("[grab] released");
        }
    }

    /// Advance the simulation by `dt` seconds and return the chimes to play.
    pub fn step(&mut self, dt: f32) -> Vec<ChimeEvent> {
        if dt <= 0.0 {
            return Vec::new();
        }
        self.clock += dt as f64;
        let t = self.clock as f32;

        // wind on every letter not currently held, as a mass-scaled impulse
        let held = self.grab.held_letter();
        for (i, cfg) in self.configs.iter().enumerate() {
            if held == Some(i) {
                continue;
            }
            let impulse = wind_force(t, cfg.slot, &self.wind) * cfg.mass * dt;
            if let Some(body) = self.world.body_mut(self.letter_bodies[i]) {
                body.apply_impulse(impulse);
            }
        }

        // spring-follow toward the pointer while held
        if let (Some((letter, offset)), Some(pointer)) = (self.grab.held, self.grab.pointer_world) {
            if let Some(body) = self
                .letter_bodies
                .get(letter)
                .and_then(|&b| self.world.body_mut(b))
            {
                let target = pointer + offset;
                body.set_linear_velocity((target - body.position) * GRAB_STIFFNESS);
            }
        }

        // the pointer sensor glides to the pointer's world point; while a
        // letter is held the sensor parks so it cannot shove the held letter
        // off its own spring target
        {
            let target = match (self.grab.held, self.grab.pointer_world) {
                (None, Some(p)) => p,
                _ => Vec3::from(POINTER_PARK),
            };
            if let Some(sensor) = self.world.body_mut(self.pointer_body) {
                if sensor.position.distance(target) > POINTER_SNAP_DIST {
                    // entering or leaving park: teleport instead of sweeping
                    // through the scene at absurd speed
                    sensor.position = target;
                    sensor.set_linear_velocity(Vec3::ZERO);
                } else {
                    sensor.set_linear_velocity((target - sensor.position) / dt);
                }
            }
        }

        let contacts = self.world.step(dt);

        // chime on contact begin only, never for the pointer sensor
        let mut events = Vec::new();
        let mut current = fnv::FnvHashSet::default();
        for c in &contacts {
            current.insert((c.a, c.b));
            if self.active_contacts.contains(&(c.a, c.b)) {
                continue;
            }
            for (letter_body, other) in [(c.a, c.b), (c.b, c.a)] {
                if other == self.pointer_body {
                    continue;
                }
                let Some(letter) = self.letter_bodies.iter().position(|&b| b == letter_body)
                else {
                    continue;
                };
                if !self.gate.try_fire(letter, self.clock) {
                    continue;
                }
                let velocity = (c.speed * 0.25).clamp(CHIME_MIN_VELOCITY, CHIME_MAX_VELOCITY);
                let detune = self.detune_rng.gen_range(-CHIME_DETUNE_CENTS..=CHIME_DETUNE_CENTS);
                events.push(ChimeEvent {
                    letter,
                    voice: chime_voice(self.configs[letter].chime_hz, velocity, detune),
                });
            }
        }
        self.active_contacts = current;
        events
    }
}
