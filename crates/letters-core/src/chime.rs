//! Chime voice description and collision debouncing.
//!
//! A strike is one sine fundamental plus two quieter inharmonic partials at
//! the free-bar modal ratios (~2.76x and ~5.40x), each with its own
//! exponential decay. The web side turns a `ChimeVoice` into oscillator and
//! gain-envelope scheduling; nothing here touches an audio API.

use crate::constants::CHIME_COOLDOWN_SEC;

/// Free-bar modal ratios; the source of the metallic timbre.
pub const PARTIAL_RATIOS: [f32; 3] = [1.0, 2.756, 5.404];
pub const PARTIAL_GAINS: [f32; 3] = [1.0, 0.38, 0.16];
/// Longest decay on the fundamental, progressively shorter up the series.
pub const PARTIAL_DECAYS_SEC: [f32; 3] = [1.6, 0.8, 0.45];

#[derive(Clone, Copy, Debug)]
pub struct ChimePartial {
    pub frequency_hz: f32,
    pub gain: f32,
    pub decay_sec: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ChimeVoice {
    pub partials: [ChimePartial; 3],
    /// Strike strength in [0, 1], scales every partial's peak gain.
    pub velocity: f32,
}

/// Build a strike at `fundamental_hz`, detuned by `detune_cents`.
pub fn chime_voice(fundamental_hz: f32, velocity: f32, detune_cents: f32) -> ChimeVoice {
    let detune = 2.0_f32.powf(detune_cents / 1200.0);
    let partial = |i: usize| ChimePartial {
        frequency_hz: fundamental_hz * PARTIAL_RATIOS[i] * detune,
        gain: PARTIAL_GAINS[i],
        decay_sec: PARTIAL_DECAYS_SEC[i],
    };
    ChimeVoice {
        partials: [partial(0), partial(1), partial(2)],
        velocity: velocity.clamp(0.0, 1.0),
    }
}

/// Per-letter debounce: a letter may chime at most once per cooldown window.
/// Collisions landing inside the window are dropped, not queued.
#[derive(Clone, Debug)]
pub struct ChimeGate {
    last_fired: Vec<Option<f64>>,
    cooldown_sec: f64,
}

impl ChimeGate {
    pub fn new(letter_count: usize) -> Self {
        Self {
            last_fired: vec![None; letter_count],
            cooldown_sec: CHIME_COOLDOWN_SEC,
        }
    }

    pub fn with_cooldown(letter_count: usize, cooldown_sec: f64) -> Self {
        Self {
            last_fired: vec![None; letter_count],
            cooldown_sec,
        }
    }

    /// True (and the timestamp advances) if the letter may chime at `now`.
    pub fn try_fire(&mut self, letter: usize, now: f64) -> bool {
        let Some(slot) = self.last_fired.get_mut(letter) else {
            return false;
        };
        match *slot {
            Some(last) if now - last < self.cooldown_sec => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}
