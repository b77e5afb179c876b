//! WebAudio chime playback.
//!
//! One `AudioOutput` is owned by the scene mount and shared with the input
//! wiring. The underlying `AudioContext` is created lazily on the first call
//! that needs it, so creation can happen inside a user gesture and satisfy
//! autoplay policies; failures are silent and retried on the next call.

use letters_core::{ChimeVoice, CHIME_MASTER_GAIN};
use web_sys as web;

pub struct AudioOutput {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
}

impl AudioOutput {
    pub fn new() -> Self {
        Self {
            ctx: None,
            master: None,
        }
    }

    /// Create the context and master bus if missing, then resume. Safe to
    /// call from a click handler to unlock audio.
    pub fn ensure_started(&mut self) {
        if self.ctx.is_none() {
            let Ok(ctx) = web::AudioContext::new() else {
                return;
            };
            let Ok(master) = web::GainNode::new(&ctx) else {
                return;
            };
            master.gain().set_value(CHIME_MASTER_GAIN);
            let _ = master.connect_with_audio_node(&ctx.destination());
            log::info!("[audio] context created");
            self.ctx = Some(ctx);
            self.master = Some(master);
        }
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Explicit teardown for scene unmount.
    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
        self.master = None;
    }

    /// Fire-and-forget strike: one oscillator plus gain envelope per partial,
    /// each stopping itself after its decay.
    pub fn play_chime(&mut self, voice: &ChimeVoice) {
        self.ensure_started();
        let (Some(ctx), Some(master)) = (self.ctx.as_ref(), self.master.as_ref()) else {
            return;
        };
        let t0 = ctx.current_time() + 0.005;
        for partial in &voice.partials {
            let Ok(src) = web::OscillatorNode::new(ctx) else {
                continue;
            };
            src.set_type(web::OscillatorType::Sine);
            src.frequency().set_value(partial.frequency_hz);
            let Ok(gain) = web::GainNode::new(ctx) else {
                continue;
            };
            let peak = (voice.velocity * partial.gain).max(1e-4);
            let decay_end = t0 + partial.decay_sec as f64;
            gain.gain().set_value(0.0);
            let _ = gain.gain().set_value_at_time(0.0, t0);
            let _ = gain.gain().linear_ramp_to_value_at_time(peak, t0 + 0.008);
            // exponential ramps cannot reach zero; land near silence and stop
            let _ = gain
                .gain()
                .exponential_ramp_to_value_at_time(1e-4, decay_end);
            let _ = src.connect_with_audio_node(&gain);
            let _ = gain.connect_with_audio_node(master);
            let _ = src.start_with_when(t0);
            let _ = src.stop_with_when(decay_end + 0.05);
        }
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.close();
    }
}
