//! Per-screen surface state
//!
//! Cosmetic state owned by the render surface: the letter reveal clock, the
//! gallery selection, the video progress clock, and the acceptance flag.
//! None of this is flow state; the reducer never sees it.

use std::time::{Duration, Instant};

/// Letter screen: chat bubbles revealed one at a time on a tick stagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterState {
    pub entered_tick: u64,
}

impl LetterState {
    /// Animation ticks between bubbles (~0.7 s at the 120 ms tick).
    pub const REVEAL_INTERVAL: u64 = 6;

    /// Restart the reveal, counting from the given animation tick.
    pub fn enter(&mut self, tick: u64) {
        self.entered_tick = tick;
    }

    /// How many of `total` bubbles are visible at the given tick. The first
    /// shows immediately, one more every [`Self::REVEAL_INTERVAL`] ticks.
    pub fn revealed(&self, tick: u64, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let elapsed = tick.saturating_sub(self.entered_tick);
        ((elapsed / Self::REVEAL_INTERVAL) as usize + 1).min(total)
    }

    /// True once every bubble is on screen.
    pub fn fully_revealed(&self, tick: u64, total: usize) -> bool {
        self.revealed(tick, total) == total
    }
}

/// Gallery screen: which photo is focused.
#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryState {
    pub selected: usize,
}

/// Video playback phase as the surface sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoPhase {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Video screen progress clock. The audio thread owns actual playback; this
/// tracks elapsed wall time so the gauge can move without polling the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoState {
    pub phase: VideoPhase,
    elapsed: Duration,
    resumed_at: Option<Instant>,
    pub duration: Option<Duration>,
    pub missing: bool,
}

impl VideoState {
    /// Idle clock for a source that may be absent on disk.
    pub fn with_missing(missing: bool) -> Self {
        Self {
            missing,
            ..Self::default()
        }
    }

    /// Start playback from the beginning.
    pub fn start(&mut self, now: Instant) {
        self.phase = VideoPhase::Playing;
        self.elapsed = Duration::ZERO;
        self.resumed_at = Some(now);
    }

    pub fn pause(&mut self, now: Instant) {
        if self.phase != VideoPhase::Playing {
            return;
        }
        self.elapsed = self.position(now);
        self.resumed_at = None;
        self.phase = VideoPhase::Paused;
    }

    pub fn resume(&mut self, now: Instant) {
        if self.phase != VideoPhase::Paused {
            return;
        }
        self.resumed_at = Some(now);
        self.phase = VideoPhase::Playing;
    }

    /// Soundtrack ran out: clamp the clock to the known duration.
    pub fn finish(&mut self) {
        if let Some(duration) = self.duration {
            self.elapsed = duration;
        }
        self.resumed_at = None;
        self.phase = VideoPhase::Finished;
    }

    /// Leaving the screen.
    pub fn stop(&mut self) {
        self.phase = VideoPhase::Idle;
        self.elapsed = Duration::ZERO;
        self.resumed_at = None;
    }

    /// Elapsed playback time at `now`, clamped to the duration if known.
    pub fn position(&self, now: Instant) -> Duration {
        let running = self
            .resumed_at
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO);
        let position = self.elapsed + running;
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    /// Progress ratio in [0.0, 1.0]; zero while the duration is unknown.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(duration) = self.duration.filter(|d| !d.is_zero()) else {
            return 0.0;
        };
        (self.position(now).as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == VideoPhase::Playing
    }
}

/// Proposal screen: whether the happy answer has been given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalState {
    pub accepted: bool,
}

impl ProposalState {
    /// Idempotent: confirming again changes nothing.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

pub fn select_prev(index: &mut usize) {
    *index = index.saturating_sub(1);
}

pub fn select_next(index: &mut usize, len: usize) {
    if len == 0 {
        *index = 0;
        return;
    }
    if *index + 1 < len {
        *index += 1;
    }
}
