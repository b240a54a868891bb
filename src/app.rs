//! Application state and core logic for the keepsake TUI.
//!
//! This module contains the `App` struct which holds all state for the
//! interactive terminal UI, maps key presses to flow intents, and applies
//! the screen entry and exit effects that the pure flow reducer leaves to
//! the surface.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::{Player, PlayerEvent};
use crate::flow::{self, FlowState, Intent, PlayerCmd};
use crate::models::{
    select_next, select_prev, GalleryState, LetterState, MediaKind, MediaManifest, ProposalState,
    ResolvedMedia, Step, VideoPhase, VideoState,
};
use crate::ui::Photo;

/// How long the volume readout stays in the status bar.
const VOLUME_FLASH: Duration = Duration::from_secs(2);
/// Volume change per keypress.
const VOLUME_STEP: f32 = 0.1;

/// Everything the main loop can wake up on.
#[derive(Debug)]
pub enum Action {
    Key(KeyEvent),
    Player(PlayerEvent),
}

/// Application state
pub struct App {
    pub flow: FlowState,
    pub manifest: MediaManifest,
    pub resolved: ResolvedMedia,
    pub photos: Vec<Option<Photo>>,
    pub player: Player,
    pub volume: f32,
    // Per-screen surface state
    pub letter: LetterState,
    pub gallery: GalleryState,
    pub video: VideoState,
    pub proposal: ProposalState,
    // Media health
    pub music_failed: bool,
    // Transient volume readout
    pub volume_flash: Option<Instant>,
    pub should_quit: bool,
    // Animation state
    pub animation_tick: u64,
    pub last_animation_update: Instant,
    pub session_start: Instant,
}

impl App {
    pub fn new(
        manifest: MediaManifest,
        resolved: ResolvedMedia,
        photos: Vec<Option<Photo>>,
        player: Player,
        volume: f32,
    ) -> Self {
        let now = Instant::now();
        let video = VideoState::with_missing(!resolved.video.exists());

        Self {
            flow: FlowState::default(),
            manifest,
            resolved,
            photos,
            player,
            volume,
            letter: LetterState::default(),
            gallery: GalleryState::default(),
            video,
            proposal: ProposalState::default(),
            music_failed: false,
            volume_flash: None,
            should_quit: false,
            animation_tick: 0,
            last_animation_update: now,
            session_start: now,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Player(event) => self.on_player_event(event),
        }
    }

    /// Map a key press to a flow intent or a surface-only adjustment.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Session-level keys first
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('m') if self.flow.step > Step::Locked => {
                self.dispatch(Intent::ToggleMusic);
                return;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_volume(VOLUME_STEP);
                return;
            }
            KeyCode::Char('-') => {
                self.adjust_volume(-VOLUME_STEP);
                return;
            }
            KeyCode::Esc if self.flow.step > Step::Locked => {
                self.dispatch(Intent::GoBack);
                return;
            }
            _ => {}
        }

        match self.flow.step {
            Step::Locked => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.dispatch(Intent::Unlock);
                }
            }
            Step::Letter => {
                if key.code == KeyCode::Enter {
                    self.advance();
                }
            }
            Step::Gallery => match key.code {
                KeyCode::Left | KeyCode::Char('h') => select_prev(&mut self.gallery.selected),
                KeyCode::Right | KeyCode::Char('l') => {
                    select_next(&mut self.gallery.selected, self.manifest.photo_count());
                }
                KeyCode::Enter => self.advance(),
                _ => {}
            },
            Step::Video => match key.code {
                KeyCode::Char(' ') => self.toggle_video(),
                KeyCode::Enter => self.advance(),
                _ => {}
            },
            Step::Proposal => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => self.dispatch(Intent::Confirm),
                KeyCode::Char('n') => self.dispatch(Intent::Decline),
                _ => {}
            },
        }
    }

    /// Advance to the next sequential screen, if there is one.
    fn advance(&mut self) {
        if let Some(next) = self.flow.step.next() {
            self.dispatch(Intent::AdvanceTo(next));
        }
    }

    /// Fold one intent into the flow, forward its player command, and run
    /// the screen entry and exit effects for any step change.
    fn dispatch(&mut self, intent: Intent) {
        let before = self.flow;
        let (after, cmd) = flow::apply(before, intent, self.volume);
        self.flow = after;

        match cmd {
            Some(PlayerCmd::Play { volume }) => self.player.play_music(volume),
            Some(PlayerCmd::Pause) => self.player.pause_music(),
            None => {}
        }

        if before.step != after.step {
            self.on_step_change(before.step, after.step);
        }

        if intent == Intent::Confirm && self.flow.step == Step::Proposal {
            self.proposal.accept();
        }
    }

    /// Screen entry and exit effects. The reducer owns the step itself;
    /// the surface owns what entering or leaving a screen starts and stops.
    fn on_step_change(&mut self, from: Step, to: Step) {
        tracing::debug!("screen {} -> {}", from.label(), to.label());
        if from == Step::Video {
            self.video.stop();
            self.player.stop_video();
        }
        match to {
            Step::Letter if from == Step::Locked => self.letter.enter(self.animation_tick),
            Step::Video => self.start_video(),
            _ => {}
        }
    }

    fn start_video(&mut self) {
        if self.video.missing {
            return;
        }
        self.video.start(Instant::now());
        self.player.play_video();
    }

    fn toggle_video(&mut self) {
        if self.video.missing {
            return;
        }
        let now = Instant::now();
        match self.video.phase {
            VideoPhase::Idle | VideoPhase::Finished => {
                self.video.start(now);
                self.player.play_video();
            }
            VideoPhase::Playing => {
                self.video.pause(now);
                self.player.pause_video();
            }
            VideoPhase::Paused => {
                self.video.resume(now);
                self.player.resume_video();
            }
        }
    }

    fn adjust_volume(&mut self, delta: f32) {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        self.player.set_volume(self.volume);
        self.volume_flash = Some(Instant::now());
    }

    /// Advance animations and expire transient chrome.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_animation_update) >= Duration::from_millis(100) {
            self.animation_tick = self.animation_tick.wrapping_add(1);
            self.last_animation_update = now;
        }

        if let Some(flashed) = self.volume_flash
            && now.duration_since(flashed) >= VOLUME_FLASH
        {
            self.volume_flash = None;
        }

        // Clock-based fallback for when the sink-drain event never arrives.
        if self.video.is_playing()
            && let Some(total) = self.video.duration
            && self.video.position(now) >= total
        {
            self.video.finish();
        }
    }

    pub fn on_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Started {
                kind: MediaKind::Video,
                duration,
            } => {
                if let Some(total) = duration {
                    self.video.duration = Some(total);
                }
            }
            PlayerEvent::Started {
                kind: MediaKind::Music,
                ..
            } => {
                self.music_failed = false;
            }
            PlayerEvent::Finished {
                kind: MediaKind::Video,
            } => self.video.finish(),
            PlayerEvent::Finished { .. } => {}
            PlayerEvent::Failed { kind, reason } => {
                tracing::warn!("{} playback failed: {}", kind.label(), reason);
                match kind {
                    MediaKind::Music => self.music_failed = true,
                    MediaKind::Video => {
                        self.video.stop();
                        self.video.missing = true;
                    }
                }
            }
        }
    }
}
