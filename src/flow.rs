//! Screen-flow state machine.
//!
//! The session is a linear five-screen sequence driven by a single reducer:
//! user gestures arrive as [`Intent`] values and are folded into
//! [`FlowState`], with the playback side effect of a transition returned as
//! [`PlayerCmd`] data for the caller to forward to the audio thread. The
//! reducer itself performs no I/O and never fails.

use crate::models::Step;

/// A user gesture, expressed as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Leave the lock screen; also starts the music.
    Unlock,
    /// One screen back, stopping at the lock screen.
    GoBack,
    /// Jump to a specific screen.
    AdvanceTo(Step),
    /// Pause or resume the background music.
    ToggleMusic,
    /// Accept, on the proposal screen.
    Confirm,
    /// The other button on the proposal screen. Does nothing, on purpose.
    Decline,
}

/// Playback side effect of a transition, consumed by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCmd {
    /// Play (or resume) the music from its current position.
    Play { volume: f32 },
    /// Pause the music, keeping its position.
    Pause,
}

/// The two fields the flow owns: where we are and whether music plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowState {
    pub step: Step,
    pub playing: bool,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            step: Step::Locked,
            playing: false,
        }
    }
}

/// Fold one intent into the flow state.
///
/// Total over all inputs. At most one player command results per intent;
/// `Unlock` is the only transition that couples a step change with a
/// playback change, and the only thing that ever starts the music.
///
/// `Confirm` and `Decline` are proposal-screen actions that change neither
/// field. `Confirm` feedback is a render concern; `Decline` has none at all.
pub fn apply(state: FlowState, intent: Intent, volume: f32) -> (FlowState, Option<PlayerCmd>) {
    match intent {
        Intent::Unlock => (
            FlowState {
                step: Step::Letter,
                playing: true,
            },
            Some(PlayerCmd::Play { volume }),
        ),
        Intent::GoBack => (
            FlowState {
                step: state.step.back(),
                ..state
            },
            None,
        ),
        Intent::AdvanceTo(target) => (
            FlowState {
                step: target,
                ..state
            },
            None,
        ),
        Intent::ToggleMusic => {
            let playing = !state.playing;
            let cmd = if playing {
                PlayerCmd::Play { volume }
            } else {
                PlayerCmd::Pause
            };
            (FlowState { playing, ..state }, Some(cmd))
        }
        Intent::Confirm | Intent::Decline => (state, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLUME: f32 = 0.5;

    fn at(step: Step, playing: bool) -> FlowState {
        FlowState { step, playing }
    }

    /// Run a sequence of intents, discarding commands.
    fn walk(mut state: FlowState, intents: &[Intent]) -> FlowState {
        for intent in intents {
            state = apply(state, *intent, VOLUME).0;
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = FlowState::default();
        assert_eq!(state.step, Step::Locked);
        assert!(!state.playing);
    }

    #[test]
    fn test_go_back_decrements_with_floor() {
        for step in Step::ALL {
            let (next, cmd) = apply(at(step, true), Intent::GoBack, VOLUME);
            assert_eq!(next.step.rank(), step.rank().saturating_sub(1));
            assert_eq!(cmd, None);
        }
    }

    #[test]
    fn test_go_back_repeated_reaches_locked_and_stays() {
        for step in Step::ALL {
            let mut state = at(step, true);
            for _ in 0..10 {
                state = apply(state, Intent::GoBack, VOLUME).0;
            }
            assert_eq!(state.step, Step::Locked);
            // Playback flag untouched the whole way down
            assert!(state.playing);
        }
    }

    #[test]
    fn test_go_back_at_locked_is_noop() {
        let (state, cmd) = apply(FlowState::default(), Intent::GoBack, VOLUME);
        assert_eq!(state, FlowState::default());
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_unlock_from_initial_state() {
        let (state, cmd) = apply(FlowState::default(), Intent::Unlock, VOLUME);
        assert_eq!(state.step, Step::Letter);
        assert!(state.playing);
        assert_eq!(cmd, Some(PlayerCmd::Play { volume: VOLUME }));
    }

    #[test]
    fn test_unlock_forces_playing_regardless_of_prior_flag() {
        for prior in [false, true] {
            let (state, cmd) = apply(at(Step::Locked, prior), Intent::Unlock, VOLUME);
            assert_eq!(state.step, Step::Letter);
            assert!(state.playing);
            assert!(matches!(cmd, Some(PlayerCmd::Play { .. })));
        }
    }

    #[test]
    fn test_unlock_carries_configured_volume() {
        let (_, cmd) = apply(FlowState::default(), Intent::Unlock, 0.8);
        assert_eq!(cmd, Some(PlayerCmd::Play { volume: 0.8 }));
    }

    #[test]
    fn test_toggle_music_is_involution() {
        for step in Step::ALL {
            for playing in [false, true] {
                let start = at(step, playing);
                let once = apply(start, Intent::ToggleMusic, VOLUME).0;
                assert_eq!(once.playing, !playing);
                assert_eq!(once.step, start.step);
                let twice = apply(once, Intent::ToggleMusic, VOLUME).0;
                assert_eq!(twice, start);
            }
        }
    }

    #[test]
    fn test_toggle_music_emits_matching_command() {
        let (_, cmd) = apply(at(Step::Letter, false), Intent::ToggleMusic, VOLUME);
        assert_eq!(cmd, Some(PlayerCmd::Play { volume: VOLUME }));
        let (_, cmd) = apply(at(Step::Letter, true), Intent::ToggleMusic, VOLUME);
        assert_eq!(cmd, Some(PlayerCmd::Pause));
    }

    #[test]
    fn test_advance_to_sets_step_exactly() {
        for from in Step::ALL {
            for target in Step::ALL {
                let (state, cmd) = apply(at(from, true), Intent::AdvanceTo(target), VOLUME);
                assert_eq!(state.step, target);
                assert!(state.playing);
                assert_eq!(cmd, None);
            }
        }
    }

    #[test]
    fn test_full_session_walkthrough() {
        let mut state = FlowState::default();
        assert_eq!((state.step, state.playing), (Step::Locked, false));

        state = apply(state, Intent::Unlock, VOLUME).0;
        assert_eq!((state.step, state.playing), (Step::Letter, true));

        state = apply(state, Intent::AdvanceTo(Step::Gallery), VOLUME).0;
        assert_eq!((state.step, state.playing), (Step::Gallery, true));

        state = apply(state, Intent::GoBack, VOLUME).0;
        assert_eq!(state.step, Step::Letter);

        state = walk(
            state,
            &[
                Intent::AdvanceTo(Step::Video),
                Intent::AdvanceTo(Step::Proposal),
            ],
        );
        assert_eq!(state.step, Step::Proposal);

        state = apply(state, Intent::ToggleMusic, VOLUME).0;
        assert!(!state.playing);
        state = apply(state, Intent::ToggleMusic, VOLUME).0;
        assert!(state.playing);
    }

    #[test]
    fn test_confirm_changes_nothing() {
        let start = at(Step::Proposal, true);
        let (state, cmd) = apply(start, Intent::Confirm, VOLUME);
        assert_eq!(state, start);
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_decline_is_a_true_noop() {
        for playing in [false, true] {
            let start = at(Step::Proposal, playing);
            let (state, cmd) = apply(start, Intent::Decline, VOLUME);
            assert_eq!(state, start);
            assert_eq!(cmd, None);
        }
    }

    #[test]
    fn test_reunlock_after_backing_out() {
        // Unlock, back out to the lock screen, unlock again: the second
        // unlock resumes the same way the first one started.
        let mut state = FlowState::default();
        state = apply(state, Intent::Unlock, VOLUME).0;
        state = apply(state, Intent::GoBack, VOLUME).0;
        assert_eq!(state.step, Step::Locked);
        assert!(state.playing);

        let (state, cmd) = apply(state, Intent::Unlock, VOLUME);
        assert_eq!((state.step, state.playing), (Step::Letter, true));
        assert_eq!(cmd, Some(PlayerCmd::Play { volume: VOLUME }));
    }
}
