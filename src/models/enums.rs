//! Enums used throughout the keepsake TUI
//!
//! This module contains the small enum types used for state management
//! and UI rendering.

/// Ordinal position in the fixed five-screen sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Locked,   // Lock screen with the notification
    Letter,   // Chat-style letter
    Gallery,  // Photo grid
    Video,    // Video with soundtrack
    Proposal, // The question
}

impl Step {
    /// Integer rank, 0 through 4
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// All five screens in order
    pub const ALL: [Step; 5] = [
        Step::Locked,
        Step::Letter,
        Step::Gallery,
        Step::Video,
        Step::Proposal,
    ];

    /// One screen back, stopping at the lock screen
    pub fn back(self) -> Self {
        match self {
            Step::Locked | Step::Letter => Step::Locked,
            Step::Gallery => Step::Letter,
            Step::Video => Step::Gallery,
            Step::Proposal => Step::Video,
        }
    }

    /// The screen the advance affordance leads to, if there is one
    pub fn next(self) -> Option<Self> {
        match self {
            Step::Locked => Some(Step::Letter),
            Step::Letter => Some(Step::Gallery),
            Step::Gallery => Some(Step::Video),
            Step::Video => Some(Step::Proposal),
            Step::Proposal => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Locked => "Lock",
            Step::Letter => "Letter",
            Step::Gallery => "Memories",
            Step::Video => "Video",
            Step::Proposal => "Proposal",
        }
    }
}

/// Which of the two tracks an audio event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Music, // Looping background track
    Video, // One-shot video soundtrack
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Music => "music",
            MediaKind::Video => "video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ranks_are_sequential() {
        for (expected, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.rank() as usize, expected);
        }
    }

    #[test]
    fn test_step_default_is_locked() {
        assert_eq!(Step::default(), Step::Locked);
        assert_eq!(Step::default().rank(), 0);
    }

    #[test]
    fn test_step_back_floors_at_locked() {
        assert_eq!(Step::Locked.back(), Step::Locked);
        assert_eq!(Step::Letter.back(), Step::Locked);
        assert_eq!(Step::Proposal.back(), Step::Video);
    }

    #[test]
    fn test_step_back_decrements_rank() {
        for step in Step::ALL.iter().skip(1) {
            assert_eq!(step.back().rank(), step.rank() - 1);
        }
    }

    #[test]
    fn test_step_next_chain_ends_at_proposal() {
        assert_eq!(Step::Locked.next(), Some(Step::Letter));
        assert_eq!(Step::Video.next(), Some(Step::Proposal));
        assert_eq!(Step::Proposal.next(), None);
    }

    #[test]
    fn test_media_kind_label() {
        assert_eq!(MediaKind::Music.label(), "music");
        assert_eq!(MediaKind::Video.label(), "video");
    }
}
