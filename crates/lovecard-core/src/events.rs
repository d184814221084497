use serde::{Deserialize, Serialize};

use crate::card::Input;
use crate::quiz::QuizResult;
use crate::timer::{Elapsed, Remaining};

/// Every state change in the card produces an Event.
/// The front end prints or logs them; the audio director reacts to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CountdownTicked {
        remaining: Remaining,
    },
    /// Terminal: the countdown has cancelled its tick.
    CountdownExpired {
        message: String,
    },
    AnniversaryTicked {
        elapsed: Elapsed,
    },
    EnvelopeOpened {
        panels: usize,
    },
    /// Deferred scale-to-fit and per-panel layout was applied.
    LayoutSettled {
        fit_scale: f64,
    },
    /// The top panel started its exit animation; the environment must
    /// report completion after `duration_ms`.
    PanelExitStarted {
        panel: String,
        step: usize,
        duration_ms: u64,
    },
    PanelAdvanced {
        top: String,
        step: usize,
        total: usize,
    },
    StackRestarted,
    ReasonSelected {
        index: usize,
        image: String,
    },
    CreditsStarted {
        generation: u64,
        lines: usize,
    },
    GalleryReset {
        active: Option<usize>,
    },
    /// An answer was locked in; the quiz advances after `advance_in_ms`.
    QuizAnswered {
        question: usize,
        key: String,
        is_match: bool,
        advance_in_ms: u64,
    },
    QuizAdvanced {
        question: usize,
    },
    QuizCompleted {
        result: QuizResult,
    },
    QuizReset,
    ValentineDeclined {
        count: u32,
        disabled: bool,
    },
    ValentineAccepted,
    ValentineReset,
    /// Background music was rejected; one retry is scheduled.
    MusicRetryScheduled {
        track: String,
        after_ms: u64,
    },
}

/// Work the environment must perform later on the single dispatch loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deferred {
    /// Deliver an input back to the card.
    Input { input: Input },
    /// Ask the audio director to retry background music.
    RetryMusic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub after_ms: u64,
    pub action: Deferred,
}

impl Event {
    /// The delayed action this event asks the environment to schedule, if any.
    pub fn follow_up(&self) -> Option<FollowUp> {
        match self {
            Event::PanelExitStarted { duration_ms, .. } => Some(FollowUp {
                after_ms: *duration_ms,
                action: Deferred::Input {
                    input: Input::ExitAnimationEnded,
                },
            }),
            Event::QuizAnswered {
                question,
                advance_in_ms,
                ..
            } => Some(FollowUp {
                after_ms: *advance_in_ms,
                action: Deferred::Input {
                    input: Input::QuizAdvance {
                        question: *question,
                    },
                },
            }),
            Event::MusicRetryScheduled { after_ms, .. } => Some(FollowUp {
                after_ms: *after_ms,
                action: Deferred::RetryMusic,
            }),
            _ => None,
        }
    }
}
