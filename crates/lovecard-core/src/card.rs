//! The whole card: every component plus the couplings between them.
//!
//! Components only meet here. Reaching the reasons step resets the gallery,
//! the restart affordance depends on the valentine being accepted, and
//! `restart` resets every component in one call.
//!
//! ## Usage
//!
//! ```ignore
//! let mut card = Card::from_config(&config, now);
//! for event in card.handle(Input::OpenEnvelope, now) {
//!     if let Some(follow) = event.follow_up() {
//!         // schedule follow.action after follow.after_ms
//!     }
//! }
//! card.render(&mut surface);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::content::GALLERY_RESET_STEP;
use crate::events::Event;
use crate::gallery::LoveGallery;
use crate::quiz::Quiz;
use crate::reveal::{RevealSequencer, Viewport};
use crate::storage::Config;
use crate::surface::DisplaySurface;
use crate::timer::{instant_or_now, AnniversaryEngine, CountdownEngine};
use crate::valentine::ValentineEscalation;

/// Lines the credits reel moves per tick.
pub const CREDITS_LINES_PER_TICK: usize = 1;

/// Everything the environment can deliver to the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// The 1-second repeating timer.
    Tick,
    /// Next animation frame.
    Frame,
    Resize { width: f64, height: f64 },
    OpenEnvelope,
    Continue,
    ExitAnimationEnded,
    Restart,
    SelectReason { index: usize },
    ShowCredits,
    Answer { question: usize, option: usize },
    QuizAdvance { question: usize },
    Decline,
    Accept,
}

/// Keys that can activate the focused envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Input {
    /// Enter and Space activate the envelope like a click.
    pub fn from_key(key: Key) -> Option<Input> {
        match key {
            Key::Enter | Key::Space => Some(Input::OpenEnvelope),
            Key::Other => None,
        }
    }
}

/// Derived visibility of the card-level controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub continue_visible: bool,
    pub restart_visible: bool,
}

#[derive(Debug, Clone)]
pub struct Card {
    countdown: CountdownEngine,
    anniversary: AnniversaryEngine,
    reveal: RevealSequencer,
    gallery: LoveGallery,
    quiz: Quiz,
    valentine: ValentineEscalation,
}

impl Card {
    pub fn new(
        countdown: CountdownEngine,
        anniversary: AnniversaryEngine,
        reveal: RevealSequencer,
        gallery: LoveGallery,
        quiz: Quiz,
        valentine: ValentineEscalation,
    ) -> Self {
        Self {
            countdown,
            anniversary,
            reveal,
            gallery,
            quiz,
            valentine,
        }
    }

    /// Build the card. Malformed instants fall back to `now`.
    pub fn from_config(config: &Config, now: NaiveDateTime) -> Self {
        let target = instant_or_now(Some(&config.countdown.target), now);
        Self::new(
            CountdownEngine::new(target, config.countdown.expired_message.clone()),
            AnniversaryEngine::from_config(config.anniversary.start.as_deref(), now),
            RevealSequencer::new(config.reveal.panels.clone(), config.reveal.exit_animation_ms),
            LoveGallery::new(
                config.gallery.reasons.clone(),
                config.gallery.affirmations.clone(),
                config.gallery.caption.clone(),
            ),
            Quiz::new(config.quiz.questions.clone()),
            ValentineEscalation::new(
                config.valentine.initial_prompt.clone(),
                config.valentine.phrases.clone(),
                config.valentine.frames.clone(),
                config.valentine.accepted_message.clone(),
            ),
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn anniversary(&self) -> &AnniversaryEngine {
        &self.anniversary
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    pub fn gallery(&self) -> &LoveGallery {
        &self.gallery
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn valentine(&self) -> &ValentineEscalation {
        &self.valentine
    }

    pub fn controls(&self) -> Controls {
        Controls {
            continue_visible: self.reveal.continue_visible(),
            restart_visible: self.reveal.restart_visible(self.valentine.is_accepted()),
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Apply one input. Returns every event it produced, in order.
    pub fn handle(&mut self, input: Input, now: NaiveDateTime) -> Vec<Event> {
        tracing::trace!(?input, "card input");
        let mut events = Vec::new();
        match input {
            Input::Tick => {
                events.extend(self.countdown.tick_at(now));
                events.extend(self.anniversary.tick_at(now));
                self.gallery.scroll(CREDITS_LINES_PER_TICK);
            }
            Input::Frame => events.extend(self.reveal.settle()),
            Input::Resize { width, height } => {
                events.extend(self.reveal.resize(Viewport { width, height }));
            }
            Input::OpenEnvelope => events.extend(self.reveal.open()),
            Input::Continue => events.extend(self.reveal.begin_advance()),
            Input::ExitAnimationEnded => {
                if let Some(event) = self.reveal.complete_advance() {
                    events.push(event);
                    if self.reveal.step() == GALLERY_RESET_STEP {
                        events.extend(self.gallery.reset());
                    }
                }
            }
            Input::Restart => {
                if self.controls().restart_visible {
                    events.extend(self.restart());
                } else {
                    tracing::trace!("restart ignored while hidden");
                }
            }
            Input::SelectReason { index } => events.extend(self.gallery.select(index)),
            Input::ShowCredits => events.extend(self.gallery.enter_credits()),
            Input::Answer { question, option } => events.extend(self.quiz.answer(question, option)),
            Input::QuizAdvance { question } => events.extend(self.quiz.advance_from(question)),
            Input::Decline => events.extend(self.valentine.decline()),
            Input::Accept => events.extend(self.valentine.accept()),
        }
        events
    }

    /// Reset every component except the clocks. [`Input::Restart`] only
    /// reaches this while the restart control is shown.
    pub fn restart(&mut self) -> Vec<Event> {
        [
            self.reveal.restart(),
            self.quiz.reset(),
            self.gallery.reset(),
            self.valentine.reset(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        self.countdown.render(surface);
        self.anniversary.render(surface);
        self.reveal.render(surface, self.valentine.is_accepted());
        self.gallery.render(surface);
        self.quiz.render(surface);
        self.valentine.render(surface);
    }
}
