//! "Will you be my valentine?" escalation.
//!
//! Declining cycles through increasingly exasperated prompts and
//! illustration frames while the accept button grows and the decline button
//! shrinks. The third decline breaks the decline button for good (until a
//! restart). Accepting is one-way.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::surface::{
    write_attr, write_flag, write_text, write_visible, Attr, DisplaySurface, Target,
};

/// Declines after which the decline button is disabled.
pub const DECLINE_LIMIT: u32 = 3;
pub const SCALE_STEP: f64 = 0.08;
pub const ACCEPT_GROWTH_CAP: f64 = 0.28;
pub const DECLINE_SCALE_FLOOR: f64 = 0.82;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValentineEscalation {
    initial_prompt: String,
    /// Four phrases; index `min(count, 3)` is shown after a decline.
    phrases: Vec<String>,
    /// Four illustration frames; index `min(count, 3)`.
    frames: Vec<String>,
    accepted_message: String,
    decline_count: u32,
    accepted: bool,
    decline_disabled: bool,
}

impl ValentineEscalation {
    pub fn new(
        initial_prompt: impl Into<String>,
        phrases: Vec<String>,
        frames: Vec<String>,
        accepted_message: impl Into<String>,
    ) -> Self {
        Self {
            initial_prompt: initial_prompt.into(),
            phrases,
            frames,
            accepted_message: accepted_message.into(),
            decline_count: 0,
            accepted: false,
            decline_disabled: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn decline_count(&self) -> u32 {
        self.decline_count
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_decline_disabled(&self) -> bool {
        self.decline_disabled
    }

    fn stage(&self) -> usize {
        self.decline_count.min(DECLINE_LIMIT) as usize
    }

    pub fn prompt(&self) -> &str {
        if self.decline_count == 0 {
            return &self.initial_prompt;
        }
        clamped(&self.phrases, self.stage()).unwrap_or(&self.initial_prompt)
    }

    pub fn frame_index(&self) -> usize {
        self.stage()
    }

    pub fn frame(&self) -> Option<&str> {
        clamped(&self.frames, self.stage())
    }

    pub fn accept_scale(&self) -> f64 {
        1.0 + (f64::from(self.decline_count) * SCALE_STEP).min(ACCEPT_GROWTH_CAP)
    }

    pub fn decline_scale(&self) -> f64 {
        (1.0 - f64::from(self.decline_count) * SCALE_STEP).max(DECLINE_SCALE_FLOOR)
    }

    pub fn accepted_message(&self) -> &str {
        &self.accepted_message
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn decline(&mut self) -> Option<Event> {
        if self.accepted || self.decline_disabled {
            tracing::trace!(
                accepted = self.accepted,
                disabled = self.decline_disabled,
                "decline ignored"
            );
            return None;
        }
        self.decline_count += 1;
        if self.decline_count >= DECLINE_LIMIT {
            self.decline_disabled = true;
        }
        Some(Event::ValentineDeclined {
            count: self.decline_count,
            disabled: self.decline_disabled,
        })
    }

    pub fn accept(&mut self) -> Option<Event> {
        if self.accepted {
            return None;
        }
        self.accepted = true;
        Some(Event::ValentineAccepted)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.decline_count = 0;
        self.accepted = false;
        self.decline_disabled = false;
        Some(Event::ValentineReset)
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        let asking = !self.accepted;
        write_visible(surface, Target::ValentinePrompt, asking);
        write_visible(surface, Target::AcceptButton, asking);
        write_visible(surface, Target::DeclineButton, asking);
        write_visible(surface, Target::ValentineFrame, asking);
        write_visible(surface, Target::AcceptanceBlock, self.accepted);

        write_text(surface, Target::ValentinePrompt, self.prompt());
        write_attr(
            surface,
            Target::AcceptButton,
            Attr::Scale,
            Some(format!("{:.2}", self.accept_scale()).as_str()),
        );
        write_attr(
            surface,
            Target::DeclineButton,
            Attr::Scale,
            Some(format!("{:.2}", self.decline_scale()).as_str()),
        );
        write_flag(surface, Target::DeclineButton, Attr::Disabled, self.decline_disabled);
        write_flag(surface, Target::DeclineButton, Attr::Broken, self.decline_disabled);
        if let Some(frame) = self.frame() {
            write_attr(surface, Target::ValentineFrame, Attr::Src, Some(frame));
        }
        if self.accepted {
            write_text(surface, Target::AcceptanceBlock, &self.accepted_message);
        }
    }
}

/// Entry `index`, or the last one when the list is shorter.
fn clamped(list: &[String], index: usize) -> Option<&str> {
    list.get(index).or_else(|| list.last()).map(String::as_str)
}
