//! Reveal sequencer: the envelope and the stack of paper panels.
//!
//! ## State Transitions
//!
//! ```text
//! Closed --open--> Open(1) --advance--> Open(2) ... --advance--> Complete(N)
//!                    ^                                              |
//!                    +------------------- restart ------------------+
//! ```
//!
//! Advancing is two-phase. `begin_advance()` marks the top panel as exiting
//! and sets the in-flight flag; the environment plays the exit animation and
//! reports completion, at which point `complete_advance()` moves the panel to
//! the back and bumps the step. Only one completion can be pending.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::surface::{write_attr, write_flag, write_visible, Attr, DisplaySurface, Target};

pub type PanelId = String;

/// Per-depth vertical offset between stacked panels.
pub const OFFSET_STEP_PX: f64 = 10.0;
/// Per-depth scale shrink.
pub const SCALE_STEP: f64 = 0.04;
/// Per-depth opacity loss.
pub const OPACITY_STEP: f64 = 0.2;
/// Panels deeper in the stack never fade below this.
pub const OPACITY_FLOOR: f64 = 0.35;

/// Natural size of a panel before scale-to-fit.
pub const DESIGN_WIDTH: f64 = 420.0;
pub const DESIGN_HEIGHT: f64 = 560.0;

pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DESIGN_WIDTH,
            height: DESIGN_HEIGHT,
        }
    }
}

impl Viewport {
    /// Uniform scale that fits one panel in the viewport, never upscaling.
    pub fn fit_scale(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 1.0;
        }
        (self.width / DESIGN_WIDTH)
            .min(self.height / DESIGN_HEIGHT)
            .min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub panel: PanelId,
    pub z_index: usize,
    pub offset_px: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Visual stacking for `panels` in their current order (top first).
pub fn stack_layout(panels: &[PanelId], fit_scale: f64) -> Vec<PanelLayout> {
    let len = panels.len();
    panels
        .iter()
        .enumerate()
        .map(|(depth, panel)| {
            let d = depth as f64;
            PanelLayout {
                panel: panel.clone(),
                z_index: len - depth,
                offset_px: d * OFFSET_STEP_PX * fit_scale,
                scale: fit_scale * (1.0 - d * SCALE_STEP).max(0.0),
                opacity: (1.0 - d * OPACITY_STEP).max(OPACITY_FLOOR),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "phase")]
pub enum RevealPhase {
    Closed,
    Open { step: usize },
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSequencer {
    original: Vec<PanelId>,
    panels: Vec<PanelId>,
    opened: bool,
    /// 1-based index of the panel currently on top.
    step: usize,
    animating: bool,
    settle_pending: bool,
    viewport: Viewport,
    layout: Vec<PanelLayout>,
    exit_animation_ms: u64,
}

impl RevealSequencer {
    pub fn new(panels: Vec<PanelId>, exit_animation_ms: u64) -> Self {
        let viewport = Viewport::default();
        let layout = stack_layout(&panels, viewport.fit_scale());
        Self {
            original: panels.clone(),
            panels,
            opened: false,
            step: 1,
            animating: false,
            settle_pending: false,
            viewport,
            layout,
            exit_animation_ms,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        self.panels.len()
    }

    pub fn panels(&self) -> &[PanelId] {
        &self.panels
    }

    pub fn top(&self) -> Option<&PanelId> {
        self.panels.first()
    }

    pub fn layout(&self) -> &[PanelLayout] {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn at_last_step(&self) -> bool {
        self.step >= self.total()
    }

    pub fn phase(&self) -> RevealPhase {
        if !self.opened {
            RevealPhase::Closed
        } else if self.at_last_step() {
            RevealPhase::Complete
        } else {
            RevealPhase::Open { step: self.step }
        }
    }

    /// "Continue" is offered while there are panels left to reveal.
    pub fn continue_visible(&self) -> bool {
        self.opened && !self.at_last_step()
    }

    /// "Restart" is offered on the last panel, and only after acceptance.
    pub fn restart_visible(&self, accepted: bool) -> bool {
        self.opened && self.at_last_step() && accepted
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open the envelope. Layout settles on the next frame.
    pub fn open(&mut self) -> Option<Event> {
        if self.opened {
            return None;
        }
        self.opened = true;
        self.settle_pending = true;
        Some(Event::EnvelopeOpened {
            panels: self.total(),
        })
    }

    /// Frame callback: applies a pending settle.
    pub fn settle(&mut self) -> Option<Event> {
        if !self.settle_pending {
            return None;
        }
        self.settle_pending = false;
        self.relayout();
        Some(Event::LayoutSettled {
            fit_scale: self.viewport.fit_scale(),
        })
    }

    pub fn resize(&mut self, viewport: Viewport) -> Option<Event> {
        self.viewport = viewport;
        self.relayout();
        if !self.opened {
            return None;
        }
        Some(Event::LayoutSettled {
            fit_scale: viewport.fit_scale(),
        })
    }

    /// Start moving the top panel out.
    pub fn begin_advance(&mut self) -> Option<Event> {
        if !self.opened || self.animating || self.at_last_step() {
            tracing::trace!(
                opened = self.opened,
                animating = self.animating,
                step = self.step,
                "advance ignored"
            );
            return None;
        }
        let panel = self.top()?.clone();
        self.animating = true;
        Some(Event::PanelExitStarted {
            panel,
            step: self.step,
            duration_ms: self.exit_animation_ms,
        })
    }

    /// The exit animation finished: reorder and bump the step.
    pub fn complete_advance(&mut self) -> Option<Event> {
        if !self.animating {
            return None;
        }
        self.animating = false;
        self.panels.rotate_left(1);
        self.step += 1;
        self.relayout();
        Some(Event::PanelAdvanced {
            top: self.top()?.clone(),
            step: self.step,
            total: self.total(),
        })
    }

    /// Back to the first panel in the original order. The envelope stays open.
    pub fn restart(&mut self) -> Option<Event> {
        self.panels = self.original.clone();
        self.step = 1;
        self.animating = false;
        self.relayout();
        Some(Event::StackRestarted)
    }

    fn relayout(&mut self) {
        self.layout = stack_layout(&self.panels, self.viewport.fit_scale());
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface, accepted: bool) {
        write_visible(surface, Target::Envelope, !self.opened);
        write_visible(surface, Target::Stack, self.opened);
        write_visible(surface, Target::ContinueButton, self.continue_visible());
        write_visible(surface, Target::RestartButton, self.restart_visible(accepted));

        for (depth, layout) in self.layout.iter().enumerate() {
            let target = Target::Panel(layout.panel.clone());
            write_visible(surface, target.clone(), self.opened && depth == 0);
            let attrs = [
                (Attr::ZIndex, layout.z_index.to_string()),
                (Attr::Offset, format!("{:.1}", layout.offset_px)),
                (Attr::Scale, format!("{:.3}", layout.scale)),
                (Attr::Opacity, format!("{:.2}", layout.opacity)),
            ];
            for (attr, value) in attrs {
                write_attr(surface, target.clone(), attr, Some(value.as_str()));
            }
            write_flag(surface, target, Attr::Exiting, self.animating && depth == 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn panels() -> Vec<PanelId> {
        ["letter", "reasons", "quiz", "valentine"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn advance(seq: &mut RevealSequencer) {
        assert!(seq.begin_advance().is_some());
        assert!(seq.complete_advance().is_some());
    }

    #[test]
    fn open_is_one_shot() {
        let mut seq = RevealSequencer::new(panels(), 450);
        assert_eq!(seq.phase(), RevealPhase::Closed);
        assert_eq!(seq.open(), Some(Event::EnvelopeOpened { panels: 4 }));
        assert_eq!(seq.open(), None);
        assert_eq!(seq.phase(), RevealPhase::Open { step: 1 });
    }

    #[test]
    fn settle_happens_once_after_open() {
        let mut seq = RevealSequencer::new(panels(), 450);
        assert_eq!(seq.settle(), None);
        seq.open();
        assert!(matches!(seq.settle(), Some(Event::LayoutSettled { .. })));
        assert_eq!(seq.settle(), None);
    }

    #[test]
    fn advance_requires_open() {
        let mut seq = RevealSequencer::new(panels(), 450);
        assert_eq!(seq.begin_advance(), None);
        assert_eq!(seq.complete_advance(), None);
        assert_eq!(seq.step(), 1);
    }

    #[test]
    fn second_advance_while_animating_is_ignored() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        assert!(seq.begin_advance().is_some());
        assert_eq!(seq.begin_advance(), None);
        assert!(seq.is_animating());

        seq.complete_advance();
        assert_eq!(seq.step(), 2);
        // A stray second completion signal does nothing.
        assert_eq!(seq.complete_advance(), None);
        assert_eq!(seq.step(), 2);
    }

    #[test]
    fn advance_rotates_top_to_back() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        advance(&mut seq);
        assert_eq!(seq.panels(), &["reasons", "quiz", "valentine", "letter"]);
        assert_eq!(seq.top().map(String::as_str), Some("reasons"));
    }

    #[test]
    fn continue_hidden_after_total_minus_one_advances() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        for _ in 0..3 {
            assert!(seq.continue_visible());
            advance(&mut seq);
        }
        assert!(!seq.continue_visible());
        assert_eq!(seq.phase(), RevealPhase::Complete);
        assert_eq!(seq.begin_advance(), None);
    }

    #[test]
    fn restart_visibility_needs_acceptance() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        for _ in 0..3 {
            advance(&mut seq);
        }
        assert!(!seq.restart_visible(false));
        assert!(seq.restart_visible(true));
    }

    #[test]
    fn restart_restores_original_order() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        advance(&mut seq);
        advance(&mut seq);
        seq.begin_advance();
        seq.restart();
        assert_eq!(seq.panels(), panels().as_slice());
        assert_eq!(seq.step(), 1);
        assert!(!seq.is_animating());
        assert!(seq.is_open());
        // The dropped animation's completion arrives late.
        assert_eq!(seq.complete_advance(), None);
    }

    #[test]
    fn layout_stacks_with_opacity_floor() {
        let names: Vec<PanelId> = (0..6).map(|i| format!("p{i}")).collect();
        let layout = stack_layout(&names, 1.0);
        assert_eq!(layout[0].z_index, 6);
        assert_eq!(layout[5].z_index, 1);
        assert_eq!(layout[0].opacity, 1.0);
        assert!(layout.iter().all(|l| l.opacity >= OPACITY_FLOOR));
        assert_eq!(layout[5].opacity, OPACITY_FLOOR);
        assert!(layout.windows(2).all(|w| w[0].scale > w[1].scale));
        assert!(layout.windows(2).all(|w| w[0].offset_px < w[1].offset_px));
    }

    #[test]
    fn resize_scales_to_fit() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.resize(Viewport {
            width: 210.0,
            height: 1000.0,
        });
        assert_eq!(seq.layout()[0].scale, 0.5);
        seq.resize(Viewport {
            width: 4000.0,
            height: 4000.0,
        });
        assert_eq!(seq.layout()[0].scale, 1.0);
    }

    #[test]
    fn render_shows_only_top_panel() {
        let mut seq = RevealSequencer::new(panels(), 450);
        seq.open();
        let mut surface = MemorySurface::new();
        seq.render(&mut surface, false);
        assert_eq!(surface.visible(&Target::Envelope), Some(false));
        assert_eq!(surface.visible(&Target::Panel("letter".into())), Some(true));
        assert_eq!(surface.visible(&Target::Panel("quiz".into())), Some(false));
        assert_eq!(surface.visible(&Target::ContinueButton), Some(true));
        assert_eq!(surface.visible(&Target::RestartButton), Some(false));

        seq.begin_advance();
        seq.render(&mut surface, false);
        assert_eq!(
            surface.attr(&Target::Panel("letter".into()), Attr::Exiting),
            Some("true")
        );
    }
}
