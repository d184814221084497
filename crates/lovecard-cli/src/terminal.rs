//! Terminal rendering and audio for `lovecard play`.
//!
//! [`TerminalSurface`] records every write in a [`MemorySurface`] and, on
//! [`flush`](TerminalSurface::flush), prints what changed on the panel that is
//! currently on top. Timer digits are left to the `status` command.

use std::io::{self, Write};

use lovecard_core::error::AudioError;
use lovecard_core::{Attr, AudioSink, DisplaySurface, MemorySurface, Target};

/// Panel a target lives on, or `None` for card-level targets.
pub fn panel_of(target: &Target) -> Option<&'static str> {
    match target {
        Target::ReasonButton(_)
        | Target::ReasonImage
        | Target::BrowseControls
        | Target::CreditsViewport
        | Target::CreditsList(_)
        | Target::CreditsCaption => Some("reasons"),
        Target::QuizQuestion(_)
        | Target::QuizOption(..)
        | Target::QuizResult
        | Target::QuizScore
        | Target::QuizMessage => Some("quiz"),
        Target::ValentinePrompt
        | Target::AcceptButton
        | Target::DeclineButton
        | Target::ValentineFrame
        | Target::AcceptanceBlock => Some("valentine"),
        _ => None,
    }
}

pub struct TerminalSurface {
    current: MemorySurface,
    shown: MemorySurface,
    shown_top: Option<String>,
    verbose: bool,
}

impl TerminalSurface {
    pub fn new(verbose: bool) -> Self {
        Self {
            current: MemorySurface::new(),
            shown: MemorySurface::new(),
            shown_top: None,
            verbose,
        }
    }

    /// Print changes since the last flush. `top` is the panel on top of an
    /// open stack; when it differs from last time the whole panel is shown.
    pub fn flush(&mut self, top: Option<&str>) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let switched = self.shown_top.as_deref() != top;
        let lines = if self.verbose {
            self.current
                .changed_since(&self.shown)
                .into_iter()
                .map(|(target, slot)| format!("  [{target}] {slot:?}"))
                .collect()
        } else if switched {
            self.describe(top, |_| true)
        } else {
            let changed: Vec<Target> = self
                .current
                .changed_since(&self.shown)
                .into_iter()
                .map(|(target, _)| target.clone())
                .collect();
            self.describe(top, |target| changed.contains(target))
        };
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        self.shown = self.current.clone();
        self.shown_top = top.map(String::from);
        Ok(())
    }

    fn describe(&self, top: Option<&str>, include: impl Fn(&Target) -> bool) -> Vec<String> {
        self.current
            .slots()
            .filter(|(target, _)| !target.is_ticking() && include(target))
            .filter(|(target, _)| match panel_of(target) {
                Some(panel) => top == Some(panel),
                None => true,
            })
            .filter_map(|(target, _)| self.line_for(target))
            .collect()
    }

    fn line_for(&self, target: &Target) -> Option<String> {
        let surface = &self.current;
        if surface.visible(target) == Some(false) {
            return None;
        }
        let text = surface.text(target).filter(|t| !t.is_empty());
        match target {
            Target::QuizOption(question, option) => {
                if surface.visible(&Target::QuizQuestion(*question)) != Some(true) {
                    return None;
                }
                let letter = if *option == 0 { 'a' } else { 'b' };
                let mark = if surface.attr(target, Attr::Selected).is_some() {
                    " ✓"
                } else {
                    ""
                };
                Some(format!("    {letter}) {}{mark}", text?))
            }
            Target::QuizQuestion(index) => Some(format!("  Q{}. {}", index + 1, text?)),
            Target::ReasonButton(index) => {
                let mark = if surface.attr(target, Attr::Active).is_some() {
                    " ♥"
                } else {
                    ""
                };
                Some(format!("  {}. {}{mark}", index + 1, text?))
            }
            Target::ReasonImage | Target::ValentineFrame => {
                surface.attr(target, Attr::Src).map(|src| format!("  [{src}]"))
            }
            Target::DeclineButton => surface
                .attr(target, Attr::Broken)
                .map(|_| "  (the \"no\" button is broken)".to_string()),
            Target::CreditsList(_) => None,
            _ => text.map(|t| format!("  {t}")),
        }
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_text(&mut self, target: &Target, text: &str) {
        self.current.set_text(target, text);
    }

    fn set_visible(&mut self, target: &Target, visible: bool) {
        self.current.set_visible(target, visible);
    }

    fn set_attr(&mut self, target: &Target, attr: Attr, value: Option<&str>) {
        self.current.set_attr(target, attr, value);
    }
}

/// Announces tracks instead of playing them.
#[derive(Debug, Default)]
pub struct TerminalAudio {
    playing: Option<String>,
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, track: &str, volume: f32) -> Result<(), AudioError> {
        println!("  ♪ {track} ({:.0}%)", volume * 100.0);
        self.playing = Some(track.to_string());
        Ok(())
    }

    fn pause(&mut self, track: &str) {
        if self.playing.as_deref() == Some(track) {
            self.playing = None;
        }
    }
}
