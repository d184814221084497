//! Love-reasons gallery.
//!
//! Two mutually exclusive modes: `Browse` (labelled buttons, one active,
//! showing its image) and `Credits` (a looping reel of every affirmation
//! plus a caption). The reel holds two back-to-back copies of the list and
//! the scroll position wraps at one copy's length, so the seam never shows.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::surface::{
    write_attr, write_flag, write_text, write_visible, Attr, DisplaySurface, Target,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonItem {
    pub label: String,
    pub image: String,
}

impl ReasonItem {
    pub fn new(label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: image.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryMode {
    Browse,
    Credits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoveGallery {
    items: Vec<ReasonItem>,
    affirmations: Vec<String>,
    caption: String,
    active: Option<usize>,
    mode: GalleryMode,
    /// Two copies of `affirmations`, filled on first entry into credits.
    reel: Vec<String>,
    /// Bumped every time the scroll animation is (re)started.
    generation: u64,
    position: usize,
}

impl LoveGallery {
    pub fn new(
        items: Vec<ReasonItem>,
        affirmations: Vec<String>,
        caption: impl Into<String>,
    ) -> Self {
        let active = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            affirmations,
            caption: caption.into(),
            active,
            mode: GalleryMode::Browse,
            reel: Vec::new(),
            generation: 0,
            position: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> GalleryMode {
        self.mode
    }

    pub fn items(&self) -> &[ReasonItem] {
        &self.items
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&ReasonItem> {
        self.items.get(self.active?)
    }

    pub fn reel(&self) -> &[String] {
        &self.reel
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// `height` consecutive reel lines starting at the scroll position.
    pub fn visible_window(&self, height: usize) -> Vec<&str> {
        if self.reel.is_empty() {
            return Vec::new();
        }
        (0..height)
            .map(|i| self.reel[(self.position + i) % self.reel.len()].as_str())
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Activate `index` and show its image. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<Event> {
        let item = self.items.get(index)?;
        self.active = Some(index);
        Some(Event::ReasonSelected {
            index,
            image: item.image.clone(),
        })
    }

    /// Switch to the credits reel and restart its scroll from the top.
    pub fn enter_credits(&mut self) -> Option<Event> {
        if self.reel.is_empty() {
            self.reel.extend(self.affirmations.iter().cloned());
            self.reel.extend(self.affirmations.iter().cloned());
        }
        self.mode = GalleryMode::Credits;
        self.generation += 1;
        self.position = 0;
        Some(Event::CreditsStarted {
            generation: self.generation,
            lines: self.affirmations.len(),
        })
    }

    /// Move the reel forward by `lines`, wrapping at one copy's length.
    pub fn scroll(&mut self, lines: usize) {
        if self.mode != GalleryMode::Credits || self.affirmations.is_empty() {
            return;
        }
        self.position = (self.position + lines) % self.affirmations.len();
    }

    /// Back to browse mode, keeping the active item (or the first).
    pub fn reset(&mut self) -> Option<Event> {
        self.mode = GalleryMode::Browse;
        self.position = 0;
        if self.active.is_none() && !self.items.is_empty() {
            self.active = Some(0);
        }
        Some(Event::GalleryReset {
            active: self.active,
        })
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        let browsing = self.mode == GalleryMode::Browse;
        write_visible(surface, Target::BrowseControls, browsing);
        write_visible(surface, Target::ReasonImage, browsing);
        write_visible(surface, Target::CreditsViewport, !browsing);
        write_visible(surface, Target::CreditsCaption, !browsing);

        for (index, item) in self.items.iter().enumerate() {
            let target = Target::ReasonButton(index);
            write_text(surface, target.clone(), &item.label);
            write_flag(surface, target, Attr::Active, self.active == Some(index));
        }
        if let Some(item) = self.active_item() {
            write_attr(surface, Target::ReasonImage, Attr::Src, Some(item.image.as_str()));
        }

        if !browsing {
            write_text(surface, Target::CreditsCaption, &self.caption);
            let copy_len = self.affirmations.len();
            for copy in 0..2 {
                let target = Target::CreditsList(copy);
                if let Some(lines) = self.reel.get(copy * copy_len..(copy + 1) * copy_len) {
                    write_text(surface, target.clone(), &lines.join("\n"));
                }
                let generation = self.generation.to_string();
                write_attr(surface, target, Attr::Animation, Some(generation.as_str()));
            }
        }
    }
}
