//! Display surface abstraction.
//!
//! The core never renders anything itself. Each component writes strings,
//! visibility flags and attributes into a [`DisplaySurface`] keyed by
//! [`Target`]; the front end owns the actual drawing. A surface may lack
//! some targets, in which case writes to them are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named element the card writes to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    CountdownBlock,
    CountdownDays,
    CountdownHours,
    CountdownMinutes,
    CountdownSeconds,
    AnniversaryMonths,
    AnniversaryDays,
    AnniversaryHours,
    AnniversaryMinutes,
    AnniversarySeconds,
    Envelope,
    Stack,
    Panel(String),
    ContinueButton,
    RestartButton,
    BrowseControls,
    ReasonButton(usize),
    ReasonImage,
    CreditsViewport,
    /// One of the two back-to-back copies of the affirmation list.
    CreditsList(usize),
    CreditsCaption,
    QuizQuestion(usize),
    QuizOption(usize, usize),
    QuizResult,
    QuizScore,
    QuizMessage,
    ValentinePrompt,
    AcceptButton,
    DeclineButton,
    ValentineFrame,
    AcceptanceBlock,
}

impl Target {
    /// Targets rewritten on every timer tick.
    pub fn is_ticking(&self) -> bool {
        matches!(
            self,
            Target::CountdownDays
                | Target::CountdownHours
                | Target::CountdownMinutes
                | Target::CountdownSeconds
                | Target::AnniversaryMonths
                | Target::AnniversaryDays
                | Target::AnniversaryHours
                | Target::AnniversaryMinutes
                | Target::AnniversarySeconds
        )
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Panel(id) => write!(f, "panel:{id}"),
            Target::ReasonButton(i) => write!(f, "reason-button:{i}"),
            Target::CreditsList(i) => write!(f, "credits-list:{i}"),
            Target::QuizQuestion(q) => write!(f, "quiz-question:{q}"),
            Target::QuizOption(q, o) => write!(f, "quiz-option:{q}:{o}"),
            other => {
                let name = serde_json::to_value(other)
                    .ok()
                    .and_then(|v| v.as_str().map(|s| s.replace('_', "-")))
                    .unwrap_or_else(|| format!("{other:?}"));
                f.write_str(&name)
            }
        }
    }
}

/// Attribute slots on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    Src,
    Scale,
    ZIndex,
    Offset,
    Opacity,
    Disabled,
    Active,
    Selected,
    Broken,
    Exiting,
    /// Animation generation. A surface restarts the animation when the value changes.
    Animation,
}

pub trait DisplaySurface {
    /// Whether the surface has this target at all.
    fn has(&self, _target: &Target) -> bool {
        true
    }

    fn set_text(&mut self, target: &Target, text: &str);

    fn set_visible(&mut self, target: &Target, visible: bool);

    /// `None` removes the attribute.
    fn set_attr(&mut self, target: &Target, attr: Attr, value: Option<&str>);
}

// Presence-guarded writers used by every render step.

pub fn write_text(surface: &mut dyn DisplaySurface, target: Target, text: &str) {
    if surface.has(&target) {
        surface.set_text(&target, text);
    }
}

pub fn write_visible(surface: &mut dyn DisplaySurface, target: Target, visible: bool) {
    if surface.has(&target) {
        surface.set_visible(&target, visible);
    }
}

pub fn write_attr(
    surface: &mut dyn DisplaySurface,
    target: Target,
    attr: Attr,
    value: Option<&str>,
) {
    if surface.has(&target) {
        surface.set_attr(&target, attr, value);
    }
}

/// Boolean attribute helper: present as `"true"` or removed.
pub fn write_flag(surface: &mut dyn DisplaySurface, target: Target, attr: Attr, on: bool) {
    write_attr(surface, target, attr, on.then_some("true"));
}

/// Current contents of one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub text: Option<String>,
    pub visible: Option<bool>,
    pub attrs: BTreeMap<Attr, String>,
}

/// In-memory surface. Optionally restricted to a fixed target set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    slots: BTreeMap<Target, Slot>,
    only: Option<BTreeSet<Target>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that only has the listed targets.
    pub fn with_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            slots: BTreeMap::new(),
            only: Some(targets.into_iter().collect()),
        }
    }

    pub fn slot(&self, target: &Target) -> Option<&Slot> {
        self.slots.get(target)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&Target, &Slot)> {
        self.slots.iter()
    }

    pub fn text(&self, target: &Target) -> Option<&str> {
        self.slots.get(target)?.text.as_deref()
    }

    pub fn visible(&self, target: &Target) -> Option<bool> {
        self.slots.get(target)?.visible
    }

    pub fn attr(&self, target: &Target, attr: Attr) -> Option<&str> {
        self.slots.get(target)?.attrs.get(&attr).map(String::as_str)
    }

    /// Targets whose slot differs from `previous`, in target order.
    pub fn changed_since<'a>(&'a self, previous: &MemorySurface) -> Vec<(&'a Target, &'a Slot)> {
        self.slots
            .iter()
            .filter(|(target, slot)| previous.slots.get(*target) != Some(*slot))
            .collect()
    }
}

impl DisplaySurface for MemorySurface {
    fn has(&self, target: &Target) -> bool {
        self.only.as_ref().map_or(true, |only| only.contains(target))
    }

    fn set_text(&mut self, target: &Target, text: &str) {
        self.slots.entry(target.clone()).or_default().text = Some(text.to_string());
    }

    fn set_visible(&mut self, target: &Target, visible: bool) {
        self.slots.entry(target.clone()).or_default().visible = Some(visible);
    }

    fn set_attr(&mut self, target: &Target, attr: Attr, value: Option<&str>) {
        let slot = self.slots.entry(target.clone()).or_default();
        match value {
            Some(v) => {
                slot.attrs.insert(attr, v.to_string());
            }
            None => {
                slot.attrs.remove(&attr);
            }
        }
    }
}
