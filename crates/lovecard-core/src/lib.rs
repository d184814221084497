//! # lovecard Core Library
//!
//! This library provides the behaviour of an interactive greeting card as a
//! set of small, explicit state machines. It holds no display, audio or
//! timer machinery of its own: the front end owns those and drives the card
//! through [`Card::handle`], then renders it into a [`DisplaySurface`].
//!
//! ## Architecture
//!
//! - **Timers**: wall-clock countdown and anniversary engines that require
//!   the caller to invoke `tick()` once per second
//! - **Reveal**: envelope and paper-stack sequencer with a two-phase advance
//! - **Gallery**: reasons browser and looping credits reel
//! - **Quiz**: two-option compatibility quiz with result tiers
//! - **Valentine**: decline/accept escalation
//! - **Storage**: TOML-based configuration whose defaults are the built-in card
//!
//! ## Key Components
//!
//! - [`Card`]: all components and their couplings
//! - [`Event`]: what every transition produced, with optional [`FollowUp`]s
//! - [`DisplaySurface`]: the render target trait
//! - [`AudioDirector`]: maps events to audio cues with a single music retry
//! - [`Config`]: card configuration management

pub mod audio;
pub mod card;
pub mod content;
pub mod error;
pub mod events;
pub mod gallery;
pub mod quiz;
pub mod reveal;
pub mod storage;
pub mod surface;
pub mod timer;
pub mod valentine;

pub use audio::{AudioCues, AudioDirector, AudioSink};
pub use card::{Card, Controls, Input, Key};
pub use error::{AudioError, ConfigError, CoreError, ValidationError};
pub use events::{Deferred, Event, FollowUp};
pub use gallery::{GalleryMode, LoveGallery, ReasonItem};
pub use quiz::{Quiz, QuizOption, QuizQuestion, QuizResult, ResultTier};
pub use reveal::{RevealPhase, RevealSequencer, Viewport};
pub use storage::Config;
pub use surface::{Attr, DisplaySurface, MemorySurface, Target};
pub use timer::{AnniversaryEngine, CountdownEngine, CountdownState, Elapsed, Remaining};
pub use valentine::ValentineEscalation;
