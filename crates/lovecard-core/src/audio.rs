//! Audio cues.
//!
//! The environment provides an [`AudioSink`]; the [`AudioDirector`] turns
//! card events into play calls. Rejections are swallowed. Background music
//! gets exactly one delayed retry, effects get none.

use serde::{Deserialize, Serialize};

use crate::error::AudioError;
use crate::events::Event;

pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_500;

/// Playback primitive. `play` restarts the track from the beginning.
pub trait AudioSink {
    fn play(&mut self, track: &str, volume: f32) -> Result<(), AudioError>;
    fn pause(&mut self, track: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCues {
    pub enabled: bool,
    pub volume: f32,
    pub background: Option<String>,
    pub decline_effect: Option<String>,
    pub accept_effect: Option<String>,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AudioDirector {
    cues: AudioCues,
    retry_used: bool,
    background_playing: bool,
}

impl AudioDirector {
    pub fn new(cues: AudioCues) -> Self {
        Self {
            cues,
            retry_used: false,
            background_playing: false,
        }
    }

    pub fn is_background_playing(&self) -> bool {
        self.background_playing
    }

    /// React to a card event. May return an event asking for a music retry.
    pub fn on_event(&mut self, event: &Event, sink: &mut dyn AudioSink) -> Option<Event> {
        if !self.cues.enabled {
            return None;
        }
        match event {
            Event::EnvelopeOpened { .. } => self.start_background(sink),
            Event::ValentineDeclined { .. } => {
                self.effect(self.cues.decline_effect.clone(), sink);
                None
            }
            Event::ValentineAccepted => {
                self.effect(self.cues.accept_effect.clone(), sink);
                None
            }
            _ => None,
        }
    }

    /// The single delayed retry for background music. Failure is final.
    pub fn retry_background(&mut self, sink: &mut dyn AudioSink) {
        let Some(track) = self.cues.background.clone() else {
            return;
        };
        match sink.play(&track, self.cues.volume) {
            Ok(()) => self.background_playing = true,
            Err(e) => tracing::debug!(error = %e, "background music retry rejected"),
        }
    }

    pub fn pause_background(&mut self, sink: &mut dyn AudioSink) {
        if let Some(track) = &self.cues.background {
            sink.pause(track);
        }
        self.background_playing = false;
    }

    fn start_background(&mut self, sink: &mut dyn AudioSink) -> Option<Event> {
        let track = self.cues.background.clone()?;
        match sink.play(&track, self.cues.volume) {
            Ok(()) => {
                self.background_playing = true;
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "background music rejected");
                if self.retry_used {
                    return None;
                }
                self.retry_used = true;
                Some(Event::MusicRetryScheduled {
                    track,
                    after_ms: self.cues.retry_delay_ms,
                })
            }
        }
    }

    fn effect(&self, track: Option<String>, sink: &mut dyn AudioSink) {
        let Some(track) = track else {
            return;
        };
        if let Err(e) = sink.play(&track, self.cues.volume) {
            tracing::debug!(error = %e, "effect rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Deferred;

    /// Sink that rejects the first `failures` play calls.
    #[derive(Default)]
    struct FlakySink {
        failures: usize,
        played: Vec<String>,
        attempts: usize,
    }

    impl AudioSink for FlakySink {
        fn play(&mut self, track: &str, _volume: f32) -> Result<(), AudioError> {
            self.attempts += 1;
            if self.failures > 0 {
                self.failures -= 1;
                return Err(AudioError::Blocked(track.to_string()));
            }
            self.played.push(track.to_string());
            Ok(())
        }

        fn pause(&mut self, _track: &str) {}
    }

    fn cues() -> AudioCues {
        AudioCues {
            enabled: true,
            volume: 0.6,
            background: Some("music.mp3".into()),
            decline_effect: Some("sad.mp3".into()),
            accept_effect: Some("yay.mp3".into()),
            retry_delay_ms: 1500,
        }
    }

    #[test]
    fn opening_starts_background() {
        let mut director = AudioDirector::new(cues());
        let mut sink = FlakySink::default();
        let out = director.on_event(&Event::EnvelopeOpened { panels: 4 }, &mut sink);
        assert_eq!(out, None);
        assert_eq!(sink.played, vec!["music.mp3"]);
        assert!(director.is_background_playing());
    }

    #[test]
    fn rejected_background_schedules_one_retry() {
        let mut director = AudioDirector::new(cues());
        let mut sink = FlakySink {
            failures: 1,
            ..Default::default()
        };
        let out = director
            .on_event(&Event::EnvelopeOpened { panels: 4 }, &mut sink)
            .unwrap();
        assert_eq!(out.follow_up().unwrap().action, Deferred::RetryMusic);
        assert_eq!(out.follow_up().unwrap().after_ms, 1500);

        director.retry_background(&mut sink);
        assert_eq!(sink.played, vec!["music.mp3"]);
    }

    #[test]
    fn retry_is_granted_only_once() {
        let mut director = AudioDirector::new(cues());
        let mut sink = FlakySink {
            failures: 10,
            ..Default::default()
        };
        assert!(director
            .on_event(&Event::EnvelopeOpened { panels: 4 }, &mut sink)
            .is_some());
        assert!(director
            .on_event(&Event::EnvelopeOpened { panels: 4 }, &mut sink)
            .is_none());
        director.retry_background(&mut sink);
        assert!(!director.is_background_playing());
    }

    #[test]
    fn rejected_effects_are_swallowed_without_retry() {
        let mut director = AudioDirector::new(cues());
        let mut sink = FlakySink {
            failures: 1,
            ..Default::default()
        };
        let out = director.on_event(
            &Event::ValentineDeclined {
                count: 1,
                disabled: false,
            },
            &mut sink,
        );
        assert_eq!(out, None);
        assert_eq!(sink.attempts, 1);
        assert!(sink.played.is_empty());

        director.on_event(&Event::ValentineAccepted, &mut sink);
        assert_eq!(sink.played, vec!["yay.mp3"]);
    }

    #[test]
    fn disabled_audio_does_nothing() {
        let mut director = AudioDirector::new(AudioCues {
            enabled: false,
            ..cues()
        });
        let mut sink = FlakySink::default();
        director.on_event(&Event::EnvelopeOpened { panels: 4 }, &mut sink);
        assert_eq!(sink.attempts, 0);
    }
}
