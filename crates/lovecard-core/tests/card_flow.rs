//! Integration tests for the full card flow.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lovecard_core::{
    Attr, Card, Config, Deferred, DisplaySurface, Event, Input, MemorySurface, RevealPhase,
    Target,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Dispatch `input` and deliver every follow-up input immediately, the way
/// the terminal front end would once their delays elapse.
fn dispatch(card: &mut Card, input: Input) -> Vec<Event> {
    let mut queue = vec![input];
    let mut out = Vec::new();
    while let Some(input) = queue.pop() {
        for event in card.handle(input, now()) {
            if let Some(follow) = event.follow_up() {
                if let Deferred::Input { input } = follow.action {
                    queue.push(input);
                }
            }
            out.push(event);
        }
    }
    out
}

#[test]
fn test_full_card_walkthrough() {
    let mut card = Card::from_config(&Config::default(), now());
    let mut surface = MemorySurface::new();

    dispatch(&mut card, Input::OpenEnvelope);
    dispatch(&mut card, Input::Frame);
    assert_eq!(card.reveal().phase(), RevealPhase::Open { step: 1 });

    // Letter -> reasons
    dispatch(&mut card, Input::Continue);
    assert_eq!(card.reveal().top().map(String::as_str), Some("reasons"));
    dispatch(&mut card, Input::SelectReason { index: 2 });
    dispatch(&mut card, Input::ShowCredits);
    for _ in 0..5 {
        dispatch(&mut card, Input::Tick);
    }
    assert_eq!(card.gallery().position(), 5);

    // Reasons -> quiz, answer everything with the matching option.
    dispatch(&mut card, Input::Continue);
    let picks: Vec<usize> = card
        .quiz()
        .questions()
        .iter()
        .map(|q| q.options.iter().position(|o| o.is_match).unwrap())
        .collect();
    let mut completed = None;
    for (question, option) in picks.into_iter().enumerate() {
        for event in dispatch(&mut card, Input::Answer { question, option }) {
            if let Event::QuizCompleted { result } = event {
                completed = Some(result);
            }
        }
    }
    let result = completed.expect("quiz should complete");
    assert_eq!(result.score_line, "You matched 5 out of 5 answers");

    // Quiz -> valentine
    dispatch(&mut card, Input::Continue);
    assert_eq!(card.reveal().phase(), RevealPhase::Complete);
    card.render(&mut surface);
    assert_eq!(surface.visible(&Target::ContinueButton), Some(false));
    assert_eq!(surface.visible(&Target::RestartButton), Some(false));

    for _ in 0..4 {
        dispatch(&mut card, Input::Decline);
    }
    assert_eq!(card.valentine().decline_count(), 3);
    dispatch(&mut card, Input::Accept);
    card.render(&mut surface);
    assert_eq!(surface.visible(&Target::RestartButton), Some(true));
    assert_eq!(surface.visible(&Target::AcceptanceBlock), Some(true));

    dispatch(&mut card, Input::Restart);
    card.render(&mut surface);
    assert!(!card.valentine().is_accepted());
    assert_eq!(card.valentine().decline_count(), 0);
    assert_eq!(card.reveal().step(), 1);
    assert_eq!(card.reveal().panels(), Config::default().reveal.panels.as_slice());
    assert_eq!(surface.visible(&Target::QuizResult), Some(false));
    assert_eq!(surface.attr(&Target::DeclineButton, Attr::Disabled), None);
    // The previously chosen reason survives the gallery reset.
    assert_eq!(card.gallery().active(), Some(2));
}

#[test]
fn test_double_continue_during_animation() {
    let mut card = Card::from_config(&Config::default(), now());
    card.handle(Input::OpenEnvelope, now());

    let first = card.handle(Input::Continue, now());
    let second = card.handle(Input::Continue, now());
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());

    card.handle(Input::ExitAnimationEnded, now());
    assert_eq!(card.reveal().step(), 2);
}

#[test]
fn test_continue_hidden_after_total_minus_one_advances() {
    let mut card = Card::from_config(&Config::default(), now());
    dispatch(&mut card, Input::OpenEnvelope);
    let total = card.reveal().total();
    for _ in 0..total - 1 {
        assert!(card.controls().continue_visible);
        dispatch(&mut card, Input::Continue);
    }
    assert!(!card.controls().continue_visible);
    assert!(dispatch(&mut card, Input::Continue).is_empty());
}

#[test]
fn test_countdown_expiry_through_card() {
    let mut config = Config::default();
    config.countdown.target = "2026-10-19T12:00:02".into();
    let mut card = Card::from_config(&config, now());
    let mut surface = MemorySurface::new();

    let mut expired = 0;
    for secs in 0..6 {
        for event in card.handle(Input::Tick, now() + Duration::seconds(secs)) {
            if matches!(event, Event::CountdownExpired { .. }) {
                expired += 1;
            }
        }
    }
    assert_eq!(expired, 1);
    card.render(&mut surface);
    assert_eq!(surface.text(&Target::CountdownBlock), Some("Time's up!"));
    assert_eq!(surface.visible(&Target::CountdownSeconds), Some(false));
}

#[test]
fn test_countdown_example_rendering() {
    let mut config = Config::default();
    config.countdown.target = "2026-12-31T00:00:00".into();
    let at = NaiveDate::from_ymd_opt(2026, 12, 30)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap();
    let mut card = Card::from_config(&config, at);
    card.handle(Input::Tick, at);

    let mut surface = MemorySurface::new();
    card.render(&mut surface);
    let digits: Vec<&str> = [
        Target::CountdownDays,
        Target::CountdownHours,
        Target::CountdownMinutes,
        Target::CountdownSeconds,
    ]
    .iter()
    .filter_map(|t| surface.text(t))
    .collect();
    assert_eq!(digits.join(" "), "00 01 00 00");
}

#[test]
fn test_render_into_sparse_surface() {
    let mut card = Card::from_config(&Config::default(), now());
    let mut surface = MemorySurface::with_targets([Target::ValentinePrompt, Target::QuizScore]);
    dispatch(&mut card, Input::OpenEnvelope);
    dispatch(&mut card, Input::Decline);
    card.render(&mut surface);

    assert_eq!(surface.slots().count(), 2);
    assert_eq!(
        surface.text(&Target::ValentinePrompt),
        Some(card.valentine().prompt())
    );
}

/// Records every `Attr::Animation` write to the first credits copy.
#[derive(Default)]
struct AnimationLog {
    writes: Vec<Option<String>>,
}

impl DisplaySurface for AnimationLog {
    fn set_text(&mut self, _target: &Target, _text: &str) {}

    fn set_visible(&mut self, _target: &Target, _visible: bool) {}

    fn set_attr(&mut self, target: &Target, attr: Attr, value: Option<&str>) {
        if *target == Target::CreditsList(0) && attr == Attr::Animation {
            self.writes.push(value.map(String::from));
        }
    }
}

impl AnimationLog {
    fn removals(&self) -> usize {
        self.writes.iter().filter(|w| w.is_none()).count()
    }

    /// Number of times the written generation differs from the previous one.
    fn restarts(&self) -> usize {
        let mut last: Option<&String> = None;
        let mut restarts = 0;
        for value in self.writes.iter().flatten() {
            if last != Some(value) {
                restarts += 1;
            }
            last = Some(value);
        }
        restarts
    }
}

#[test]
fn test_credits_animation_restarts_only_on_entry() {
    let mut card = Card::from_config(&Config::default(), now());
    let mut log = AnimationLog::default();

    dispatch(&mut card, Input::ShowCredits);
    card.render(&mut log);
    for secs in 1..=5 {
        card.handle(Input::Tick, now() + Duration::seconds(secs));
        card.render(&mut log);
    }
    assert_eq!(log.removals(), 0);
    assert_eq!(log.restarts(), 1);
    assert_eq!(card.gallery().position(), 5);

    dispatch(&mut card, Input::ShowCredits);
    card.render(&mut log);
    card.render(&mut log);
    assert_eq!(log.restarts(), 2);
    assert_eq!(log.writes.last(), Some(&Some("2".to_string())));
}
