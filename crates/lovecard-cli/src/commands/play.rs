use std::time::Duration;

use clap::Args;
use lovecard_core::timer::{local_now, TICK_INTERVAL_MS};
use lovecard_core::{
    AudioDirector, Card, Config, Deferred, Event, FollowUp, GalleryMode, Input, Key,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use super::quiz::parse_option;
use crate::terminal::{TerminalAudio, TerminalSurface};

#[derive(Args)]
pub struct PlayArgs {
    /// Don't announce audio cues
    #[arg(long)]
    mute: bool,
    /// Print every surface change, including layout attributes and timer digits
    #[arg(long)]
    verbose: bool,
}

/// One line typed at the prompt.
#[derive(Debug, PartialEq)]
pub enum Command {
    Input(Input),
    /// `a`/`b` for whichever question is active.
    AnswerCurrent(usize),
    Status,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let words: Vec<&str> = line.split_whitespace().collect();
    let lowered: Vec<String> = words.iter().map(|w| w.to_ascii_lowercase()).collect();
    let args: Vec<&str> = lowered.iter().map(String::as_str).collect();
    let input = |input: Input| Command::Input(input);
    match args.as_slice() {
        [] | ["enter"] => Input::from_key(Key::Enter).map_or(Command::Help, input),
        ["space"] => Input::from_key(Key::Space).map_or(Command::Help, input),
        ["open"] => input(Input::OpenEnvelope),
        ["next"] | ["continue"] | ["c"] => input(Input::Continue),
        ["reason" | "select", n] => match n.parse::<usize>() {
            Ok(n) if n > 0 => input(Input::SelectReason { index: n - 1 }),
            _ => Command::Unknown(line.trim().to_string()),
        },
        ["credits"] => input(Input::ShowCredits),
        ["answer", q, pick] => match (q.parse::<usize>(), parse_option(pick)) {
            (Ok(q), Some(option)) if q > 0 => input(Input::Answer {
                question: q - 1,
                option,
            }),
            _ => Command::Unknown(line.trim().to_string()),
        },
        ["a"] => Command::AnswerCurrent(0),
        ["b"] => Command::AnswerCurrent(1),
        ["no" | "decline"] => input(Input::Decline),
        ["yes" | "accept"] => input(Input::Accept),
        ["restart"] => input(Input::Restart),
        ["resize", w, h] => match (w.parse::<f64>(), h.parse::<f64>()) {
            (Ok(width), Ok(height)) => input(Input::Resize { width, height }),
            _ => Command::Unknown(line.trim().to_string()),
        },
        ["status"] => Command::Status,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit" | "q"] => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

/// Deferred actions waiting for their delay to elapse.
#[derive(Debug, Default)]
struct Scheduler {
    pending: Vec<(Instant, Deferred)>,
}

impl Scheduler {
    fn push(&mut self, follow: FollowUp) {
        let due = Instant::now() + Duration::from_millis(follow.after_ms);
        self.pending.push((due, follow.action));
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(due, _)| *due).min()
    }

    /// Remove and return everything due at `now`, earliest first.
    fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = rest;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, action)| action).collect()
    }
}

struct Session {
    card: Card,
    director: AudioDirector,
    audio: TerminalAudio,
    screen: TerminalSurface,
    scheduler: Scheduler,
}

impl Session {
    fn new(config: &Config, args: &PlayArgs) -> Self {
        let mut cues = config.audio.cues();
        if args.mute {
            cues.enabled = false;
        }
        Self {
            card: Card::from_config(config, local_now()),
            director: AudioDirector::new(cues),
            audio: TerminalAudio::default(),
            screen: TerminalSurface::new(args.verbose),
            scheduler: Scheduler::default(),
        }
    }

    fn dispatch(&mut self, input: Input) {
        for event in self.card.handle(input, local_now()) {
            tracing::debug!(?event, "card event");
            narrate(&event);
            if let Some(follow) = event.follow_up() {
                self.scheduler.push(follow);
            }
            if let Some(retry) = self.director.on_event(&event, &mut self.audio) {
                tracing::debug!(?retry, "audio event");
                if let Some(follow) = retry.follow_up() {
                    self.scheduler.push(follow);
                }
            }
        }
    }

    fn run_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::Input { input } => self.dispatch(input),
            Deferred::RetryMusic => self.director.retry_background(&mut self.audio),
        }
    }

    /// Render, let the layout settle on the following frame, render again.
    fn present(&mut self) -> std::io::Result<()> {
        self.card.render(&mut self.screen);
        self.dispatch(Input::Frame);
        self.card.render(&mut self.screen);
        let reveal = self.card.reveal();
        let top = if reveal.is_open() {
            reveal.top().map(String::as_str)
        } else {
            None
        };
        self.screen.flush(top)
    }

    fn status(&self) {
        let countdown = self.card.countdown();
        match countdown.last() {
            _ if countdown.is_expired() => println!("countdown:   {}", countdown.expired_message()),
            Some(remaining) => println!("countdown:   {remaining}"),
            None => println!("countdown:   --"),
        }
        println!("together:    {}", self.card.anniversary().elapsed());
        let reveal = self.card.reveal();
        if reveal.is_open() {
            println!("panel:       {}/{}", reveal.step(), reveal.total());
        } else {
            println!("panel:       envelope closed");
        }
    }
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "config has values the card will fall back on");
    }
    super::runtime()?.block_on(session(Session::new(&config, &args)))
}

async fn session(mut session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));

    print_help();
    session.present()?;

    loop {
        let deadline = session.scheduler.next_deadline();
        let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));
        tokio::select! {
            _ = ticker.tick() => {
                session.dispatch(Input::Tick);
                if session.card.gallery().mode() == GalleryMode::Credits
                    && session.card.reveal().top().map(String::as_str) == Some("reasons")
                {
                    for line in session.card.gallery().visible_window(1) {
                        println!("  ~ {line}");
                    }
                }
            }
            _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                for action in session.scheduler.take_due(Instant::now()) {
                    session.run_deferred(action);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Command::Input(input) => session.dispatch(input),
                    Command::AnswerCurrent(option) => {
                        let question = session.card.quiz().current();
                        session.dispatch(Input::Answer { question, option });
                    }
                    Command::Status => session.status(),
                    Command::Help => print_help(),
                    Command::Quit => break,
                    Command::Unknown(text) => println!("unknown command '{text}', try 'help'"),
                }
            }
        }
        session.present()?;
    }

    session.director.pause_background(&mut session.audio);
    println!("bye ♥");
    Ok(())
}

fn narrate(event: &Event) {
    match event {
        Event::EnvelopeOpened { panels } => {
            println!("✉ The envelope opens. {panels} pages inside.")
        }
        Event::PanelAdvanced { top, step, total } => {
            println!("── page {step}/{total}: {top} ──");
            if let Some(hint) = panel_hint(top) {
                println!("  ({hint})");
            }
        }
        Event::StackRestarted => println!("── back to the first page ──"),
        Event::CreditsStarted { lines, .. } => println!("  {lines} reasons, rolling..."),
        Event::CountdownExpired { message } => println!("⏰ {message}"),
        Event::ValentineAccepted => println!("♥♥♥"),
        _ => {}
    }
}

fn panel_hint(panel: &str) -> Option<&'static str> {
    match panel {
        "letter" => Some("type 'next' to turn the page"),
        "reasons" => Some("'reason N' to pick one, 'credits' for all of them"),
        "quiz" => Some("answer with 'a' or 'b'"),
        "valentine" => Some("'yes' or 'no'"),
        _ => None,
    }
}

fn print_help() {
    println!("commands:");
    println!("  open | enter | space      open the envelope");
    println!("  next                      turn the page");
    println!("  reason N | credits        browse the reasons");
    println!("  a | b | answer N a|b      answer the quiz");
    println!("  yes | no                  answer the big question");
    println!("  restart                   start over (once you said yes)");
    println!("  resize W H                change the viewport");
    println!("  status | help | quit");
}
