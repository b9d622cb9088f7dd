use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::ThreadRng, Rng};
use tracing::debug;

use crate::bubbles::BubbleField;
use crate::countdown::{CountdownSession, CountdownSignal, Status};
use crate::picker::WrappingPicker;
use crate::prompts::Language;
use crate::reward::{RewardLedger, RewardStore};
use crate::runtime::TickSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dialing in a duration; the collection is on display.
    Setting,
    /// Countdown running or paused.
    Diving,
    /// Countdown finished, reward alert shown.
    Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Hours,
    Minutes,
    Seconds,
}

impl PickerField {
    fn index(self) -> usize {
        match self {
            PickerField::Hours => 0,
            PickerField::Minutes => 1,
            PickerField::Seconds => 2,
        }
    }

    fn left(self) -> Self {
        match self {
            PickerField::Hours => PickerField::Seconds,
            PickerField::Minutes => PickerField::Hours,
            PickerField::Seconds => PickerField::Minutes,
        }
    }

    fn right(self) -> Self {
        match self {
            PickerField::Hours => PickerField::Minutes,
            PickerField::Minutes => PickerField::Seconds,
            PickerField::Seconds => PickerField::Hours,
        }
    }
}

/// Host-side adapter for the focus timer: owns the 1 second tick source and
/// forwards keys and ticks to the countdown and the reward ledger.
#[derive(Debug)]
pub struct TimerApp<S: RewardStore, R: Rng = ThreadRng> {
    phase: Phase,
    pickers: [WrappingPicker; 3],
    focus: PickerField,
    countdown: CountdownSession,
    ledger: RewardLedger<S, R>,
    ticks: TickSource,
    pub bubbles: BubbleField,
    last_reward: Option<String>,
    language: Language,
    size: (u16, u16),
    should_quit: bool,
}

impl<S: RewardStore, R: Rng> TimerApp<S, R> {
    pub fn new(ledger: RewardLedger<S, R>, language: Language) -> Self {
        Self {
            phase: Phase::Setting,
            pickers: [
                WrappingPicker::hours(),
                WrappingPicker::minutes(),
                WrappingPicker::seconds(),
            ],
            focus: PickerField::Minutes,
            countdown: CountdownSession::new(),
            ledger,
            ticks: TickSource::every_second(),
            bubbles: BubbleField::new(),
            last_reward: None,
            language,
            size: (80, 24),
            should_quit: false,
        }
    }

    pub fn with_duration(mut self, hours: u32, minutes: u32, seconds: u32) -> Self {
        self.pickers[0].set(hours);
        self.pickers[1].set(minutes);
        self.pickers[2].set(seconds);
        self
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.phase {
            Phase::Setting => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Left => self.focus = self.focus.left(),
                KeyCode::Right | KeyCode::Tab => self.focus = self.focus.right(),
                KeyCode::Up => self.pickers[self.focus.index()].increment(),
                KeyCode::Down => self.pickers[self.focus.index()].decrement(),
                KeyCode::Enter | KeyCode::Char(' ') => self.start(now),
                KeyCode::Char('x') => self.ledger.clear(),
                _ => {}
            },
            Phase::Diving => match key.code {
                KeyCode::Char(' ') => self.toggle_pause(now),
                KeyCode::Esc => self.cancel(),
                _ => {}
            },
            Phase::Reward => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.cancel(),
                _ => {}
            },
        }
    }

    /// Called on every UI tick. Returns the creature granted if the
    /// countdown finished on this tick.
    pub fn on_tick(&mut self, now: Instant) -> Option<String> {
        let mut granted = None;

        if self.ticks.fire_if_due(now) {
            if let Some(CountdownSignal::Finished) = self.countdown.advance() {
                self.ticks.disarm();
                let creature = self.ledger.grant();
                self.bubbles.burst(&creature, self.size.0, self.size.1);
                self.last_reward = Some(creature.clone());
                self.phase = Phase::Reward;
                granted = Some(creature);
            }
        }

        self.bubbles.update();
        granted
    }

    pub fn start(&mut self, now: Instant) {
        let [h, m, s] = self.pickers.map(|p| p.value());
        if self.countdown.configure(h, m, s).is_err() {
            return;
        }
        self.phase = Phase::Diving;
        self.ticks.arm(now);
        self.bubbles.start_ambient(self.size.0, self.size.1);
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.countdown.toggle();
        if self.countdown.is_running() {
            self.ticks.arm(now);
            self.bubbles.start_ambient(self.size.0, self.size.1);
        } else {
            self.ticks.disarm();
            self.bubbles.stop();
        }
        debug!(status = ?self.countdown.status(), "pause toggled");
    }

    /// Back to the setting screen; also dismisses the reward alert.
    pub fn cancel(&mut self) {
        self.ticks.disarm();
        self.countdown.reset();
        if self.phase != Phase::Reward {
            self.bubbles.stop();
        }
        self.phase = Phase::Setting;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn picker(&self, field: PickerField) -> &WrappingPicker {
        &self.pickers[field.index()]
    }

    pub fn focus(&self) -> PickerField {
        self.focus
    }

    pub fn countdown(&self) -> &CountdownSession {
        &self.countdown
    }

    pub fn ledger(&self) -> &RewardLedger<S, R> {
        &self.ledger
    }

    pub fn last_reward(&self) -> Option<&str> {
        self.last_reward.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_paused(&self) -> bool {
        self.countdown.status() == Status::Paused
    }

    pub fn ticking(&self) -> bool {
        self.ticks.is_armed()
    }

    pub fn duration(&self) -> (u32, u32, u32) {
        let [h, m, s] = self.pickers.map(|p| p.value());
        (h, m, s)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
