use std::time::{Instant, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::ThreadRng, Rng};

use crate::prompts::{Category, Language};
use crate::runtime::TickSource;
use crate::typing::{Metrics, TypingSession};

/// Host-side adapter for typing practice: keeps the edit buffer, forwards
/// it to the session and refreshes the stats once a second.
#[derive(Debug)]
pub struct TypingApp<R: Rng = ThreadRng> {
    session: TypingSession<R>,
    buffer: String,
    metrics: Metrics,
    ticks: TickSource,
    // maps the host's monotonic `now` onto wall time for the session
    anchor: (Instant, SystemTime),
    should_quit: bool,
}

impl<R: Rng> TypingApp<R> {
    pub fn new(session: TypingSession<R>) -> Self {
        Self {
            session,
            buffer: String::new(),
            metrics: Metrics::default(),
            ticks: TickSource::every_second(),
            anchor: (Instant::now(), SystemTime::now()),
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                self.buffer.push(c);
                self.sync_input(now);
            }
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    self.sync_input(now);
                }
            }
            KeyCode::Enter => {
                if self.session.is_complete() {
                    self.session.advance();
                    self.restart_clock();
                } else if self.session.expected_char() == Some('\n') {
                    self.buffer.push('\n');
                    self.sync_input(now);
                }
            }
            KeyCode::F(n @ 1..=5) => {
                self.session.set_category(Category::ALL[n as usize - 1]);
                self.restart_clock();
            }
            KeyCode::F(6) => {
                self.session.set_language(self.session.language().toggled());
                self.restart_clock();
            }
            _ => {}
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.ticks.fire_if_due(now) {
            self.refresh_metrics(now);
        }
    }

    fn wall_time(&self, now: Instant) -> SystemTime {
        let (instant, wall) = self.anchor;
        wall + now.saturating_duration_since(instant)
    }

    fn sync_input(&mut self, now: Instant) {
        let was_started = self.session.has_started();
        self.session.update_at(&self.buffer, self.wall_time(now));
        if !was_started && self.session.has_started() {
            self.ticks.arm(now);
        }
        self.refresh_metrics(now);
    }

    fn refresh_metrics(&mut self, now: Instant) {
        self.metrics = self.session.metrics(self.wall_time(now));
    }

    fn restart_clock(&mut self) {
        self.buffer.clear();
        self.ticks.disarm();
        self.metrics = Metrics::default();
    }

    pub fn session(&self) -> &TypingSession<R> {
        &self.session
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn language(&self) -> Language {
        self.session.language()
    }

    pub fn category(&self) -> Category {
        self.session.category()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
