use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Interval of the redraw/animation tick delivered by [`Runner`].
pub const UI_TICK_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(UI_TICK_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Periodic session tick that can be torn down.
///
/// Polled from the UI tick. While disarmed nothing fires, and re-arming
/// schedules the first tick one full period later. Ticks that were missed
/// because polling fell behind are dropped, never replayed.
#[derive(Clone, Copy, Debug)]
pub struct TickSource {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickSource {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// At most one tick per call.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            AppEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn default_ticker_uses_ui_rate() {
        assert_eq!(
            FixedTicker::default().interval(),
            Duration::from_millis(UI_TICK_MS)
        );
    }

    #[test]
    fn tick_source_fires_once_per_period() {
        let t0 = Instant::now();
        let mut ticks = TickSource::every_second();
        ticks.arm(t0);

        assert!(!ticks.fire_if_due(t0 + Duration::from_millis(999)));
        assert!(ticks.fire_if_due(t0 + Duration::from_millis(1000)));
        assert!(!ticks.fire_if_due(t0 + Duration::from_millis(1500)));
        assert!(ticks.fire_if_due(t0 + Duration::from_millis(2050)));
    }

    #[test]
    fn tick_source_keeps_cadence_when_polled_late() {
        let t0 = Instant::now();
        let mut ticks = TickSource::every_second();
        ticks.arm(t0);

        assert!(ticks.fire_if_due(t0 + Duration::from_millis(1090)));
        // Next deadline stays on the one-second grid
        assert!(ticks.fire_if_due(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn tick_source_drops_backlog() {
        let t0 = Instant::now();
        let mut ticks = TickSource::every_second();
        ticks.arm(t0);

        let late = t0 + Duration::from_secs(30);
        assert!(ticks.fire_if_due(late));
        assert!(!ticks.fire_if_due(late));
        assert!(!ticks.fire_if_due(late + Duration::from_millis(999)));
        assert!(ticks.fire_if_due(late + Duration::from_secs(1)));
    }

    #[test]
    fn disarmed_tick_source_never_fires() {
        let t0 = Instant::now();
        let mut ticks = TickSource::every_second();
        assert!(!ticks.is_armed());
        assert!(!ticks.fire_if_due(t0 + Duration::from_secs(5)));

        ticks.arm(t0);
        ticks.disarm();

        assert!(!ticks.is_armed());
        for secs in 1..60 {
            assert!(!ticks.fire_if_due(t0 + Duration::from_secs(secs)));
        }
    }

    #[test]
    fn rearm_starts_a_fresh_period() {
        let t0 = Instant::now();
        let mut ticks = TickSource::every_second();
        ticks.arm(t0);
        ticks.disarm();

        let resumed = t0 + Duration::from_secs(120);
        ticks.arm(resumed);

        assert!(!ticks.fire_if_due(resumed + Duration::from_millis(500)));
        assert!(ticks.fire_if_due(resumed + Duration::from_secs(1)));
    }
}
