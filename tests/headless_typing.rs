use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deepfocus::app::TypingApp;
use deepfocus::prompts::{Catalog, Category, Language, PromptRotator};
use deepfocus::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use deepfocus::typing::{CharState, TypingSession};
use rand::{rngs::StdRng, SeedableRng};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn typing_app(language: Language, category: Category) -> TypingApp<StdRng> {
    let catalog = Catalog::builtin().expect("embedded catalogs parse");
    let rotator = PromptRotator::with_rng(catalog, StdRng::seed_from_u64(7));
    TypingApp::new(TypingSession::new(rotator, language, category))
}

fn drain(app: &mut TypingApp<StdRng>, runner: &Runner<TestEventSource, FixedTicker>, steps: u32) {
    let now = Instant::now();
    for _ in 0..steps {
        match runner.step() {
            AppEvent::Key(key) => app.on_key(key, now),
            AppEvent::Resize => {}
            AppEvent::Tick => app.on_tick(now + Duration::from_secs(1)),
        }
    }
}

#[test]
fn headless_typing_flow_advances_to_queued_prompt() {
    let mut app = typing_app(Language::English, Category::Words);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    let target = app.session().target().to_string();
    let queued = app.session().next_target().to_string();
    for c in target.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    drain(&mut app, &runner, target.chars().count() as u32 + 2);

    assert!(app.session().is_complete());
    assert!(app
        .session()
        .states()
        .iter()
        .all(|s| *s == CharState::Correct));
    assert_eq!(app.metrics().accuracy_pct(), 100);

    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut app, &runner, 1);

    assert_eq!(app.session().target(), queued);
    assert_eq!(app.buffer(), "");
    assert!(!app.session().has_started());
    assert!(!app.session().next_target().is_empty());
}

#[test]
fn headless_typos_lower_accuracy() {
    let mut app = typing_app(Language::English, Category::Consonants);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    // home row drills never contain '!'
    tx.send(key(KeyCode::Char('!'))).unwrap();
    drain(&mut app, &runner, 1);

    assert_eq!(app.session().states()[0], CharState::Incorrect);
    assert_eq!(app.metrics().accuracy_pct(), 0);

    tx.send(key(KeyCode::Backspace)).unwrap();
    drain(&mut app, &runner, 1);
    assert_eq!(app.session().states()[0], CharState::Unset);
    assert_eq!(app.metrics().accuracy_pct(), 100);
}

#[test]
fn headless_switching_modes_keeps_prompts_in_partition() {
    let mut app = typing_app(Language::Korean, Category::Consonants);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let catalog = Catalog::builtin().unwrap();

    tx.send(key(KeyCode::F(3))).unwrap();
    tx.send(key(KeyCode::F(6))).unwrap();
    drain(&mut app, &runner, 2);

    assert_eq!(app.language(), Language::English);
    assert_eq!(app.category(), Category::Words);
    let words = catalog.partition(Language::English, Category::Words);
    assert!(words.iter().any(|w| w == app.session().target()));
    assert!(words.iter().any(|w| w == app.session().next_target()));

    tx.send(key(KeyCode::Esc)).unwrap();
    drain(&mut app, &runner, 1);
    assert!(app.should_quit());
}

#[test]
fn headless_speed_follows_simulated_seconds() {
    let mut catalog = Catalog::builtin().unwrap();
    catalog.insert(Language::English, Category::Words, vec!["ocean".to_string()]);
    let rotator = PromptRotator::with_rng(catalog, StdRng::seed_from_u64(3));
    let mut app = TypingApp::new(TypingSession::new(rotator, Language::English, Category::Words));

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    for c in "ocean".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }

    // every runner Tick stands for one second
    let mut clock = Instant::now();
    let mut ticks = 0;
    while ticks < 3 {
        match runner.step() {
            AppEvent::Key(key) => app.on_key(key, clock),
            AppEvent::Resize => {}
            AppEvent::Tick => {
                clock += Duration::from_secs(1);
                app.on_tick(clock);
                ticks += 1;
            }
        }
    }

    assert_eq!(app.metrics().elapsed_secs, 3);
    assert_eq!(app.metrics().cpm, 100);
    assert_eq!(app.metrics().accuracy_pct(), 100);
}
