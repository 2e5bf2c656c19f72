use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use swiftype::language::{CustomSelector, Language};
use swiftype::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use swiftype::session::{EngineState, RunId};
use swiftype::timer::ManualClock;
use swiftype::word_generator::WordGenerator;
use swiftype::{Difficulty, TestResult, TypingEngine};

fn engine_for(word: &str, clock: &ManualClock) -> TypingEngine<ManualClock> {
    let language = Language::from_words("headless", vec![word]).unwrap();
    let generator = WordGenerator::new(
        language,
        Box::new(CustomSelector::new(vec![word.to_string()])),
    );
    TypingEngine::with_clock(Difficulty::Short, generator, clock.clone())
}

fn send_text(tx: &mpsc::Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .unwrap();
    }
}

/// Applies one event the way the terminal host does. Returns false once the
/// event source has closed.
fn handle(
    engine: &mut TypingEngine<ManualClock>,
    tick_run: &mut RunId,
    event: AppEvent,
    sink: &mut Vec<TestResult>,
) -> bool {
    match event {
        AppEvent::Tick => {
            engine.on_tick(*tick_run);
            *tick_run = engine.run_id();
        }
        AppEvent::FocusGained => engine.on_focus_gained(),
        AppEvent::FocusLost => engine.on_focus_lost(),
        AppEvent::Resize => {}
        AppEvent::Closed => return false,
        AppEvent::Key(key) => match key.code {
            KeyCode::Char(c) => engine.type_char(c),
            KeyCode::Enter => engine.on_key_enter(),
            KeyCode::Backspace => engine.backspace(),
            _ => {}
        },
    }
    engine.poll_result(sink);
    true
}

fn drive(
    engine: &mut TypingEngine<ManualClock>,
    runner: &mut Runner<TestEventSource, FixedTicker>,
    sink: &mut Vec<TestResult>,
    max_steps: u32,
) {
    let mut tick_run = engine.run_id();
    for _ in 0..max_steps {
        if !handle(engine, &mut tick_run, runner.step(), sink) || !sink.is_empty() {
            break;
        }
    }
}

// Headless integration using the internal runtime + engine without a TTY
#[test]
fn headless_typing_flow_delivers_result() {
    let clock = ManualClock::new();
    let mut engine = engine_for("hi", &clock).with_grace(Duration::ZERO);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for _ in 0..20 {
        send_text(&tx, "hi ");
    }

    let mut sink = Vec::new();
    drive(&mut engine, &mut runner, &mut sink, 200);

    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].accuracy, 100);
    assert_eq!(sink[0].difficulty, Difficulty::Short);
}

#[test]
fn headless_enter_submits_words() {
    let clock = ManualClock::new();
    let mut engine = engine_for("ok", &clock);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    send_text(&tx, "ok");
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
    send_text(&tx, "ko");
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();

    let mut sink = Vec::new();
    drive(&mut engine, &mut runner, &mut sink, 20);

    assert_eq!(engine.current_word_index(), 2);
    assert!(engine.typed_words()[0].correct);
    assert!(!engine.typed_words()[1].correct);
    assert_eq!(engine.stats().accuracy, 50);
    assert!(sink.is_empty());
}

#[test]
fn headless_focus_loss_freezes_time() {
    let clock = ManualClock::new();
    let mut engine = engine_for("go", &clock);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let mut sink = Vec::new();
    let mut tick_run = engine.run_id();

    send_text(&tx, "g");
    tx.send(AppEvent::FocusLost).unwrap();
    for _ in 0..20 {
        handle(&mut engine, &mut tick_run, runner.step(), &mut sink);
        if engine.state() == EngineState::Paused {
            break;
        }
    }
    assert_eq!(engine.state(), EngineState::Paused);

    clock.advance_secs(30.0);
    for _ in 0..3 {
        handle(&mut engine, &mut tick_run, runner.step(), &mut sink);
    }
    assert_eq!(engine.elapsed_secs(), 0.0);
    assert_eq!(engine.displayed_secs(), 0.0);

    tx.send(AppEvent::FocusGained).unwrap();
    for _ in 0..20 {
        handle(&mut engine, &mut tick_run, runner.step(), &mut sink);
        if engine.state() == EngineState::Running {
            break;
        }
    }
    assert_eq!(engine.state(), EngineState::Running);

    clock.advance_secs(1.0);
    while runner.step() != AppEvent::Tick {}
    handle(&mut engine, &mut tick_run, AppEvent::Tick, &mut sink);

    assert!((engine.displayed_secs() - 1.0).abs() < 1e-9);
}

#[test]
fn headless_ticks_keep_cadence_during_steady_typing() {
    let clock = ManualClock::new();
    let mut engine = engine_for("hi", &clock).with_grace(Duration::ZERO);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(100)),
    );

    // keys every 15ms for about 1.2s: the whole run, then a held key
    let typist = thread::spawn(move || {
        let text = format!("{}{}", "hi ".repeat(20), "x".repeat(20));
        for c in text.chars() {
            send_text(&tx, &c.to_string());
            thread::sleep(Duration::from_millis(15));
        }
    });

    let mut sink = Vec::new();
    let mut tick_run = engine.run_id();
    let mut ticks = 0;
    loop {
        let event = runner.step();
        match event {
            AppEvent::Tick => ticks += 1,
            AppEvent::Key(_) => clock.advance_secs(0.01),
            _ => {}
        }
        if !handle(&mut engine, &mut tick_run, event, &mut sink) {
            break;
        }
    }
    typist.join().unwrap();

    assert!(ticks >= 5, "only {ticks} ticks during steady typing");
    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].accuracy, 100);
    assert!(engine.displayed_secs() > 0.0);
}
