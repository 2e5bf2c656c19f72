use rstest::rstest;
use swiftype::language::{Language, RandomSelector, SupportedLanguage};
use swiftype::session::EngineState;
use swiftype::timer::ManualClock;
use swiftype::word_generator::WordGenerator;
use swiftype::{Difficulty, TestResult, TypingEngine};

fn random_engine(difficulty: Difficulty) -> (TypingEngine<ManualClock>, ManualClock) {
    let language = SupportedLanguage::Common100.as_lang().unwrap();
    let clock = ManualClock::new();
    let engine = TypingEngine::with_clock(
        difficulty,
        WordGenerator::new(language, Box::new(RandomSelector)),
        clock.clone(),
    );
    (engine, clock)
}

fn type_text(engine: &mut TypingEngine<ManualClock>, text: &str) {
    for c in text.chars() {
        engine.type_char(c);
    }
}

#[rstest]
#[case(Difficulty::Short, 20)]
#[case(Difficulty::Medium, 50)]
#[case(Difficulty::Long, 100)]
fn generated_words_match_difficulty(#[case] difficulty: Difficulty, #[case] expected: usize) {
    let vocabulary = Language::load("common100").unwrap();
    let (mut engine, _) = random_engine(difficulty);

    for _ in 0..2 {
        assert_eq!(engine.target_words().len(), expected);
        assert!(engine.target_words().iter().all(|w| vocabulary.contains(w)));
        assert_eq!(engine.current_word_index(), 0);
        assert!(engine.typed_words().is_empty());
        assert_eq!(engine.state(), EngineState::Idle);
        engine.reset(Some(difficulty));
    }
}

#[rstest]
#[case(Difficulty::Short)]
#[case(Difficulty::Medium)]
#[case(Difficulty::Long)]
fn switching_difficulty_mid_run_resets(#[case] target: Difficulty) {
    let (mut engine, clock) = random_engine(Difficulty::Medium);
    let first = engine.target_words()[0].clone();
    type_text(&mut engine, &format!("{first} "));
    clock.advance_secs(3.0);

    engine.reset(Some(target));

    assert_eq!(engine.difficulty(), target);
    assert_eq!(engine.target_words().len(), target.word_count());
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(engine.stats().accuracy, 100);
    assert_eq!(engine.stats().time, "0.0");
}

#[test]
fn perfect_short_run_in_ten_seconds() {
    let (mut engine, clock) = random_engine(Difficulty::Short);
    let targets: Vec<String> = engine.target_words().to_vec();

    for (i, word) in targets.iter().enumerate() {
        let (head, tail) = word.split_at(1);
        type_text(&mut engine, head);
        if i == 0 {
            clock.advance_secs(10.0);
        }
        type_text(&mut engine, tail);
        engine.type_char(' ');
        assert_eq!(engine.typed_words().len(), engine.current_word_index());
    }

    assert_eq!(engine.state(), EngineState::Finished);
    clock.advance_secs(0.1);

    let mut results: Vec<TestResult> = Vec::new();
    assert!(engine.poll_result(&mut results));
    type_text(&mut engine, "extra ");
    assert!(!engine.poll_result(&mut results));

    assert_eq!(
        results,
        vec![TestResult {
            accuracy: 100,
            wpm: 120,
            time: "10.0".to_string(),
            difficulty: Difficulty::Short,
        }]
    );
}

#[test]
fn half_correct_abandoned_run() {
    let (mut engine, clock) = random_engine(Difficulty::Short);

    for i in 0..10 {
        let target = engine.current_target().unwrap().to_string();
        let attempt = if i % 2 == 0 {
            target
        } else {
            format!("{target}x")
        };
        type_text(&mut engine, &format!("{attempt} "));
    }
    clock.advance_secs(4.0);

    let stats = engine.stats();
    assert_eq!(stats.accuracy, 50);
    assert_eq!(stats.wpm, 150);
    assert_eq!(stats.time, "4.0");
    assert_ne!(engine.state(), EngineState::Finished);
}

#[test]
fn pause_resume_scenario_records_only_running_time() {
    let (mut engine, clock) = random_engine(Difficulty::Short);
    let targets: Vec<String> = engine.target_words().to_vec();

    type_text(&mut engine, &targets[0][..1]);
    clock.advance_secs(2.0);
    engine.on_focus_lost();
    clock.advance_secs(5.0);
    engine.on_focus_gained();
    clock.advance_secs(1.0);
    type_text(&mut engine, &format!("{} ", &targets[0][1..]));
    for word in &targets[1..] {
        type_text(&mut engine, &format!("{word} "));
    }

    let mut results: Option<TestResult> = None;
    clock.advance_secs(1.0);
    assert!(engine.poll_result(&mut results));
    let result = results.unwrap();
    assert_eq!(result.time, "3.0");
    assert_eq!(result.wpm, 400);
}

#[test]
fn zero_time_run_reports_finite_wpm() {
    let (mut engine, _) = random_engine(Difficulty::Short);
    engine.on_key_enter();

    let stats = engine.stats();
    assert_eq!(stats.accuracy, 0);
    assert_eq!(stats.wpm, 60_000);
    assert_eq!(stats.time, "0.0");
}

#[test]
fn out_of_order_focus_events_are_absorbed() {
    let (mut engine, _) = random_engine(Difficulty::Short);
    engine.on_focus_lost();
    engine.on_focus_lost();
    engine.on_focus_gained();
    engine.on_focus_gained();
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(engine.elapsed_secs(), 0.0);
}
