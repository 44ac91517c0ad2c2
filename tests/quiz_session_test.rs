//! Tests for QuizSession scoring, hints and deadlines

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};

use quadriclass::application::{Answer, ApplicationError, Catalog, QuizPhase, QuizSession};
use quadriclass::config::QuizConfig;
use quadriclass::domain::{HighlightState, MatchResult};
use quadriclass::util::testing::{init_test_setup, ManualClock, MemoryScoreStore};

struct Game {
    session: QuizSession<StdRng>,
    clock: Arc<ManualClock>,
    catalog: Arc<Catalog>,
}

impl Game {
    /// First alias of the current target.
    fn right_answer(&self) -> String {
        self.catalog
            .concept(self.session.target())
            .unwrap()
            .aliases[0]
            .clone()
    }
}

#[fixture]
fn game() -> Game {
    init_test_setup();
    let catalog = Arc::new(Catalog::reference().unwrap());
    let clock = Arc::new(ManualClock::new());
    let session = QuizSession::start(
        catalog.clone(),
        QuizConfig::default(),
        clock.clone(),
        StdRng::seed_from_u64(1),
    );
    Game {
        session,
        clock,
        catalog,
    }
}

#[rstest]
fn given_new_session_when_started_then_running_with_outcome_target(game: Game) {
    assert_eq!(game.session.phase(), QuizPhase::Running);
    assert_eq!(game.session.score(), 0);
    assert!(game
        .catalog
        .graph()
        .outcomes()
        .contains(&game.session.target()));
    assert_eq!(game.session.remaining(), Duration::from_secs(60));
}

#[rstest]
fn given_target_when_reading_highlights_then_its_path_is_active(game: Game) {
    let path = game.session.active_path().unwrap();
    let highlights = game.session.highlights().unwrap();

    assert_eq!(path.last().map(String::as_str), Some(game.session.target()));
    for id in &path {
        assert_eq!(highlights.node(id), Some(HighlightState::Active));
    }
}

#[rstest]
fn given_right_answer_when_submitting_then_scores_and_moves_on(mut game: Game) {
    let answer = game.right_answer();

    let result = game.session.submit(&answer).unwrap();

    assert_eq!(
        result,
        Answer::Correct {
            result: MatchResult::Exact,
            awarded: 10
        }
    );
    assert_eq!(game.session.score(), 10);
    assert_eq!(game.session.solved(), 1);
}

#[rstest]
fn given_wrong_answer_when_submitting_then_target_and_score_unchanged(mut game: Game) {
    let target = game.session.target().to_string();

    let result = game.session.submit("круг").unwrap();

    assert_eq!(result, Answer::Incorrect);
    assert_eq!(game.session.target(), target);
    assert_eq!(game.session.score(), 0);
}

#[rstest]
fn given_hint_when_taken_twice_then_penalty_charged_once(mut game: Game) {
    let answer = game.right_answer();
    game.session.submit(&answer).unwrap();
    assert_eq!(game.session.score(), 10);

    let first = game.session.hint().unwrap();
    let second = game.session.hint().unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(game.session.score(), 5);
}

#[rstest]
fn given_zero_score_when_taking_hint_then_score_stays_zero(mut game: Game) {
    game.session.hint().unwrap();

    assert_eq!(game.session.score(), 0);
}

#[rstest]
fn given_deadline_passed_when_submitting_then_time_up_and_finished(mut game: Game) {
    game.clock.advance(Duration::from_secs(61));
    let answer = game.right_answer();

    let result = game.session.submit(&answer).unwrap();

    assert_eq!(result, Answer::TimeUp);
    assert_eq!(game.session.phase(), QuizPhase::Finished);
    assert_eq!(game.session.remaining(), Duration::ZERO);
    assert!(matches!(
        game.session.submit(&answer),
        Err(ApplicationError::QuizFinished)
    ));
    assert!(matches!(
        game.session.hint(),
        Err(ApplicationError::QuizFinished)
    ));
}

#[rstest]
fn given_better_score_when_finishing_then_new_record_saved(mut game: Game) {
    let store = MemoryScoreStore::new(5);
    let answer = game.right_answer();
    game.session.submit(&answer).unwrap();

    let summary = game.session.finish(&store).unwrap();

    assert!(summary.new_record);
    assert_eq!(summary.high_score, 10);
    assert_eq!(store.get(), 10);
}

#[rstest]
fn given_worse_score_when_finishing_then_record_kept(mut game: Game) {
    let store = MemoryScoreStore::new(30);
    let answer = game.right_answer();
    game.session.submit(&answer).unwrap();

    let summary = game.session.finish(&store).unwrap();

    assert!(!summary.new_record);
    assert_eq!(summary.score, 10);
    assert_eq!(summary.high_score, 30);
    assert_eq!(store.get(), 30);
}

#[rstest]
fn given_equal_score_when_finishing_then_not_a_record(mut game: Game) {
    let store = MemoryScoreStore::new(10);
    let answer = game.right_answer();
    game.session.submit(&answer).unwrap();

    let summary = game.session.finish(&store).unwrap();

    assert!(!summary.new_record);
}

#[rstest]
fn given_finished_session_when_restarting_then_fresh_round(mut game: Game) {
    let answer = game.right_answer();
    game.session.submit(&answer).unwrap();
    game.clock.advance(Duration::from_secs(120));
    game.session.finish(&MemoryScoreStore::new(0)).unwrap();

    game.session.restart();

    assert_eq!(game.session.phase(), QuizPhase::Running);
    assert_eq!(game.session.score(), 0);
    assert_eq!(game.session.solved(), 0);
    assert_eq!(game.session.remaining(), Duration::from_secs(60));
}

#[test]
fn given_same_seed_when_playing_then_same_targets() {
    let catalog = Arc::new(Catalog::reference().unwrap());
    let play = || {
        let mut session = QuizSession::start(
            catalog.clone(),
            QuizConfig::default(),
            Arc::new(ManualClock::new()),
            StdRng::seed_from_u64(99),
        );
        let mut targets = vec![];
        for _ in 0..10 {
            targets.push(session.target().to_string());
            let answer = catalog.concept(session.target()).unwrap().aliases[0].clone();
            session.submit(&answer).unwrap();
        }
        targets
    };

    assert_eq!(play(), play());
}
