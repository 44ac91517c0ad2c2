//! Tests for command dispatch against an in-memory container

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rstest::{fixture, rstest};

use quadriclass::cli::{execute_command, Cli, CliError};
use quadriclass::config::Settings;
use quadriclass::exitcode;
use quadriclass::infrastructure::di::ServiceContainer;
use quadriclass::infrastructure::traits::{RealFileSystem, ScoreStore};
use quadriclass::util::testing::{ManualClock, MemoryScoreStore};

#[fixture]
fn scores() -> Arc<MemoryScoreStore> {
    Arc::new(MemoryScoreStore::new(25))
}

fn container(scores: Arc<MemoryScoreStore>) -> ServiceContainer {
    let settings = Settings {
        data_dir: PathBuf::from("/nonexistent"),
        ..Settings::default()
    };
    ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        Arc::new(ManualClock::new()),
        scores,
    )
    .expect("container")
}

fn run(args: &[&str], scores: Arc<MemoryScoreStore>) -> Result<i32, CliError> {
    let cli = Cli::parse_from(std::iter::once("quadriclass").chain(args.iter().copied()));
    execute_command(&cli, &container(scores))
}

#[rstest]
#[case::exact(&["guess", "res_m", "ромб"], exitcode::OK)]
#[case::corrected(&["guess", "res_m", "ромп"], exitcode::OK)]
#[case::multi_word(&["guess", "res_h", "Рамнокрак", "трапез"], exitcode::OK)]
#[case::wrong(&["guess", "res_m", "квадрат"], exitcode::WRONG_ANSWER)]
#[case::tree(&["tree"], exitcode::OK)]
#[case::tree_highlight(&["tree", "делтоид"], exitcode::OK)]
#[case::path(&["path", "res_n"], exitcode::OK)]
#[case::shape(&["shape", "квадрат", "--value", "a=3"], exitcode::OK)]
#[case::shape_listed_inputs(&["shape", "делтоид", "-v", "d1=4", "-v", "d2=5"], exitcode::OK)]
#[case::shapes(&["shapes"], exitcode::OK)]
#[case::config_template(&["config", "template"], exitcode::OK)]
fn given_command_when_executing_then_exit_code(
    scores: Arc<MemoryScoreStore>,
    #[case] args: &[&str],
    #[case] expected: i32,
) {
    assert_eq!(run(args, scores).unwrap(), expected);
}

#[rstest]
fn given_unknown_shape_when_guessing_then_noinput(scores: Arc<MemoryScoreStore>) {
    let err = run(&["guess", "res_z", "ромб"], scores).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[rstest]
#[case::no_equals(&["shape", "квадрат", "--value", "a3"])]
#[case::not_a_number(&["shape", "квадрат", "--value", "a=three"])]
#[case::foreign_input(&["shape", "квадрат", "--value", "h=2"])]
fn given_bad_calculator_value_when_shape_then_usage(
    scores: Arc<MemoryScoreStore>,
    #[case] args: &[&str],
) {
    let err = run(args, scores).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
fn given_stored_score_when_resetting_then_zero(scores: Arc<MemoryScoreStore>) {
    let code = run(&["score", "--reset"], scores.clone()).unwrap();

    assert_eq!(code, exitcode::OK);
    assert_eq!(scores.load_high_score().unwrap(), 0);
}
