//! Tests for FileScoreStore

use std::sync::Arc;

use tempfile::TempDir;

use quadriclass::infrastructure::traits::{RealFileSystem, ScoreStore};
use quadriclass::infrastructure::FileScoreStore;

fn store(dir: &TempDir) -> FileScoreStore {
    FileScoreStore::in_dir(Arc::new(RealFileSystem), &dir.path().join("data"))
}

#[test]
fn given_no_file_when_loading_then_zero() {
    let temp = TempDir::new().unwrap();

    assert_eq!(store(&temp).load_high_score().unwrap(), 0);
}

#[test]
fn given_saved_score_when_loading_then_returns_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let scores = store(&temp);

    // Act
    scores.save_high_score(42).unwrap();

    // Assert
    assert!(scores.location().exists());
    assert_eq!(scores.load_high_score().unwrap(), 42);
    assert_eq!(store(&temp).load_high_score().unwrap(), 42);
}

#[test]
fn given_saved_score_when_resetting_then_zero() {
    let temp = TempDir::new().unwrap();
    let scores = store(&temp);
    scores.save_high_score(17).unwrap();

    scores.reset().unwrap();

    assert_eq!(scores.load_high_score().unwrap(), 0);
}

#[test]
fn given_no_file_when_resetting_then_ok() {
    let temp = TempDir::new().unwrap();

    assert!(store(&temp).reset().is_ok());
}

#[test]
fn given_corrupt_file_when_loading_then_invalid_data() {
    let temp = TempDir::new().unwrap();
    let scores = store(&temp);
    std::fs::create_dir_all(scores.location().parent().unwrap()).unwrap();
    std::fs::write(scores.location(), "high_score = \"lots\"").unwrap();

    let err = scores.load_high_score().unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
