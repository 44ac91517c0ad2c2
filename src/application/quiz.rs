//! Timed quiz session.
//!
//! The session owns everything that changes during a game: the current
//! target, the score and the deadline. Randomness and time are injected so a
//! whole game can be replayed in tests.
//!
//! ```text
//! start ──► Running ──submit (correct)──► Running (next target, +points)
//!              │  └──hint──► Running (-penalty, once per target)
//!              └──deadline / finish──► Finished
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::application::catalog::Catalog;
use crate::application::{ApplicationError, ApplicationResult, ScoreResultExt};
use crate::config::QuizConfig;
use crate::domain::{Highlights, MatchResult};
use crate::infrastructure::traits::{Clock, ScoreStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Running,
    Finished,
}

/// Result of submitting a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Accepted; the session moved on to a new target
    Correct { result: MatchResult, awarded: u32 },
    /// Rejected; the target is unchanged
    Incorrect,
    /// The deadline passed before the guess arrived
    TimeUp,
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub solved: u32,
    pub high_score: u32,
    pub new_record: bool,
}

pub struct QuizSession<R: Rng> {
    catalog: Arc<Catalog>,
    rules: QuizConfig,
    clock: Arc<dyn Clock>,
    rng: R,
    phase: QuizPhase,
    score: u32,
    solved: u32,
    target: String,
    hint_taken: bool,
    deadline: Instant,
}

impl<R: Rng> QuizSession<R> {
    /// Start a session: score zero, fresh deadline, random first target.
    #[instrument(level = "debug", skip_all)]
    pub fn start(catalog: Arc<Catalog>, rules: QuizConfig, clock: Arc<dyn Clock>, mut rng: R) -> Self {
        let target = catalog.graph().random_outcome(&mut rng).to_string();
        let deadline = clock.now() + rules.duration();
        info!(
            "quiz started: {}s, first target {}",
            rules.duration_secs, target
        );
        Self {
            catalog,
            rules,
            clock,
            rng,
            phase: QuizPhase::Running,
            score: 0,
            solved: 0,
            target,
            hint_taken: false,
            deadline,
        }
    }

    /// Reset score and deadline and pick a new target.
    pub fn restart(&mut self) {
        self.phase = QuizPhase::Running;
        self.score = 0;
        self.solved = 0;
        self.deadline = self.clock.now() + self.rules.duration();
        self.next_round();
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn solved(&self) -> u32 {
        self.solved
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(self.clock.now())
    }

    /// Root-to-target path the player follows.
    pub fn active_path(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.catalog.graph().path_to(&self.target)?)
    }

    pub fn highlights(&self) -> ApplicationResult<Highlights> {
        let path = self.active_path()?;
        Ok(self.catalog.graph().classify(&path))
    }

    fn expired(&self) -> bool {
        self.clock.now() >= self.deadline
    }

    fn ensure_running(&mut self) -> ApplicationResult<()> {
        if self.phase == QuizPhase::Running && self.expired() {
            debug!("deadline passed, finishing");
            self.phase = QuizPhase::Finished;
        }
        match self.phase {
            QuizPhase::Running => Ok(()),
            QuizPhase::Finished => Err(ApplicationError::QuizFinished),
        }
    }

    fn next_round(&mut self) {
        self.target = self
            .catalog
            .graph()
            .random_outcome(&mut self.rng)
            .to_string();
        self.hint_taken = false;
        debug!("next target: {}", self.target);
    }

    /// Grade a guess for the current target.
    ///
    /// # Errors
    /// [`ApplicationError::QuizFinished`] once the session has ended.
    #[instrument(level = "debug", skip(self))]
    pub fn submit(&mut self, guess: &str) -> ApplicationResult<Answer> {
        if self.phase == QuizPhase::Finished {
            return Err(ApplicationError::QuizFinished);
        }
        if self.expired() {
            self.phase = QuizPhase::Finished;
            return Ok(Answer::TimeUp);
        }

        let result = self.catalog.grade(&self.target, guess)?;
        if !result.is_match() {
            return Ok(Answer::Incorrect);
        }

        let awarded = self.rules.correct_points;
        self.score += awarded;
        self.solved += 1;
        info!("solved {} (+{}), score {}", self.target, awarded, self.score);
        self.next_round();
        Ok(Answer::Correct { result, awarded })
    }

    /// First property of the target as a hint.
    ///
    /// The penalty is charged once per target and never drives the score
    /// below zero.
    pub fn hint(&mut self) -> ApplicationResult<String> {
        self.ensure_running()?;
        let hint = self
            .catalog
            .concept(&self.target)?
            .hint()
            .unwrap_or_default()
            .to_string();
        if !self.hint_taken {
            self.hint_taken = true;
            self.score = self.score.saturating_sub(self.rules.hint_penalty);
            debug!("hint taken, score {}", self.score);
        }
        Ok(hint)
    }

    /// End the session and record a new high score if it beats the stored one.
    #[instrument(level = "debug", skip(self, store))]
    pub fn finish(&mut self, store: &dyn ScoreStore) -> ApplicationResult<QuizSummary> {
        self.phase = QuizPhase::Finished;
        let previous = store.load_high_score().in_store("load high score", store)?;

        let new_record = self.score > previous;
        if new_record {
            store
                .save_high_score(self.score)
                .in_store("save high score", store)?;
            info!("new high score: {} (was {})", self.score, previous);
        }

        Ok(QuizSummary {
            score: self.score,
            solved: self.solved,
            high_score: previous.max(self.score),
            new_record,
        })
    }
}
