use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use mathema_core::model::{ConfigurationError, GameConfiguration, Question, SessionComplete};
use mathema_core::{Clock, QuestionGenerator, grade_answer, parse_answer};

use super::phase::GamePhase;
use super::progress::SessionProgress;
use super::result::{AnswerResult, AnsweredQuestion};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough from configuration to final score.
///
/// The session starts in `Configuring`. `start` draws the questions and moves to
/// `Playing`; every `submit_answer` grades the current question and advances, and
/// the last answer moves to `Finished`. `back_to_config` and `acknowledge` discard
/// the questions and progress so the next game starts clean.
#[derive(Debug)]
pub struct GameSession {
    configuration: GameConfiguration,
    generator: QuestionGenerator,
    clock: Clock,
    phase: GamePhase,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answers: Vec<AnsweredQuestion>,
    started_at: Option<DateTime<Utc>>,
    completion: Option<SessionComplete>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfiguration::default())
    }
}

impl GameSession {
    /// Create a session in `Configuring` with the given defaults.
    #[must_use]
    pub fn new(configuration: GameConfiguration) -> Self {
        Self {
            configuration,
            generator: QuestionGenerator::new(),
            clock: Clock::default(),
            phase: GamePhase::Configuring,
            questions: Vec::new(),
            current: 0,
            score: 0,
            answers: Vec::new(),
            started_at: None,
            completion: None,
        }
    }

    /// Replace the question source, e.g. with a seeded generator.
    #[must_use]
    pub fn with_generator(mut self, generator: QuestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the clock used for start and finish timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── READ SURFACE ──────────────────────────────────────────────────────────
    //

    /// Current phase of the session.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Settings used by the next (or running) game.
    #[must_use]
    pub fn configuration(&self) -> &GameConfiguration {
        &self.configuration
    }

    /// Questions of the running game, empty while configuring.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the question awaiting an answer.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Correct answers so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Graded answers of the running or just-finished game.
    #[must_use]
    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    /// The question awaiting an answer. `None` unless `Playing`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == GamePhase::Playing {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    /// True while playing the final question.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.phase == GamePhase::Playing && self.current + 1 == self.questions.len()
    }

    /// `"{score}/{question_count}"`
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.score, self.configuration.question_count())
    }

    /// Same format as `progress_label`, available only once the game is finished.
    #[must_use]
    pub fn final_score_label(&self) -> Option<String> {
        self.completion.as_ref().map(SessionComplete::label)
    }

    /// Completion record, set only once the game is finished.
    #[must_use]
    pub fn completion(&self) -> Option<&SessionComplete> {
        self.completion.as_ref()
    }

    /// Counts for a progress indicator.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answers.len();
        SessionProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len().saturating_sub(answered),
            score: self.score,
            is_complete: self.phase == GamePhase::Finished,
        }
    }

    //
    // ─── CONFIGURING ───────────────────────────────────────────────────────────
    //

    /// Change the number of questions for the next game.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfiguration` if `value` is not in {5, 10, 15, 20};
    /// the previous configuration is kept.
    /// Returns `SessionError::InvalidStateTransition` outside `Configuring`.
    pub fn set_question_count(&mut self, value: u32) -> Result<&GameConfiguration, SessionError> {
        self.ensure_phase(GamePhase::Configuring, "change the question count")?;
        self.configuration = self
            .configuration
            .with_question_count(value)
            .inspect_err(|err| warn!(%err, "rejected question count"))?;
        Ok(&self.configuration)
    }

    /// Change the highest multiplication table for the next game.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfiguration` if `value` is outside `2..=12`;
    /// the previous configuration is kept.
    /// Returns `SessionError::InvalidStateTransition` outside `Configuring`.
    pub fn set_max_factor(&mut self, value: u32) -> Result<&GameConfiguration, SessionError> {
        self.ensure_phase(GamePhase::Configuring, "change the max factor")?;
        self.configuration = self
            .configuration
            .with_max_factor(value)
            .inspect_err(|err| warn!(%err, "rejected max factor"))?;
        Ok(&self.configuration)
    }

    /// Stepper "+" for the question count; clamps at 20.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` outside `Configuring`.
    pub fn increment_question_count(&mut self) -> Result<&GameConfiguration, SessionError> {
        self.ensure_phase(GamePhase::Configuring, "change the question count")?;
        self.configuration = self.configuration.incremented_question_count();
        Ok(&self.configuration)
    }

    /// Stepper "-" for the question count; clamps at 5.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` outside `Configuring`.
    pub fn decrement_question_count(&mut self) -> Result<&GameConfiguration, SessionError> {
        self.ensure_phase(GamePhase::Configuring, "change the question count")?;
        self.configuration = self.configuration.decremented_question_count();
        Ok(&self.configuration)
    }

    /// Draw the questions and begin play.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` outside `Configuring`.
    /// Returns `SessionError::InvalidConfiguration` if question generation is rejected.
    pub fn start(&mut self) -> Result<&Question, SessionError> {
        self.ensure_phase(GamePhase::Configuring, "start")?;
        let count = self.configuration.question_count();
        let max_factor = self.configuration.max_factor();
        let questions = self.generator.generate_for(&self.configuration)?;
        if questions.is_empty() {
            return Err(ConfigurationError::InvalidGeneratorInput { count, max_factor }.into());
        }

        self.reset();
        self.questions = questions;
        self.started_at = Some(self.clock.now());
        self.phase = GamePhase::Playing;
        debug!(question_count = count, max_factor, "game started");

        Ok(&self.questions[0])
    }

    //
    // ─── PLAYING ───────────────────────────────────────────────────────────────
    //

    /// Grade `raw` against the current question and advance.
    ///
    /// Text that is not an integer counts as a wrong answer. The answer to the last
    /// question finishes the game and carries the `SessionComplete` record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` outside `Playing`.
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerResult, SessionError> {
        self.ensure_phase(GamePhase::Playing, "submit an answer")?;
        let Some(question) = self.questions.get(self.current).copied() else {
            return Err(SessionError::InvalidStateTransition {
                phase: self.phase,
                action: "submit an answer",
            });
        };

        let outcome = grade_answer(&question, raw);
        if outcome.is_correct() {
            self.score += 1;
        }
        let answered = AnsweredQuestion {
            question,
            submitted: raw.to_string(),
            parsed: parse_answer(raw),
            outcome,
        };
        self.answers.push(answered.clone());
        debug!(index = self.current, ?outcome, score = self.score, "answer graded");

        let completion = if self.current + 1 == self.questions.len() {
            Some(self.finish()?)
        } else {
            self.current += 1;
            None
        };

        Ok(AnswerResult {
            answered,
            score: self.score,
            completion,
        })
    }

    //
    // ─── LEAVING ───────────────────────────────────────────────────────────────
    //

    /// Abandon the running game or leave the results, returning to `Configuring`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` when already `Configuring`;
    /// the session is left unchanged.
    pub fn back_to_config(&mut self) -> Result<(), SessionError> {
        if self.phase == GamePhase::Configuring {
            return Err(self.violation("go back to configuration"));
        }
        debug!(from = %self.phase, answered = self.answers.len(), "back to configuration");
        self.reset();
        Ok(())
    }

    /// Dismiss the final score, returning to `Configuring`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` outside `Finished`.
    pub fn acknowledge(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(GamePhase::Finished, "acknowledge the final score")?;
        self.reset();
        Ok(())
    }

    fn finish(&mut self) -> Result<SessionComplete, SessionError> {
        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at);
        let completion = SessionComplete::new(
            self.score,
            self.configuration.question_count(),
            started_at,
            completed_at,
        )?;
        self.phase = GamePhase::Finished;
        self.completion = Some(completion.clone());
        info!(score = %completion.label(), "game finished");
        Ok(completion)
    }

    fn reset(&mut self) {
        self.phase = GamePhase::Configuring;
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.started_at = None;
        self.completion = None;
    }

    fn ensure_phase(&self, expected: GamePhase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.violation(action))
        }
    }

    fn violation(&self, action: &'static str) -> SessionError {
        warn!(phase = %self.phase, action, "invalid state transition");
        SessionError::InvalidStateTransition {
            phase: self.phase,
            action,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mathema_core::AnswerOutcome;
    use mathema_core::time::{fixed_clock, fixed_now};

    fn session(count: u32, max_factor: u32) -> GameSession {
        GameSession::new(GameConfiguration::new(count, max_factor).unwrap())
            .with_generator(QuestionGenerator::seeded(42))
            .with_clock(fixed_clock())
    }

    fn correct(session: &GameSession) -> String {
        session.current_question().unwrap().answer().to_string()
    }

    #[test]
    fn new_session_is_configuring_and_empty() {
        let s = GameSession::default();
        assert_eq!(s.phase(), GamePhase::Configuring);
        assert!(s.questions().is_empty());
        assert!(s.current_question().is_none());
        assert_eq!(s.progress_label(), "0/5");
        assert_eq!(s.final_score_label(), None);
    }

    #[test]
    fn start_resets_and_generates() {
        let mut s = session(10, 6);
        let first = *s.start().unwrap();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.questions().len(), 10);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_question(), Some(&first));
    }

    #[test]
    fn correct_answer_scores_and_advances() {
        let mut s = session(5, 5);
        s.start().unwrap();
        let result = s.submit_answer(&correct(&s)).unwrap();
        assert_eq!(result.outcome(), AnswerOutcome::Correct);
        assert_eq!(s.score(), 1);
        assert_eq!(s.current_index(), 1);
        assert!(result.completion.is_none());
        assert_eq!(s.progress_label(), "1/5");
    }

    #[test]
    fn garbage_answer_is_incorrect_not_error() {
        let mut s = session(5, 5);
        s.start().unwrap();
        let result = s.submit_answer("abc").unwrap();
        assert_eq!(result.outcome(), AnswerOutcome::Incorrect);
        assert_eq!(result.answered.parsed, None);
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn last_answer_finishes_with_timing() {
        let mut s = session(5, 5);
        s.start().unwrap();
        for _ in 0..4 {
            assert!(!s.is_last_question());
            s.submit_answer(&correct(&s)).unwrap();
        }
        assert!(s.is_last_question());

        let result = s.submit_answer("0").unwrap();
        let done = result.completion.unwrap();
        assert_eq!(done.label(), "4/5");
        assert_eq!(done.started_at(), fixed_now());
        assert_eq!(done.elapsed(), Duration::zero());
        assert_eq!(s.phase(), GamePhase::Finished);
        assert_eq!(s.final_score_label().as_deref(), Some("4/5"));
        assert!(s.current_question().is_none());
        assert!(s.progress().is_complete);
    }

    #[test]
    fn configuration_changes_only_while_configuring() {
        let mut s = session(5, 5);
        s.set_question_count(15).unwrap();
        s.set_max_factor(12).unwrap();
        s.start().unwrap();

        let err = s.set_max_factor(3).unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(s.configuration().max_factor(), 12);
        assert!(s.increment_question_count().is_err());
    }

    #[test]
    fn rejected_question_count_keeps_previous_value() {
        let mut s = session(10, 5);
        let err = s.set_question_count(7).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidConfiguration(ConfigurationError::InvalidQuestionCount {
                value: 7
            })
        );
        assert_eq!(s.configuration().question_count(), 10);
    }

    #[test]
    fn stepper_moves_in_fives() {
        let mut s = session(5, 5);
        assert_eq!(s.increment_question_count().unwrap().question_count(), 10);
        assert_eq!(s.decrement_question_count().unwrap().question_count(), 5);
        assert_eq!(s.decrement_question_count().unwrap().question_count(), 5);
    }

    #[test]
    fn back_and_acknowledge_discard_progress() {
        let mut s = session(5, 5);
        s.start().unwrap();
        s.submit_answer(&correct(&s)).unwrap();
        s.back_to_config().unwrap();
        assert_eq!(s.phase(), GamePhase::Configuring);
        assert!(s.questions().is_empty());
        assert!(s.answers().is_empty());
        assert_eq!(s.score(), 0);

        s.start().unwrap();
        for _ in 0..5 {
            s.submit_answer("x").unwrap();
        }
        s.acknowledge().unwrap();
        assert_eq!(s.phase(), GamePhase::Configuring);
        assert!(s.completion().is_none());
    }

    #[test]
    fn out_of_phase_events_are_contract_violations() {
        let mut s = session(5, 5);
        assert!(s.submit_answer("1").unwrap_err().is_contract_violation());
        assert!(s.back_to_config().unwrap_err().is_contract_violation());
        assert!(s.acknowledge().unwrap_err().is_contract_violation());
        assert_eq!(s.phase(), GamePhase::Configuring);

        s.start().unwrap();
        assert!(s.start().unwrap_err().is_contract_violation());
        assert!(s.acknowledge().unwrap_err().is_contract_violation());
    }
}
