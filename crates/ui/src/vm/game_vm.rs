use std::collections::VecDeque;
use std::ops::RangeInclusive;

use mathema_core::model::GameConfiguration;
use services::{GamePhase, GameSession};
use tracing::debug;

use super::alert::FeedbackAlert;
use crate::audio::BackgroundMusic;
use crate::error::ViewError;

pub const TITLE: &str = "MathemaKids";
pub const SETTINGS_HEADER: &str = "Game Settings";
pub const MAX_FACTOR_LABEL: &str = "From multiplication tables up to";
pub const ANSWER_PLACEHOLDER: &str = "Enter Your Answer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameIntent {
    IncrementQuestions,
    DecrementQuestions,
    SelectMaxFactor(u32),
    PlayOrBack,
    EditAnswer(String),
    Submit,
    DismissAlert,
}

/// Screen state for the single game screen.
///
/// Wraps a `GameSession` with the bits only the UI cares about: the answer text
/// being typed, the queue of pending alerts and the background music.
pub struct GameVm {
    session: GameSession,
    answer_text: String,
    alerts: VecDeque<FeedbackAlert>,
    music: Box<dyn BackgroundMusic>,
}

impl GameVm {
    #[must_use]
    pub fn new(session: GameSession, music: Box<dyn BackgroundMusic>) -> Self {
        Self {
            session,
            answer_text: String::new(),
            alerts: VecDeque::new(),
            music,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_configuring(&self) -> bool {
        self.session.phase() == GamePhase::Configuring
    }

    /// The alert currently on screen, if any.
    #[must_use]
    pub fn alert(&self) -> Option<&FeedbackAlert> {
        self.alerts.front()
    }

    //
    // ─── LABELS ────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn title(&self) -> &'static str {
        TITLE
    }

    #[must_use]
    pub fn section_header(&self) -> Option<&'static str> {
        self.is_configuring().then_some(SETTINGS_HEADER)
    }

    #[must_use]
    pub fn question_count_label(&self) -> String {
        format!(
            "Ask me {} questions",
            self.session.configuration().question_count()
        )
    }

    #[must_use]
    pub fn max_factor_label(&self) -> &'static str {
        MAX_FACTOR_LABEL
    }

    #[must_use]
    pub fn max_factor_options(&self) -> RangeInclusive<u32> {
        GameConfiguration::max_factor_options()
    }

    #[must_use]
    pub fn selected_max_factor(&self) -> u32 {
        self.session.configuration().max_factor()
    }

    #[must_use]
    pub fn play_or_back_label(&self) -> &'static str {
        if self.is_configuring() { "Play" } else { "Back" }
    }

    #[must_use]
    pub fn prompt_text(&self) -> Option<String> {
        self.session.current_question().map(|q| q.prompt())
    }

    #[must_use]
    pub fn answer_placeholder(&self) -> &'static str {
        ANSWER_PLACEHOLDER
    }

    #[must_use]
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Score: {}", self.session.progress_label())
    }

    /// `"Question 3 of 10"` while playing.
    #[must_use]
    pub fn question_number_label(&self) -> Option<String> {
        self.session.current_question().map(|_| {
            format!(
                "Question {} of {}",
                self.session.current_index() + 1,
                self.session.questions().len()
            )
        })
    }

    //
    // ─── INTENTS ───────────────────────────────────────────────────────────────
    //

    /// Apply a user intent.
    ///
    /// Edits and submits are ignored while an alert is showing.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::InvalidConfiguration` for settings outside their range.
    /// Returns `ViewError::Unknown` when the intent does not fit the current screen.
    pub fn dispatch(&mut self, intent: GameIntent) -> Result<(), ViewError> {
        debug!(?intent, phase = %self.session.phase(), "dispatch");
        match intent {
            GameIntent::IncrementQuestions => {
                self.session.increment_question_count()?;
            }
            GameIntent::DecrementQuestions => {
                self.session.decrement_question_count()?;
            }
            GameIntent::SelectMaxFactor(value) => {
                self.session.set_max_factor(value)?;
            }
            GameIntent::PlayOrBack => self.play_or_back()?,
            GameIntent::EditAnswer(text) => {
                if self.alerts.is_empty() {
                    self.answer_text = text;
                }
            }
            GameIntent::Submit => {
                if self.alerts.is_empty() {
                    self.submit()?;
                }
            }
            GameIntent::DismissAlert => self.dismiss_alert()?,
        }
        Ok(())
    }

    fn play_or_back(&mut self) -> Result<(), ViewError> {
        if self.is_configuring() {
            self.session.start()?;
            self.music.play();
        } else {
            self.session.back_to_config()?;
            self.leave_game();
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), ViewError> {
        let result = self.session.submit_answer(&self.answer_text)?;
        self.answer_text.clear();
        self.alerts
            .push_back(FeedbackAlert::for_answer(result.question(), result.outcome()));
        if let Some(completion) = &result.completion {
            self.alerts.push_back(FeedbackAlert::for_completion(completion));
        }
        Ok(())
    }

    fn dismiss_alert(&mut self) -> Result<(), ViewError> {
        if self.alerts.pop_front().is_none() {
            return Ok(());
        }
        if self.alerts.is_empty() && self.session.phase() == GamePhase::Finished {
            self.session.acknowledge()?;
            self.leave_game();
        }
        Ok(())
    }

    fn leave_game(&mut self) {
        self.answer_text.clear();
        self.alerts.clear();
        self.music.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use mathema_core::time::fixed_clock;
    use services::QuestionGenerator;

    use super::*;
    use crate::audio::SilentMusic;
    use crate::vm::AlertKind;

    #[derive(Clone, Default)]
    struct RecordingMusic(Rc<RefCell<Vec<&'static str>>>);

    impl BackgroundMusic for RecordingMusic {
        fn play(&mut self) {
            self.0.borrow_mut().push("play");
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push("stop");
        }
    }

    fn vm_with(music: Box<dyn BackgroundMusic>) -> GameVm {
        let session = GameSession::new(GameConfiguration::default())
            .with_generator(QuestionGenerator::seeded(8))
            .with_clock(fixed_clock());
        GameVm::new(session, music)
    }

    fn type_and_submit(vm: &mut GameVm, text: &str) {
        vm.dispatch(GameIntent::EditAnswer(text.to_string())).unwrap();
        vm.dispatch(GameIntent::Submit).unwrap();
    }

    fn current_answer(vm: &GameVm) -> String {
        vm.session()
            .current_question()
            .unwrap()
            .answer()
            .to_string()
    }

    #[test]
    fn configuring_screen_labels() {
        let mut vm = vm_with(Box::new(SilentMusic));
        assert_eq!(vm.title(), "MathemaKids");
        assert_eq!(vm.section_header(), Some("Game Settings"));
        assert_eq!(vm.question_count_label(), "Ask me 5 questions");
        assert_eq!(vm.play_or_back_label(), "Play");
        assert!(vm.prompt_text().is_none());

        vm.dispatch(GameIntent::IncrementQuestions).unwrap();
        assert_eq!(vm.question_count_label(), "Ask me 10 questions");
        vm.dispatch(GameIntent::SelectMaxFactor(12)).unwrap();
        assert_eq!(vm.selected_max_factor(), 12);
    }

    #[test]
    fn invalid_max_factor_maps_to_view_error() {
        let mut vm = vm_with(Box::new(SilentMusic));
        let err = vm.dispatch(GameIntent::SelectMaxFactor(13)).unwrap_err();
        assert_eq!(err, ViewError::InvalidConfiguration);
        assert_eq!(vm.selected_max_factor(), 5);
    }

    #[test]
    fn play_shows_prompt_and_starts_music() {
        let music = RecordingMusic::default();
        let mut vm = vm_with(Box::new(music.clone()));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();

        assert_eq!(vm.play_or_back_label(), "Back");
        assert_eq!(vm.section_header(), None);
        assert!(vm.prompt_text().unwrap().ends_with(" = ?"));
        assert_eq!(vm.question_number_label().as_deref(), Some("Question 1 of 5"));
        assert_eq!(*music.0.borrow(), vec!["play"]);
    }

    #[test]
    fn submit_clears_text_and_raises_alert() {
        let mut vm = vm_with(Box::new(SilentMusic));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();
        let answer = current_answer(&vm);
        type_and_submit(&mut vm, &answer);

        assert_eq!(vm.answer_text(), "");
        assert_eq!(vm.alert().unwrap().kind, AlertKind::Correct);
        assert_eq!(vm.progress_label(), "Score: 1/5");

        // Input is frozen until the alert is dismissed.
        vm.dispatch(GameIntent::EditAnswer("9".into())).unwrap();
        vm.dispatch(GameIntent::Submit).unwrap();
        assert_eq!(vm.answer_text(), "");
        assert_eq!(vm.session().answers().len(), 1);

        vm.dispatch(GameIntent::DismissAlert).unwrap();
        assert!(vm.alert().is_none());
        assert_eq!(vm.question_number_label().as_deref(), Some("Question 2 of 5"));
    }

    #[test]
    fn final_alert_returns_to_configuration() {
        let music = RecordingMusic::default();
        let mut vm = vm_with(Box::new(music.clone()));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();

        type_and_submit(&mut vm, "abc");
        assert_eq!(vm.alert().unwrap().kind, AlertKind::Incorrect);
        vm.dispatch(GameIntent::DismissAlert).unwrap();
        for _ in 0..4 {
            let answer = current_answer(&vm);
            type_and_submit(&mut vm, &answer);
            vm.dispatch(GameIntent::DismissAlert).unwrap();
        }

        // The game-over alert is still up after the last answer's feedback.
        assert_eq!(vm.phase(), GamePhase::Finished);
        assert_eq!(vm.alert().unwrap().message, "You scored 4/5");
        vm.dispatch(GameIntent::DismissAlert).unwrap();

        assert_eq!(vm.phase(), GamePhase::Configuring);
        assert_eq!(*music.0.borrow(), vec!["play", "stop"]);
    }

    #[test]
    fn game_over_alert_carries_final_score() {
        let mut vm = vm_with(Box::new(SilentMusic));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();
        for _ in 0..4 {
            let answer = current_answer(&vm);
            type_and_submit(&mut vm, &answer);
            vm.dispatch(GameIntent::DismissAlert).unwrap();
        }
        type_and_submit(&mut vm, "");

        assert_eq!(vm.phase(), GamePhase::Finished);
        assert_eq!(vm.alert().unwrap().kind, AlertKind::Incorrect);
        vm.dispatch(GameIntent::DismissAlert).unwrap();

        let over = vm.alert().unwrap();
        assert_eq!(over.kind, AlertKind::GameOver);
        assert_eq!(over.message, "You scored 4/5");

        vm.dispatch(GameIntent::DismissAlert).unwrap();
        assert!(vm.is_configuring());
        assert!(vm.session().questions().is_empty());
    }

    #[test]
    fn back_abandons_game_and_stops_music() {
        let music = RecordingMusic::default();
        let mut vm = vm_with(Box::new(music.clone()));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();
        vm.dispatch(GameIntent::EditAnswer("12".into())).unwrap();
        vm.dispatch(GameIntent::PlayOrBack).unwrap();

        assert!(vm.is_configuring());
        assert_eq!(vm.answer_text(), "");
        assert_eq!(*music.0.borrow(), vec!["play", "stop"]);
    }

    #[test]
    fn rejected_submit_keeps_typed_text() {
        let mut vm = vm_with(Box::new(SilentMusic));
        vm.dispatch(GameIntent::EditAnswer("42".into())).unwrap();
        let err = vm.dispatch(GameIntent::Submit).unwrap_err();
        assert_eq!(err, ViewError::Unknown);
        assert_eq!(vm.answer_text(), "42");
    }

    #[test]
    fn settings_are_locked_while_playing() {
        let mut vm = vm_with(Box::new(SilentMusic));
        vm.dispatch(GameIntent::PlayOrBack).unwrap();
        let err = vm.dispatch(GameIntent::IncrementQuestions).unwrap_err();
        assert_eq!(err, ViewError::Unknown);
    }
}
