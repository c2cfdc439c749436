use std::time::{Duration, Instant};

use crate::assessment::{
    AssessmentEngine, AssessmentSession, Progress, Question, RiskResult, SessionError,
};
use crate::tui::theme::ThemeColors;

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

/// TUI state: the engine, the session it drives, and view-only bits
/// (option cursor, overlays, flash message).
pub struct App {
    pub engine: AssessmentEngine,
    pub session: AssessmentSession,
    pub cursor: usize,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(engine: AssessmentEngine, theme: ThemeColors) -> Self {
        let session = engine.start();
        Self {
            engine,
            session,
            cursor: 0,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.engine.current_question(&self.session)
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete(&self.session)
    }

    /// Result of the session so far (partial while in progress).
    pub fn result(&self) -> RiskResult {
        self.engine.result(&self.session)
    }

    /// Result to report on exit; only a completed assessment has one.
    pub fn finished_result(&self) -> Option<RiskResult> {
        if self.is_complete() {
            Some(self.result())
        } else {
            None
        }
    }

    pub fn next_option(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor >= len - 1 { 0 } else { self.cursor + 1 };
    }

    pub fn previous_option(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Record the option under the cursor as the current question's answer.
    pub fn select_option(&mut self) {
        let Some((id, score)) = self
            .current_question()
            .and_then(|q| q.options.get(self.cursor).map(|o| (q.id, o.score)))
        else {
            return;
        };

        if let Err(e) = self.engine.answer(&mut self.session, id, score) {
            self.show_flash(format!("Error: {}", e));
        }
    }

    /// Record the highlighted option, then move on.
    pub fn select_and_advance(&mut self) {
        self.select_option();
        self.next_question();
    }

    pub fn next_question(&mut self) {
        match self.engine.advance(&mut self.session) {
            Ok(Progress::Moved { .. }) => self.sync_cursor(),
            Ok(Progress::Completed) => {
                let result = self.result();
                self.show_flash(format!("Assessment complete: {} risk", result.tier));
            }
            Err(SessionError::Unanswered { .. }) => {
                self.show_flash("Please answer before continuing.".to_string());
            }
            Err(e) => self.show_flash(format!("Error: {}", e)),
        }
    }

    pub fn previous_question(&mut self) {
        if self.engine.retreat(&mut self.session).is_ok() {
            self.sync_cursor();
        }
    }

    pub fn restart(&mut self) {
        self.engine.restart(&mut self.session);
        self.cursor = 0;
        self.show_flash("Restarted assessment".to_string());
    }

    /// Put the cursor on the recorded answer, or the first option.
    fn sync_cursor(&mut self) {
        let recorded = self.current_question().and_then(|q| {
            let score = self.session.answer_for(q.id)?;
            q.options.iter().position(|o| o.score == score)
        });
        self.cursor = recorded.unwrap_or(0);
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Clear the flash message once it has been shown long enough
    pub fn update_flash(&mut self) {
        if let Some((_, shown_at)) = &self.flash_message {
            if shown_at.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{QuestionSet, RiskTier};

    fn app() -> App {
        App::new(AssessmentEngine::new(QuestionSet::reference()), ThemeColors::dark())
    }

    fn flash(app: &App) -> &str {
        app.flash_message.as_ref().map(|(m, _)| m.as_str()).unwrap_or("")
    }

    #[test]
    fn test_option_cursor_wraps() {
        let mut app = app();

        app.previous_option();
        assert_eq!(app.cursor, 3);
        app.next_option();
        assert_eq!(app.cursor, 0);
        app.next_option();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut app = app();

        app.next_question();
        assert_eq!(app.session.current_index(), 0);
        assert_eq!(flash(&app), "Please answer before continuing.");
    }

    #[test]
    fn test_select_records_without_moving() {
        let mut app = app();

        app.next_option();
        app.select_option();
        assert_eq!(app.session.answer_for(0), Some(2));
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_back_restores_cursor_to_answer() {
        let mut app = app();

        app.next_option();
        app.next_option();
        app.select_and_advance(); // Q1 = Monthly (3)
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.cursor, 0);

        app.previous_question();
        assert_eq!(app.session.current_index(), 0);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_complete_and_restart() {
        let mut app = app();

        for _ in 0..4 {
            app.previous_option(); // highest-risk option
            app.select_and_advance();
        }

        assert!(app.is_complete());
        assert!(app.current_question().is_none());
        let result = app.finished_result().unwrap();
        assert_eq!(result.total_score, 16);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(flash(&app), "Assessment complete: High risk");

        // Navigation is frozen until restart
        app.previous_question();
        assert!(app.is_complete());

        app.restart();
        assert!(!app.is_complete());
        assert_eq!(app.session, AssessmentSession::new());
        assert!(app.finished_result().is_none());
    }

    #[test]
    fn test_flash_persists_within_duration() {
        let mut app = app();
        app.show_flash("hello".to_string());
        app.update_flash();
        assert_eq!(flash(&app), "hello");
    }
}
