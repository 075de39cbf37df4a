//! Submission state machine for the Ask screen
//!
//! Owns the three form fields and the response lifecycle. Every
//! state transition goes through a method on [`Submission`], so the
//! rendering and network code only ever read the current state.

use super::client::SubmitRequest;

// ── Form fields ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskField {
    #[default]
    QuestionId,
    Query,
    Code,
}

impl AskField {
    pub fn all() -> &'static [AskField] {
        &[AskField::QuestionId, AskField::Query, AskField::Code]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct AskForm {
    pub question_id: String,
    pub query: String,
    pub code: String,
    pub active_field: AskField,
}

impl AskForm {
    pub fn get_field_mut(&mut self, field: AskField) -> &mut String {
        match field {
            AskField::QuestionId => &mut self.question_id,
            AskField::Query => &mut self.query,
            AskField::Code => &mut self.code,
        }
    }

    pub fn get_field(&self, field: AskField) -> &str {
        match field {
            AskField::QuestionId => &self.question_id,
            AskField::Query => &self.query,
            AskField::Code => &self.code,
        }
    }

    /// All three fields must be non-empty after trimming whitespace.
    pub fn is_valid(&self) -> bool {
        !self.question_id.trim().is_empty()
            && !self.query.trim().is_empty()
            && !self.code.trim().is_empty()
    }
}

// ── Response state ──

/// What the response pane is currently showing. Exactly one variant is
/// active at a time; a failed clipboard copy rides along with the
/// received text instead of replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Received {
        text: String,
        copy_error: Option<String>,
    },
}

// ── Submission ──

/// Form fields plus response state, with one mutation entry point per
/// user-visible operation.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub form: AskForm,
    state: ResponseState,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and snapshot the payload to send.
    ///
    /// Returns `None` when nothing should be sent: either a request is
    /// already in flight, or validation failed (which replaces whatever
    /// was displayed with the validation error).
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.is_loading() {
            return None;
        }
        if !self.form.is_valid() {
            self.state = ResponseState::Failed("All fields are required".to_string());
            return None;
        }
        self.state = ResponseState::Loading;
        Some(SubmitRequest {
            question_id: self.form.question_id.clone(),
            query: self.form.query.clone(),
            code: self.form.code.clone(),
        })
    }

    /// Apply the outcome of the network call. Only meaningful while a
    /// request is in flight; stray results are dropped.
    pub fn finish(&mut self, outcome: Result<String, String>) {
        if !self.is_loading() {
            return;
        }
        self.state = match outcome {
            Ok(text) => ResponseState::Received {
                text,
                copy_error: None,
            },
            Err(message) => ResponseState::Failed(message),
        };
    }

    /// Record a failed clipboard write. The received text stays visible.
    pub fn note_copy_failed(&mut self) {
        if let ResponseState::Received { copy_error, .. } = &mut self.state {
            *copy_error = Some("Failed to copy text".to_string());
        }
    }

    /// Clear a stale clipboard error after a copy that worked.
    pub fn note_copy_ok(&mut self) {
        if let ResponseState::Received { copy_error, .. } = &mut self.state {
            *copy_error = None;
        }
    }

    pub fn state(&self) -> &ResponseState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResponseState::Loading)
    }

    pub fn response_text(&self) -> Option<&str> {
        match &self.state {
            ResponseState::Received { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The single error line shown to the user, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResponseState::Failed(message) => Some(message),
            ResponseState::Received {
                copy_error: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Copying is only offered while a response is displayed.
    pub fn can_copy(&self) -> bool {
        matches!(self.state, ResponseState::Received { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Submission {
        let mut submission = Submission::new();
        submission.form.question_id = "Q1".to_string();
        submission.form.query = "What does this do?".to_string();
        submission.form.code = "print(1)".to_string();
        submission
    }

    #[test]
    fn test_submit_requires_all_fields() {
        for (id, query, code) in [
            ("", "", ""),
            ("", "q", "c"),
            ("Q1", "", "c"),
            ("Q1", "q", ""),
            ("   ", "q", "c"),
            ("Q1", "\t\n", "c"),
        ] {
            let mut submission = Submission::new();
            submission.form.question_id = id.to_string();
            submission.form.query = query.to_string();
            submission.form.code = code.to_string();
            assert!(submission.begin_submit().is_none());
            assert_eq!(
                submission.state(),
                &ResponseState::Failed("All fields are required".to_string())
            );
        }
    }

    #[test]
    fn test_submit_snapshots_the_form_verbatim() {
        let mut submission = filled();
        submission.form.code = "  print(1) ".to_string();
        let request = submission.begin_submit().unwrap();
        assert_eq!(request.question_id, "Q1");
        assert_eq!(request.query, "What does this do?");
        // Trimming is for validation only, the payload is sent as typed
        assert_eq!(request.code, "  print(1) ");
        assert!(submission.is_loading());
    }

    #[test]
    fn test_no_resubmit_while_loading() {
        let mut submission = filled();
        assert!(submission.begin_submit().is_some());
        assert!(submission.begin_submit().is_none());
        assert!(submission.is_loading());
    }

    #[test]
    fn test_finish_success() {
        let mut submission = filled();
        submission.begin_submit();
        submission.finish(Ok("It prints 1".to_string()));
        assert!(!submission.is_loading());
        assert_eq!(submission.response_text(), Some("It prints 1"));
        assert_eq!(submission.error(), None);
        assert!(submission.can_copy());
    }

    #[test]
    fn test_finish_failure() {
        let mut submission = filled();
        submission.begin_submit();
        submission.finish(Err("API request failed".to_string()));
        assert!(!submission.is_loading());
        assert_eq!(submission.response_text(), None);
        assert_eq!(submission.error(), Some("API request failed"));
        assert!(!submission.can_copy());
    }

    #[test]
    fn test_empty_response_text_is_still_a_response() {
        let mut submission = filled();
        submission.begin_submit();
        submission.finish(Ok(String::new()));
        assert_eq!(submission.response_text(), Some(""));
        assert!(submission.can_copy());
    }

    #[test]
    fn test_finish_is_dropped_when_nothing_is_in_flight() {
        let mut submission = filled();
        submission.finish(Ok("stray".to_string()));
        assert_eq!(submission.state(), &ResponseState::Idle);
    }

    #[test]
    fn test_new_submit_clears_previous_outcome() {
        let mut submission = filled();
        submission.begin_submit();
        submission.finish(Ok("old".to_string()));

        // A valid resubmit goes straight back to loading
        assert!(submission.begin_submit().is_some());
        assert!(submission.is_loading());
        assert_eq!(submission.response_text(), None);
        assert_eq!(submission.error(), None);

        // An invalid resubmit replaces the old response with the error
        submission.finish(Ok("old".to_string()));
        submission.form.query.clear();
        assert!(submission.begin_submit().is_none());
        assert_eq!(submission.response_text(), None);
        assert_eq!(submission.error(), Some("All fields are required"));
    }

    #[test]
    fn test_copy_failure_keeps_response_visible() {
        let mut submission = filled();
        submission.begin_submit();
        submission.finish(Ok("It prints 1".to_string()));

        submission.note_copy_failed();
        assert_eq!(submission.response_text(), Some("It prints 1"));
        assert_eq!(submission.error(), Some("Failed to copy text"));

        submission.note_copy_ok();
        assert_eq!(submission.error(), None);
        assert_eq!(submission.response_text(), Some("It prints 1"));
    }

    #[test]
    fn test_copy_notes_are_noops_outside_received() {
        let mut submission = filled();
        submission.note_copy_failed();
        assert_eq!(submission.state(), &ResponseState::Idle);

        submission.begin_submit();
        submission.note_copy_failed();
        assert!(submission.is_loading());
        assert_eq!(submission.error(), None);

        submission.finish(Err("boom".to_string()));
        submission.note_copy_failed();
        assert_eq!(submission.error(), Some("boom"));
    }

    #[test]
    fn test_field_edits_leave_response_state_alone() {
        let mut submission = filled();
        submission.begin_submit();
        submission
            .form
            .get_field_mut(AskField::Query)
            .push_str(" now");
        assert!(submission.is_loading());
        assert_eq!(submission.form.query, "What does this do? now");
    }

    #[test]
    fn test_field_cycling_wraps() {
        assert_eq!(AskField::QuestionId.next(), AskField::Query);
        assert_eq!(AskField::Query.next(), AskField::Code);
        assert_eq!(AskField::Code.next(), AskField::QuestionId);
        assert_eq!(AskField::QuestionId.prev(), AskField::Code);
        assert_eq!(AskField::Code.prev(), AskField::Query);
    }
}
