//! View state of the lookup form and its submit lifecycle.
//!
//! A submission runs in two steps, [`LookupForm::begin_submit`] and
//! [`LookupForm::complete`], so callers can render the loading state in
//! between. [`LookupForm::submit`] runs both around a single fetch.

use crate::{LookupError, RecordSource, WeatherRecord};

/// Label of the submit control while a lookup is in flight.
pub const LOADING_LABEL: &str = "Loading...";

/// Label of the submit control otherwise.
pub const SUBMIT_LABEL: &str = "Lookup Weather Data";

/// What the last submission produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Empty,
    Found(WeatherRecord),
    Failed(String),
}

/// Ticket for a submission that has started but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    identifier: String,
    generation: u64,
}

impl PendingLookup {
    /// Trimmed identifier to look up.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct LookupForm {
    input: String,
    is_loading: bool,
    outcome: Outcome,
    generation: u64,
}

impl LookupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&WeatherRecord> {
        match &self.outcome {
            Outcome::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading { LOADING_LABEL } else { SUBMIT_LABEL }
    }

    /// Start a submission for the current input.
    ///
    /// Returns `None` and leaves the state untouched when the trimmed input
    /// is empty. Otherwise clears the previous outcome, enters the loading
    /// state and hands back the ticket to complete.
    pub fn begin_submit(&mut self) -> Option<PendingLookup> {
        let identifier = self.input.trim();
        if identifier.is_empty() {
            return None;
        }

        let identifier = identifier.to_owned();
        self.generation += 1;
        self.is_loading = true;
        self.outcome = Outcome::Empty;

        Some(PendingLookup { identifier, generation: self.generation })
    }

    /// Record the response for `pending`.
    ///
    /// Returns `false` and changes nothing if a newer submission has started
    /// since `pending` was issued.
    pub fn complete(
        &mut self,
        pending: PendingLookup,
        response: Result<WeatherRecord, LookupError>,
    ) -> bool {
        if pending.generation != self.generation {
            tracing::debug!(
                identifier = %pending.identifier,
                stale = pending.generation,
                latest = self.generation,
                "dropping stale lookup response"
            );
            return false;
        }

        self.outcome = match response {
            Ok(record) => Outcome::Found(record),
            Err(err) => Outcome::Failed(err.user_message()),
        };
        self.is_loading = false;
        true
    }

    /// Look up the current input against `source`.
    ///
    /// Does nothing for an empty input. Errors end up in the outcome.
    pub async fn submit(&mut self, source: &dyn RecordSource) {
        let Some(pending) = self.begin_submit() else {
            return;
        };

        let response = source.fetch(pending.identifier()).await;
        self.complete(pending, response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FETCH_FAILED_MESSAGE, NETWORK_ERROR_MESSAGE};
    use async_trait::async_trait;
    use std::{
        collections::VecDeque,
        sync::Mutex,
    };

    /// Replays canned responses and records every identifier it was asked for.
    #[derive(Debug, Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<WeatherRecord, LookupError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn with(responses: Vec<Result<WeatherRecord, LookupError>>) -> Self {
            Self { responses: Mutex::new(responses.into()), calls: Mutex::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSource for ScriptedSource {
        async fn fetch(&self, identifier: &str) -> Result<WeatherRecord, LookupError> {
            self.calls.lock().unwrap().push(identifier.to_owned());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch")
        }
    }

    fn paris() -> WeatherRecord {
        serde_json::from_str(
            r#"{"date":"2024-01-01","location":"Paris","notes":"","weather_info":{"current":{"temperature":18,"feelslike":17,"weather_descriptions":["Sunny"],"humidity":40,"wind_speed":10,"wind_dir":"N","uv_index":3,"pressure":1012}}}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn submit_trims_identifier_and_fetches_once() {
        let source = ScriptedSource::with(vec![Ok(paris())]);
        let mut form = LookupForm::new();
        form.set_input("  abc-1 \t");

        form.submit(&source).await;

        assert_eq!(source.calls(), vec!["abc-1".to_string()]);
        assert_eq!(form.result(), Some(&paris()));
        assert_eq!(form.error_message(), None);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let source = ScriptedSource::default();

        for input in ["", "   ", "\n\t"] {
            let mut form = LookupForm::new();
            form.set_input(input);

            assert!(!form.can_submit());
            form.submit(&source).await;

            assert!(!form.is_loading());
            assert_eq!(form.outcome(), &Outcome::Empty);
        }

        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_input_keeps_previous_outcome() {
        let source = ScriptedSource::with(vec![Ok(paris())]);
        let mut form = LookupForm::new();
        form.set_input("x");
        form.submit(&source).await;

        form.set_input("  ");
        form.submit(&source).await;

        assert_eq!(form.result(), Some(&paris()));
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn rejection_with_detail_sets_error_message() {
        let source = ScriptedSource::with(vec![Err(LookupError::Rejected {
            status: 404,
            detail: Some("not found".into()),
        })]);
        let mut form = LookupForm::new();
        form.set_input("missing");

        form.submit(&source).await;

        assert_eq!(form.error_message(), Some("not found"));
        assert!(form.result().is_none());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn rejection_without_detail_uses_fallback() {
        let source =
            ScriptedSource::with(vec![Err(LookupError::Rejected { status: 500, detail: None })]);
        let mut form = LookupForm::new();
        form.set_input("boom");

        form.submit(&source).await;

        assert_eq!(form.error_message(), Some(FETCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn decode_failure_reports_network_error() {
        let decode = serde_json::from_str::<WeatherRecord>("nope").unwrap_err();
        let source = ScriptedSource::with(vec![Err(decode.into())]);
        let mut form = LookupForm::new();
        form.set_input("id");

        form.submit(&source).await;

        assert_eq!(form.error_message(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn begin_submit_clears_previous_outcome_and_loads() {
        let mut form = LookupForm::new();
        form.set_input("id");

        let first = form.begin_submit().unwrap();
        assert!(form.complete(first, Ok(paris())));
        assert!(form.result().is_some());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);

        let second = form.begin_submit().unwrap();
        assert_eq!(second.identifier(), "id");
        assert!(form.is_loading());
        assert!(form.result().is_none());
        assert!(form.error_message().is_none());
        assert!(!form.can_submit());
        assert_eq!(form.submit_label(), LOADING_LABEL);

        assert!(form.complete(second, Ok(paris())));
        assert_eq!(form.result(), Some(&paris()));
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn repeated_submission_reaches_same_state() {
        let source = ScriptedSource::with(vec![Ok(paris()), Ok(paris())]);
        let mut form = LookupForm::new();
        form.set_input("same");

        form.submit(&source).await;
        let after_first = form.outcome().clone();

        form.submit(&source).await;

        assert_eq!(form.outcome(), &after_first);
        assert_eq!(source.calls(), vec!["same".to_string(), "same".to_string()]);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut form = LookupForm::new();
        form.set_input("slow");
        let slow = form.begin_submit().unwrap();

        form.set_input("fast");
        let fast = form.begin_submit().unwrap();
        assert!(fast.generation() > slow.generation());

        assert!(form.complete(fast, Err(LookupError::Rejected { status: 404, detail: Some("gone".into()) })));
        assert!(!form.complete(slow, Ok(paris())));

        assert_eq!(form.error_message(), Some("gone"));
        assert!(form.result().is_none());
    }

    #[test]
    fn stale_response_does_not_end_newer_loading() {
        let mut form = LookupForm::new();
        form.set_input("a");
        let old = form.begin_submit().unwrap();
        let _new = form.begin_submit().unwrap();

        assert!(!form.complete(old, Ok(paris())));
        assert!(form.is_loading());
        assert_eq!(form.outcome(), &Outcome::Empty);
    }
}
