//! Per-field session controller
//!
//! [`NumericInput`] is bound to one field. It sanitizes the field text on
//! every edit, classifies the final value when the edit session ends, and
//! relays each outcome to the observers registered for its kind. The host UI
//! is reached only through the [`NumericField`] trait.

use std::collections::HashMap;
use std::fmt;

use crate::config::NumericInputConfig;
use crate::errors::{ConfigError, ConfigResult};
use crate::sanitizers::{sanitize, SanitizeResult};
use crate::validators::{validate, OutcomeKind, ValidationOutcome, ValueParser};

/// Keys that end entry in a field and move focus on
pub const COMMIT_KEYS: &[&str] = &["Enter", "Go", "Next", "Tab"];

/// Input mode a host field presents to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Number,
    Tel,
    Other(String),
}

/// Host field as seen by the controller
pub trait NumericField {
    /// Current text of the field
    fn value(&self) -> String;

    /// Replace the displayed text. Cursor placement is left to the host.
    fn set_value(&mut self, value: &str);

    fn input_mode(&self) -> InputMode;

    fn set_input_mode(&mut self, mode: InputMode);
}

type Observer = Box<dyn FnMut(&ValidationOutcome)>;

/// Controller for one bound numeric field
pub struct NumericInput {
    config: NumericInputConfig,
    parser: ValueParser,
    observers: HashMap<OutcomeKind, Vec<Observer>>,
    original_mode: Option<InputMode>,
}

impl fmt::Debug for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observer_counts: HashMap<&OutcomeKind, usize> = self
            .observers
            .iter()
            .map(|(kind, list)| (kind, list.len()))
            .collect();

        f.debug_struct("NumericInput")
            .field("config", &self.config)
            .field("observers", &observer_counts)
            .field("original_mode", &self.original_mode)
            .finish()
    }
}

impl NumericInput {
    /// Bind a controller to a field configuration
    pub fn new(config: NumericInputConfig) -> ConfigResult<Self> {
        let parser = ValueParser::new(config.separator())
            .map_err(|_| ConfigError::InvalidSeparator(config.separator().to_string()))?;

        Ok(Self {
            config,
            parser,
            observers: HashMap::new(),
            original_mode: None,
        })
    }

    /// Bind a controller from the host's named field options
    pub fn from_options<I, K, V>(options: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new(NumericInputConfig::from_options(options)?)
    }

    pub fn config(&self) -> &NumericInputConfig {
        &self.config
    }

    /// Register an observer for one outcome kind
    pub fn on<F>(&mut self, kind: OutcomeKind, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.observers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
        self
    }

    pub fn on_below_min<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.on(OutcomeKind::BelowMin, handler)
    }

    pub fn on_above_max<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.on(OutcomeKind::AboveMax, handler)
    }

    /// Raised after either bound violation
    pub fn on_range_violation<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.on(OutcomeKind::RangeViolation, handler)
    }

    pub fn on_value_ok<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.on(OutcomeKind::Ok, handler)
    }

    /// Raised when the final text holds no number
    pub fn on_invalid<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ValidationOutcome) + 'static,
    {
        self.on(OutcomeKind::Invalid, handler)
    }

    /// Sanitize the text delivered by an edit-change notification
    pub fn handle_edit(&self, raw: &str) -> SanitizeResult<String> {
        sanitize(raw, &self.config)
    }

    /// Classify the final text of an edit session and notify observers.
    ///
    /// Outcomes are dispatched in order, each to every observer of its kind
    /// in registration order. The outcomes are also returned to the caller.
    pub fn handle_session_end(&mut self, text: &str) -> Vec<ValidationOutcome> {
        let value = match self.parser.parse(text) {
            Some(value) => value,
            None => {
                log::warn!("Field text {:?} holds no number", text);
                f64::NAN
            }
        };

        let outcomes = validate(value, &self.config);
        for outcome in &outcomes {
            self.dispatch(outcome);
        }
        outcomes
    }

    fn dispatch(&mut self, outcome: &ValidationOutcome) {
        if let Some(observers) = self.observers.get_mut(&outcome.kind()) {
            for observer in observers.iter_mut() {
                observer(outcome);
            }
        }
    }

    /// Field gained focus: remember its mode and switch to text if configured
    pub fn focus<F: NumericField + ?Sized>(&mut self, field: &mut F) {
        let mode = field.input_mode();

        if self.config.force_text_mode() && mode != InputMode::Text {
            log::debug!("Switching field from {:?} to text mode", mode);
            field.set_input_mode(InputMode::Text);
        }

        self.original_mode = Some(mode);
    }

    /// Key released: sanitize the field and write back only on change.
    /// Returns whether the field text was replaced.
    pub fn key_up<F: NumericField + ?Sized>(&self, field: &mut F) -> bool {
        let result = self.handle_edit(&field.value());
        if result.was_modified {
            field.set_value(&result.sanitized);
        }
        result.was_modified
    }

    /// Field lost focus: classify its value, then restore its original mode
    pub fn blur<F: NumericField + ?Sized>(&mut self, field: &mut F) -> Vec<ValidationOutcome> {
        let outcomes = self.handle_session_end(&field.value());

        if let Some(original) = self.original_mode.take() {
            if self.config.force_text_mode() && field.input_mode() != original {
                log::debug!("Restoring field to {:?} mode", original);
                field.set_input_mode(original);
            }
        }

        outcomes
    }

    /// Selector of the field to focus after `key`, if `key` commits entry
    pub fn commit_key(&self, key: &str) -> Option<&str> {
        if COMMIT_KEYS.contains(&key) {
            self.config.next_field_selector()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Debug)]
    struct MockField {
        value: String,
        mode: InputMode,
        writes: usize,
    }

    impl MockField {
        fn new(mode: InputMode) -> Self {
            Self {
                value: String::new(),
                mode,
                writes: 0,
            }
        }
    }

    impl NumericField for MockField {
        fn value(&self) -> String {
            self.value.clone()
        }

        fn set_value(&mut self, value: &str) {
            self.value = value.to_string();
            self.writes += 1;
        }

        fn input_mode(&self) -> InputMode {
            self.mode.clone()
        }

        fn set_input_mode(&mut self, mode: InputMode) {
            self.mode = mode;
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> impl FnMut(&ValidationOutcome) {
        let log = Rc::clone(log);
        move |outcome| log.borrow_mut().push(format!("{}:{}", tag, outcome.kind()))
    }

    #[test]
    fn test_violation_dispatch_order() {
        init_logging();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = NumericInput::new(NumericInputConfig::default()).unwrap();
        input
            .on_range_violation(recorder(&seen, "generic"))
            .on_below_min(recorder(&seen, "first"))
            .on_below_min(recorder(&seen, "second"))
            .on_value_ok(recorder(&seen, "ok"));

        let outcomes = input.handle_session_end("3");

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                "first:below-min".to_string(),
                "second:below-min".to_string(),
                "generic:range-violation".to_string(),
            ]
        );
    }

    #[test]
    fn test_ok_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = NumericInput::new(NumericInputConfig::default()).unwrap();
        input
            .on_value_ok(recorder(&seen, "ok"))
            .on_above_max(recorder(&seen, "max"));

        let outcomes = input.handle_session_end("100");
        assert_eq!(
            outcomes,
            vec![ValidationOutcome::Ok {
                value: 100.0,
                min_value: 5.0,
                max_value: 2000.0
            }]
        );
        assert_eq!(*seen.borrow(), vec!["ok:value-ok".to_string()]);
    }

    #[test]
    fn test_empty_text_is_invalid() {
        init_logging();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = NumericInput::new(NumericInputConfig::default()).unwrap();
        input
            .on_invalid(recorder(&seen, "invalid"))
            .on_value_ok(recorder(&seen, "ok"));

        input.handle_session_end("");
        assert_eq!(*seen.borrow(), vec!["invalid:value-invalid".to_string()]);
    }

    #[test]
    fn test_key_up_writes_back_only_on_change() {
        let input = NumericInput::new(NumericInputConfig::default()).unwrap();
        let mut field = MockField::new(InputMode::Text);

        field.value = "12a".to_string();
        assert!(input.key_up(&mut field));
        assert_eq!(field.value, "12");
        assert_eq!(field.writes, 1);

        // Written-back text is already clean, so a second pass is a no-op
        assert!(!input.key_up(&mut field));
        assert_eq!(field.writes, 1);
    }

    #[test]
    fn test_focus_and_blur_toggle_mode() {
        init_logging();
        let mut input = NumericInput::new(NumericInputConfig::default()).unwrap();
        let mut field = MockField::new(InputMode::Number);

        input.focus(&mut field);
        assert_eq!(field.mode, InputMode::Text);

        field.value = "2500".to_string();
        let outcomes = input.blur(&mut field);
        assert_eq!(outcomes[0].kind(), OutcomeKind::AboveMax);
        assert_eq!(field.mode, InputMode::Number);
    }

    #[test]
    fn test_mode_left_alone_without_force_text() {
        let config = NumericInputConfig::default().with_force_text_mode(false);
        let mut input = NumericInput::new(config).unwrap();
        let mut field = MockField::new(InputMode::Tel);

        input.focus(&mut field);
        assert_eq!(field.mode, InputMode::Tel);
        field.value = "10".to_string();
        input.blur(&mut field);
        assert_eq!(field.mode, InputMode::Tel);
    }

    #[test]
    fn test_full_session() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input =
            NumericInput::from_options([("sep", ","), ("min-value", "1"), ("max-value", "50")])
                .unwrap();
        input.on_value_ok(recorder(&seen, "ok"));

        let mut field = MockField::new(InputMode::Number);
        input.focus(&mut field);
        for typed in ["4", "42", "42,", "42,x", "42,75", "42,757"] {
            field.value = typed.to_string();
            input.key_up(&mut field);
        }
        assert_eq!(field.value, "42,75");

        let outcomes = input.blur(&mut field);
        assert_eq!(outcomes[0].value(), Some(42.75));
        assert_eq!(*seen.borrow(), vec!["ok:value-ok".to_string()]);
    }

    #[test]
    fn test_commit_key() {
        let config = NumericInputConfig::default().with_next_field_selector("#tip");
        let input = NumericInput::new(config).unwrap();
        assert_eq!(input.commit_key("Enter"), Some("#tip"));
        assert_eq!(input.commit_key("Go"), Some("#tip"));
        assert_eq!(input.commit_key("a"), None);

        let bare = NumericInput::new(NumericInputConfig::default()).unwrap();
        assert_eq!(bare.commit_key("Enter"), None);
    }
}
