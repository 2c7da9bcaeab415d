// ============================================================
// Layer 2 — Form State and View
// ============================================================
// The interactive form as a small state machine:
//
//   FormState  — current profile, focused control, and the
//                result of the last analysis (if still valid)
//   FormAction — everything a key press can mean, including
//                typed digits for the focused control
//   view()     — pure function FormState → FormView; the event
//                loop calls it after every action and draws
//                whatever it returns
//
// Rules:
//   - the metrics are recomputed on every view
//   - the verdict is only computed on Analyze, and any change to
//     an input discards it
//   - a typed entry is a draft until committed; committing goes
//     through StudentProfile::set, so it is clamped and snapped
//     like any other edit. Any action other than typing commits
//     the draft first.

use crate::application::assess_use_case::AssessUseCase;
use crate::application::presenter::{self, Verdict};
use crate::domain::features::DerivedFeatures;
use crate::domain::profile::{InputField, StudentProfile};

/// PageUp / PageDown move this many steps
const LARGE_STEP: i32 = 10;

/// Longest draft a control accepts ("10.00" plus slack)
const MAX_ENTRY_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    FocusNext,
    FocusPrev,
    Increase,
    Decrease,
    IncreaseLarge,
    DecreaseLarge,
    ToMin,
    ToMax,
    Reset,
    Analyze,
    Quit,
    /// Append a digit or decimal point to the draft
    Digit(char),
    Backspace,
    /// Store the draft in the focused field
    Commit,
    /// Drop the draft, keep the stored value
    Cancel,
}

/// What the results area shows after an analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(Verdict),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FormState {
    profile: StudentProfile,
    focus:   InputField,
    outcome: Option<Outcome>,
    entry:   Option<String>,
    quit:    bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            profile: StudentProfile::default(),
            focus:   InputField::ALL[0],
            outcome: None,
            entry:   None,
            quit:    false,
        }
    }
}

impl FormState {
    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub fn focus(&self) -> InputField {
        self.focus
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Draft typed into the focused control, if any
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.entry.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one user action. Only `Analyze` reaches the classifier.
    pub fn apply(&mut self, action: FormAction, use_case: &AssessUseCase<'_>) {
        match action {
            FormAction::Digit(c) => {
                self.type_char(c);
                return;
            }
            FormAction::Backspace => {
                self.backspace();
                return;
            }
            FormAction::Cancel => {
                self.entry = None;
                return;
            }
            _ => self.commit_entry(),
        }

        match action {
            FormAction::FocusNext => self.focus = self.shift_focus(1),
            FormAction::FocusPrev => self.focus = self.shift_focus(-1),

            FormAction::Increase      => self.edit(|p, f| { p.nudge(f, 1); }),
            FormAction::Decrease      => self.edit(|p, f| { p.nudge(f, -1); }),
            FormAction::IncreaseLarge => self.edit(|p, f| { p.nudge(f, LARGE_STEP); }),
            FormAction::DecreaseLarge => self.edit(|p, f| { p.nudge(f, -LARGE_STEP); }),
            FormAction::ToMin         => self.edit(|p, f| { p.set(f, f.spec().min); }),
            FormAction::ToMax         => self.edit(|p, f| { p.set(f, f.spec().max); }),
            FormAction::Reset         => self.edit(|p, _| p.reset()),

            FormAction::Analyze => {
                self.outcome = Some(match use_case.assess(&self.profile) {
                    Ok(assessment) => Outcome::Verdict(Verdict::from(assessment.prediction)),
                    Err(e) => {
                        // the results area shows it; the terminal is in raw mode
                        tracing::debug!("Analysis failed: {e:#}");
                        Outcome::Failed(format!("{e:#}"))
                    }
                });
            }

            FormAction::Quit => self.quit = true,

            // handled above
            FormAction::Digit(_)
            | FormAction::Backspace
            | FormAction::Commit
            | FormAction::Cancel => {}
        }
    }

    fn type_char(&mut self, c: char) {
        let decimals = self.focus.spec().decimals;
        let draft    = self.entry.get_or_insert_with(String::new);
        let accepted = match c {
            '0'..='9' => true,
            '.'       => decimals > 0 && !draft.contains('.'),
            _         => false,
        };
        if accepted && draft.len() < MAX_ENTRY_LEN {
            draft.push(c);
        }
        if draft.is_empty() {
            self.entry = None;
        }
    }

    fn backspace(&mut self) {
        if let Some(draft) = self.entry.as_mut() {
            draft.pop();
            if draft.is_empty() {
                self.entry = None;
            }
        }
    }

    /// Store the draft through the clamping setter. An unparsable
    /// draft (a lone ".") is dropped.
    fn commit_entry(&mut self) {
        let Some(draft) = self.entry.take() else { return };
        match draft.parse::<f64>() {
            Ok(raw) => self.edit(|p, f| { p.set(f, raw); }),
            Err(_)  => tracing::debug!("Dropped unparsable entry {:?}", draft),
        }
    }

    /// Run an input edit; drop the verdict only if a value actually changed
    fn edit(&mut self, change: impl FnOnce(&mut StudentProfile, InputField)) {
        let before = self.profile;
        change(&mut self.profile, self.focus);
        if self.profile != before {
            self.outcome = None;
        }
    }

    fn shift_focus(&self, delta: isize) -> InputField {
        let n    = InputField::ALL.len() as isize;
        let next = (self.focus.index() as isize + delta).rem_euclid(n);
        InputField::ALL[next as usize]
    }
}

// ─── View model ───────────────────────────────────────────────────────────────

/// One sidebar control, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    pub label:   &'static str,
    pub value:   String,
    pub range:   String,
    pub ratio:   f64,
    pub focused: bool,
    /// `value` holds a draft, not the stored value
    pub editing: bool,
}

/// Everything the screen shows for one state
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub title:         &'static str,
    pub controls:      Vec<ControlView>,
    pub burnout_index: String,
    pub total_stress:  String,
    pub outcome:       Option<Outcome>,
}

/// Derive the screen from the state. No I/O, no classifier calls.
pub fn view(state: &FormState) -> FormView {
    let controls = InputField::ALL
        .into_iter()
        .map(|field| {
            let spec    = field.spec();
            let value   = state.profile().value(field);
            let focused = field == state.focus();
            let draft   = state.entry().filter(|_| focused);
            ControlView {
                label:   field.label(),
                value:   match draft {
                    Some(text) => format!("{text}_"),
                    None       => spec.format(value),
                },
                range:   format!("{}–{}", spec.format(spec.min), spec.format(spec.max)),
                ratio:   spec.ratio(value),
                focused,
                editing: draft.is_some(),
            }
        })
        .collect();

    let metrics = DerivedFeatures::from_profile(state.profile());

    FormView {
        title:         presenter::TITLE,
        controls,
        burnout_index: presenter::format_metric(metrics.burnout_index),
        total_stress:  presenter::format_metric(metrics.total_stress),
        outcome:       state.outcome().cloned(),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
    use tracing_subscriber::Layer;

    use crate::application::context::AssessmentContext;
    use crate::domain::schema::{AlignedRow, ColumnSchema};
    use crate::domain::traits::RiskClassifier;

    /// High risk whenever the burnout column exceeds 5
    struct BurnoutThreshold;

    impl RiskClassifier for BurnoutThreshold {
        fn kind(&self) -> &'static str { "threshold" }
        fn n_features(&self) -> usize { 1 }
        fn predict_proba(&self, row: &AlignedRow) -> Result<[f64; 2]> {
            Ok(if row.values()[0] > 5.0 { [0.1, 0.9] } else { [0.7, 0.3] })
        }
    }

    struct Broken;

    impl RiskClassifier for Broken {
        fn kind(&self) -> &'static str { "broken" }
        fn n_features(&self) -> usize { 1 }
        fn predict_proba(&self, _row: &AlignedRow) -> Result<[f64; 2]> {
            bail!("model exploded")
        }
    }

    fn context(classifier: Box<dyn RiskClassifier>) -> AssessmentContext {
        let schema = ColumnSchema::resolve(vec!["Burnout_Index".to_string()]).unwrap();
        AssessmentContext::new(schema, classifier)
    }

    #[test]
    fn test_initial_view_shows_defaults_and_metrics() {
        let v = view(&FormState::default());
        assert_eq!(v.title, presenter::TITLE);
        assert_eq!(v.controls.len(), 6);
        assert_eq!(v.controls[0].value, "3");
        assert_eq!(v.controls[4].value, "3.50");
        assert_eq!(v.controls[4].range, "0.00–10.00");
        assert!(v.controls[0].focused);
        assert_eq!(v.burnout_index, "4.50");
        assert_eq!(v.total_stress, "9.00");
        assert_eq!(v.outcome, None);
    }

    #[test]
    fn test_analyze_is_the_only_way_to_get_a_verdict() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::Increase, &use_case);
        assert!(s.outcome().is_none());

        s.apply(FormAction::Analyze, &use_case);
        // pressure 4, hours 6, satisfaction 3 → burnout 6 → high
        assert_eq!(
            s.outcome(),
            Some(&Outcome::Verdict(Verdict::HighRisk { probability: 0.9 }))
        );
    }

    #[test]
    fn test_input_change_clears_verdict() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::Analyze, &use_case);
        assert_eq!(
            s.outcome(),
            Some(&Outcome::Verdict(Verdict::LowRisk { probability: 0.3 }))
        );

        s.apply(FormAction::Decrease, &use_case);
        assert!(s.outcome().is_none());
        assert_eq!(view(&s).outcome, None);
    }

    #[test]
    fn test_edit_at_bound_keeps_verdict() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::ToMax, &use_case);
        s.apply(FormAction::Analyze, &use_case);
        s.apply(FormAction::Increase, &use_case);
        assert!(s.outcome().is_some());
        assert_eq!(s.profile().academic_pressure(), 5);
    }

    #[test]
    fn test_focus_wraps_and_targets_edits() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::FocusPrev, &use_case);
        assert_eq!(s.focus(), InputField::Age);
        s.apply(FormAction::DecreaseLarge, &use_case);
        assert_eq!(s.profile().age(), 18);

        s.apply(FormAction::FocusNext, &use_case);
        assert_eq!(s.focus(), InputField::AcademicPressure);
    }

    #[test]
    fn test_cgpa_large_step() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        for _ in 0..4 {
            s.apply(FormAction::FocusNext, &use_case);
        }
        assert_eq!(s.focus(), InputField::Cgpa);
        s.apply(FormAction::IncreaseLarge, &use_case);
        assert_eq!(s.profile().cgpa(), 3.6);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::ToMin, &use_case);
        s.apply(FormAction::Reset, &use_case);
        assert_eq!(*s.profile(), StudentProfile::default());
    }

    #[test]
    fn test_failed_analysis_is_shown_not_fatal() {
        let ctx      = context(Box::new(Broken));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::Analyze, &use_case);
        match s.outcome() {
            Some(Outcome::Failed(msg)) => assert!(msg.contains("model exploded")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!s.should_quit());
    }

    #[test]
    fn test_quit() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();
        s.apply(FormAction::Quit, &use_case);
        assert!(s.should_quit());
    }

    fn focus_on(s: &mut FormState, field: InputField, use_case: &AssessUseCase<'_>) {
        while s.focus() != field {
            s.apply(FormAction::FocusNext, use_case);
        }
    }

    fn type_text(s: &mut FormState, text: &str, use_case: &AssessUseCase<'_>) {
        for c in text.chars() {
            s.apply(FormAction::Digit(c), use_case);
        }
    }

    #[test]
    fn test_typed_cgpa_is_committed() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        focus_on(&mut s, InputField::Cgpa, &use_case);
        type_text(&mut s, "9.87", &use_case);
        assert_eq!(s.entry(), Some("9.87"));
        assert_eq!(s.profile().cgpa(), 3.5);

        s.apply(FormAction::Commit, &use_case);
        assert_eq!(s.profile().cgpa(), 9.87);
        assert!(!s.is_editing());
    }

    #[test]
    fn test_typed_value_is_clamped_and_snapped() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        focus_on(&mut s, InputField::Age, &use_case);
        type_text(&mut s, "99", &use_case);
        s.apply(FormAction::Commit, &use_case);
        assert_eq!(s.profile().age(), 35);

        focus_on(&mut s, InputField::Cgpa, &use_case);
        type_text(&mut s, "3.456", &use_case);
        s.apply(FormAction::Commit, &use_case);
        assert_eq!(s.profile().cgpa(), 3.46);

        focus_on(&mut s, InputField::Cgpa, &use_case);
        type_text(&mut s, "12", &use_case);
        s.apply(FormAction::Commit, &use_case);
        assert_eq!(s.profile().cgpa(), 10.0);
    }

    #[test]
    fn test_integer_field_ignores_decimal_point() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        type_text(&mut s, "4.", &use_case);
        assert_eq!(s.entry(), Some("4"));
        type_text(&mut s, "x", &use_case);
        assert_eq!(s.entry(), Some("4"));
    }

    #[test]
    fn test_leaving_a_field_commits_the_draft() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        type_text(&mut s, "5", &use_case);
        s.apply(FormAction::FocusNext, &use_case);
        assert_eq!(s.profile().academic_pressure(), 5);
        assert_eq!(s.focus(), InputField::StudyHours);
        assert!(!s.is_editing());
    }

    #[test]
    fn test_analyze_uses_the_pending_draft() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        // pressure 5, hours 6, satisfaction 3 → burnout 7.5 → high
        type_text(&mut s, "5", &use_case);
        s.apply(FormAction::Analyze, &use_case);
        assert_eq!(
            s.outcome(),
            Some(&Outcome::Verdict(Verdict::HighRisk { probability: 0.9 }))
        );
    }

    #[test]
    fn test_cancel_and_backspace() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        s.apply(FormAction::Analyze, &use_case);
        type_text(&mut s, "12", &use_case);
        s.apply(FormAction::Backspace, &use_case);
        assert_eq!(s.entry(), Some("1"));
        s.apply(FormAction::Backspace, &use_case);
        assert!(!s.is_editing());

        type_text(&mut s, "5", &use_case);
        s.apply(FormAction::Cancel, &use_case);
        assert!(!s.is_editing());
        assert_eq!(s.profile().academic_pressure(), 3);
        // nothing was stored, so the verdict stands
        assert!(s.outcome().is_some());
    }

    #[test]
    fn test_lone_decimal_point_is_dropped() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        focus_on(&mut s, InputField::Cgpa, &use_case);
        type_text(&mut s, ".", &use_case);
        s.apply(FormAction::Commit, &use_case);
        assert_eq!(s.profile().cgpa(), 3.5);
    }

    #[test]
    fn test_view_shows_the_draft_on_the_focused_control() {
        let ctx      = context(Box::new(BurnoutThreshold));
        let use_case = AssessUseCase::new(&ctx);
        let mut s    = FormState::default();

        focus_on(&mut s, InputField::Cgpa, &use_case);
        type_text(&mut s, "9.8", &use_case);
        let v = view(&s);
        assert_eq!(v.controls[4].value, "9.8_");
        assert!(v.controls[4].editing);
        assert!(!v.controls[0].editing);
        assert_eq!(v.controls[0].value, "3");
    }

    /// Counts events at INFO or louder
    struct LoudEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for LoudEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
            if *event.metadata().level() <= tracing::Level::INFO {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_failed_analysis_stays_off_the_terminal() {
        let ctx      = context(Box::new(Broken));
        let use_case = AssessUseCase::new(&ctx);
        let loud     = Arc::new(AtomicUsize::new(0));
        let sub      = tracing_subscriber::registry().with(LoudEvents(Arc::clone(&loud)));

        tracing::subscriber::with_default(sub, || {
            let mut s = FormState::default();
            type_text(&mut s, ".", &use_case);
            s.apply(FormAction::Analyze, &use_case);
            assert!(matches!(s.outcome(), Some(Outcome::Failed(_))));
        });
        assert_eq!(loud.load(Ordering::SeqCst), 0);
    }
}
