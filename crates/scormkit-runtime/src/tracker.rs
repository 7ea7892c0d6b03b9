use tracing::debug;

use crate::state::RuntimeState;
use crate::status::{CompletionStatus, SuccessStatus};

/// The recognized runtime field names.
pub mod field {
    /// 1.2 combined status; the value decides which axis it updates.
    pub const LESSON_STATUS: &str = "cmi.core.lesson_status";
    /// 2004-style completion status.
    pub const COMPLETION_STATUS: &str = "cmi.completion_status";
    /// 2004-style success status.
    pub const SUCCESS_STATUS: &str = "cmi.success_status";
    /// Raw score, 1.2 spelling.
    pub const SCORE_RAW_12: &str = "cmi.core.score.raw";
    /// Raw score, 2004 spelling.
    pub const SCORE_RAW_2004: &str = "cmi.score.raw";
    /// 2004 progress measure; validated but not credited.
    pub const PROGRESS_MEASURE: &str = "cmi.progress_measure";
}

/// Grading configuration for one package placement.
#[derive(Clone, Copy, Debug)]
pub struct TrackerConfig {
    scored: bool,
    weight: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self {
            scored: true,
            weight: 1.0,
        }
    }

    /// Whether the package reports a numerical score. When false, raw
    /// score events are ignored and grade reporting is suppressed.
    pub fn scored(mut self, scored: bool) -> Self {
        self.scored = scored;
        self
    }

    /// Multiplier applied to the effective score; also the maximum grade.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub fn weight_value(&self) -> f64 {
        self.weight
    }
}

/// Outbound completion/grade publication channel.
///
/// Both calls are fire-and-forget notifications to the host.
pub trait HostChannel {
    fn report_completion(&mut self, fraction: f64);
    fn report_grade(&mut self, value: f64, max_value: f64);
}

/// Channel that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullChannel;

impl HostChannel for NullChannel {
    fn report_completion(&mut self, _fraction: f64) {}
    fn report_grade(&mut self, _value: f64, _max_value: f64) {}
}

/// What one applied event changed, mirrored back to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Applied {
    pub completion: Option<CompletionStatus>,
    pub success: Option<SuccessStatus>,
    pub grade: Option<f64>,
}

/// Reducer over runtime progress events.
///
/// Single writer per learner per package is assumed; a host allowing
/// concurrent sessions must serialize calls itself. Malformed values never
/// raise: a single bad field must not break an otherwise valid stream.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    config: TrackerConfig,
    state: RuntimeState,
}

impl ProgressTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_state(config, RuntimeState::default())
    }

    /// Resume from state the host persisted.
    pub fn with_state(config: TrackerConfig, state: RuntimeState) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn into_state(self) -> RuntimeState {
        self.state
    }

    /// Apply one named progress event.
    ///
    /// When success became passed or completion became completed in this
    /// call, a completion signal of 1.0 and then (for scored packages) the
    /// current grade go out on the channel. The side effects are
    /// edge-triggered: re-asserting an already-terminal value fires
    /// nothing.
    pub fn apply(&mut self, name: &str, value: &str, channel: &mut dyn HostChannel) -> Applied {
        let mut new_completion = None;
        let mut new_success = None;
        let mut new_score = None;

        match name {
            field::LESSON_STATUS => match value {
                "passed" | "failed" => new_success = SuccessStatus::parse(value),
                "completed" | "incomplete" => new_completion = CompletionStatus::parse(value),
                _ => {}
            },
            field::COMPLETION_STATUS => new_completion = CompletionStatus::parse(value),
            field::SUCCESS_STATUS => new_success = SuccessStatus::parse(value),
            field::SCORE_RAW_12 | field::SCORE_RAW_2004 if self.config.scored => {
                match value.parse::<f64>() {
                    Ok(raw) => new_score = Some(raw / 100.0),
                    Err(_) => debug!(name, value, "ignoring malformed raw score"),
                }
            }
            field::SCORE_RAW_12 | field::SCORE_RAW_2004 => {}
            field::PROGRESS_MEASURE => {
                // Validated only. Progress below 1.0 must not mark the
                // placement complete, so the measure is never credited.
                if value.parse::<f64>().is_err() {
                    debug!(name, value, "ignoring malformed progress measure");
                }
            }
            _ => {
                self.state
                    .data
                    .insert(name.to_owned(), value.to_owned());
            }
        }

        let mut applied = Applied::default();

        if let Some(score) = new_score {
            self.state.score = score;
            applied.grade = self.grade();
        }
        let completed_edge = new_completion == Some(CompletionStatus::Completed)
            && self.state.completion != CompletionStatus::Completed;
        if let Some(completion) = new_completion {
            self.state.completion = completion;
            applied.completion = Some(completion);
        }
        let passed_edge = new_success == Some(SuccessStatus::Passed)
            && self.state.success != SuccessStatus::Passed;
        if let Some(success) = new_success {
            self.state.success = success;
            applied.success = Some(success);
        }

        if passed_edge || completed_edge {
            channel.report_completion(1.0);
            if self.config.scored {
                if let Some(grade) = self.grade() {
                    channel.report_grade(grade, self.config.weight);
                }
            }
        }

        applied
    }

    /// Apply a batch of events left to right, side effects per event.
    pub fn apply_batch<I, N, V>(&mut self, events: I, channel: &mut dyn HostChannel) -> Vec<Applied>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        events
            .into_iter()
            .map(|(name, value)| self.apply(name.as_ref(), value.as_ref(), channel))
            .collect()
    }

    /// Reportable grade, or `None` for unscored packages.
    ///
    /// An effective score of exactly zero is substituted with 1.0:
    /// downstream completion tracking needs a non-zero grade to register
    /// the placement as complete, and a package that simply has not
    /// reported a score yet (or genuinely scored zero) must not block
    /// that crediting.
    pub fn grade(&self) -> Option<f64> {
        if !self.config.scored {
            return None;
        }
        let mut score = if self.state.success == SuccessStatus::Failed {
            0.0
        } else {
            self.state.score
        };
        if score == 0.0 {
            score = 1.0;
        }
        Some(score * self.config.weight)
    }

    /// Maximum possible grade; `None` for unscored packages.
    pub fn max_score(&self) -> Option<f64> {
        self.config.scored.then_some(self.config.weight)
    }

    /// Rescore utility: store an externally assigned raw grade back as the
    /// normalized score.
    pub fn set_score(&mut self, raw_earned: f64) {
        self.state.score = raw_earned / self.config.weight;
    }

    /// Read a field back through the same vocabulary the events use.
    ///
    /// The combined 1.2 status and the discrete 2004 fields read from the
    /// same two normalized fields; raw score reads back as score x 100;
    /// everything else comes from the free-form bag, empty when absent.
    pub fn get_value(&self, name: &str) -> String {
        match name {
            field::LESSON_STATUS | field::COMPLETION_STATUS => {
                self.state.completion.as_str().to_owned()
            }
            field::SUCCESS_STATUS => self.state.success.as_str().to_owned(),
            field::SCORE_RAW_12 | field::SCORE_RAW_2004 => {
                format_score(self.state.score * 100.0)
            }
            _ => self.state.data.get(name).cloned().unwrap_or_default(),
        }
    }
}

/// Render a score the way packages sent it: integral values without a
/// trailing fraction.
fn format_score(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Channel that records every notification, in order.
    #[derive(Default)]
    struct Recording {
        completions: Vec<f64>,
        grades: Vec<(f64, f64)>,
    }

    impl HostChannel for Recording {
        fn report_completion(&mut self, fraction: f64) {
            self.completions.push(fraction);
        }
        fn report_grade(&mut self, value: f64, max_value: f64) {
            self.grades.push((value, max_value));
        }
    }

    #[test]
    fn lesson_status_passed_sets_success_and_publishes() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        let applied = tracker.apply(field::LESSON_STATUS, "passed", &mut channel);

        assert_eq!(applied.success, Some(SuccessStatus::Passed));
        assert_eq!(tracker.state().success, SuccessStatus::Passed);
        assert_eq!(channel.completions, vec![1.0]);
        assert_eq!(channel.grades, vec![(1.0, 1.0)]);
    }

    #[test]
    fn lesson_status_completed_sets_completion() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        let applied = tracker.apply(field::LESSON_STATUS, "completed", &mut channel);

        assert_eq!(applied.completion, Some(CompletionStatus::Completed));
        assert_eq!(tracker.state().success, SuccessStatus::Unknown);
        assert_eq!(channel.completions, vec![1.0]);
    }

    #[test]
    fn lesson_status_incomplete_publishes_nothing() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::LESSON_STATUS, "incomplete", &mut channel);

        assert_eq!(tracker.state().completion, CompletionStatus::Incomplete);
        assert!(channel.completions.is_empty());
        assert!(channel.grades.is_empty());
    }

    #[test]
    fn discrete_2004_fields_update_their_own_axis() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::SUCCESS_STATUS, "failed", &mut channel);
        tracker.apply(field::COMPLETION_STATUS, "incomplete", &mut channel);

        assert_eq!(tracker.state().success, SuccessStatus::Failed);
        assert_eq!(tracker.state().completion, CompletionStatus::Incomplete);
        assert!(channel.completions.is_empty());
    }

    #[test]
    fn raw_score_normalized_and_read_back() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        let applied = tracker.apply(field::SCORE_RAW_12, "80", &mut channel);

        assert_eq!(tracker.state().score, 0.8);
        assert_eq!(applied.grade, Some(0.8));
        assert_eq!(tracker.get_value(field::SCORE_RAW_12), "80");
        assert_eq!(tracker.get_value(field::SCORE_RAW_2004), "80");
    }

    #[test]
    fn raw_score_ignored_when_unscored() {
        let mut tracker = ProgressTracker::new(TrackerConfig::new().scored(false));
        let mut channel = Recording::default();

        let applied = tracker.apply(field::SCORE_RAW_2004, "80", &mut channel);

        assert_eq!(tracker.state().score, 0.0);
        assert_eq!(applied.grade, None);
        // Not a recognized-for-this-config field, but not bag data either.
        assert_eq!(tracker.get_value("cmi.score.raw"), "0");
    }

    #[test]
    fn malformed_score_swallowed() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::SCORE_RAW_12, "eighty", &mut channel);

        assert_eq!(tracker.state().score, 0.0);
        assert!(tracker.state().data.is_empty());
    }

    #[test]
    fn malformed_progress_measure_swallowed() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::PROGRESS_MEASURE, "not-a-number", &mut channel);
        tracker.apply(field::PROGRESS_MEASURE, "0.5", &mut channel);

        assert_eq!(tracker.state(), &RuntimeState::default());
        assert!(channel.completions.is_empty());
    }

    #[test]
    fn unrecognized_field_goes_to_bag_verbatim() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply("x.custom.field", "hello", &mut channel);

        assert_eq!(tracker.get_value("x.custom.field"), "hello");
        assert_eq!(tracker.state().completion, CompletionStatus::NotAttempted);
        assert_eq!(tracker.state().score, 0.0);
        assert!(channel.completions.is_empty());
    }

    #[test]
    fn absent_bag_field_reads_empty() {
        let tracker = ProgressTracker::new(TrackerConfig::default());
        assert_eq!(tracker.get_value("cmi.suspend_data"), "");
    }

    #[test]
    fn completion_signal_fires_once_per_edge() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::SUCCESS_STATUS, "passed", &mut channel);
        tracker.apply(field::SUCCESS_STATUS, "passed", &mut channel);
        tracker.apply(field::LESSON_STATUS, "passed", &mut channel);

        assert_eq!(channel.completions.len(), 1);
        assert_eq!(channel.grades.len(), 1);
    }

    #[test]
    fn completion_then_passed_fires_twice() {
        // Two distinct edges, one per axis.
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::COMPLETION_STATUS, "completed", &mut channel);
        tracker.apply(field::SUCCESS_STATUS, "passed", &mut channel);

        assert_eq!(channel.completions.len(), 2);
    }

    #[test]
    fn grade_suppressed_for_unscored_package() {
        let mut tracker = ProgressTracker::new(TrackerConfig::new().scored(false));
        let mut channel = Recording::default();

        tracker.apply(field::LESSON_STATUS, "passed", &mut channel);

        assert_eq!(tracker.grade(), None);
        assert_eq!(tracker.max_score(), None);
        assert_eq!(channel.completions, vec![1.0]);
        assert!(channel.grades.is_empty());
    }

    #[test]
    fn failed_success_zeroes_score_then_substitution_applies() {
        let mut tracker = ProgressTracker::new(TrackerConfig::new().weight(5.0));
        let mut channel = Recording::default();

        tracker.apply(field::SCORE_RAW_12, "90", &mut channel);
        tracker.apply(field::SUCCESS_STATUS, "failed", &mut channel);

        // Failure forces the effective score to zero, which the
        // substitution rule lifts back to 1.0; never weight x 0.
        assert_eq!(tracker.grade(), Some(5.0));
    }

    #[test]
    fn zero_substitution_covers_score_before_completion() {
        // Packages publishing completion before score must still credit.
        let mut tracker = ProgressTracker::new(TrackerConfig::new().weight(2.0));
        let mut channel = Recording::default();

        tracker.apply(field::COMPLETION_STATUS, "completed", &mut channel);

        assert_eq!(channel.grades, vec![(2.0, 2.0)]);

        tracker.apply(field::SCORE_RAW_2004, "50", &mut channel);
        assert_eq!(tracker.grade(), Some(1.0));
    }

    #[test]
    fn batch_applies_left_to_right() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        let outcomes = tracker.apply_batch(
            [
                (field::SCORE_RAW_12, "70"),
                (field::LESSON_STATUS, "passed"),
            ],
            &mut channel,
        );

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].grade, Some(0.7));
        assert_eq!(outcomes[1].success, Some(SuccessStatus::Passed));
        // The grade published on the completion edge reflects the score
        // applied earlier in the same batch.
        assert_eq!(channel.grades, vec![(0.7, 1.0)]);
    }

    #[test]
    fn status_reads_mirror_both_vocabularies() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::LESSON_STATUS, "completed", &mut channel);
        tracker.apply(field::SUCCESS_STATUS, "passed", &mut channel);

        assert_eq!(tracker.get_value(field::LESSON_STATUS), "completed");
        assert_eq!(tracker.get_value(field::COMPLETION_STATUS), "completed");
        assert_eq!(tracker.get_value(field::SUCCESS_STATUS), "passed");
    }

    #[test]
    fn set_score_divides_by_weight() {
        let mut tracker = ProgressTracker::new(TrackerConfig::new().weight(4.0));
        tracker.set_score(3.0);
        assert_eq!(tracker.state().score, 0.75);
        assert_eq!(tracker.get_value(field::SCORE_RAW_12), "75");
    }

    #[test]
    fn resume_from_persisted_state() {
        let mut state = RuntimeState::default();
        state.score = 0.6;
        state.success = SuccessStatus::Passed;

        let tracker = ProgressTracker::with_state(TrackerConfig::new().weight(10.0), state);

        assert_eq!(tracker.grade(), Some(6.0));
        assert_eq!(tracker.get_value(field::SUCCESS_STATUS), "passed");
    }

    #[test]
    fn fractional_score_reads_back_without_noise() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::SCORE_RAW_12, "66.5", &mut channel);
        assert_eq!(tracker.get_value(field::SCORE_RAW_12), "66.5");
    }

    #[test]
    fn out_of_vocabulary_status_values_ignored() {
        let mut tracker = ProgressTracker::new(TrackerConfig::default());
        let mut channel = Recording::default();

        tracker.apply(field::COMPLETION_STATUS, "almost-done", &mut channel);
        tracker.apply(field::LESSON_STATUS, "browsed", &mut channel);

        assert_eq!(tracker.state().completion, CompletionStatus::NotAttempted);
        assert!(tracker.state().data.is_empty());
    }
}
