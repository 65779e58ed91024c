//! Guided finder wizards.
//!
//! A finder walks the shopper through a fixed sequence of questions and hands
//! the answers to the product listing as a [`ListingQuery`]. Both finders share
//! the [`Finder`] state machine; what differs (the questions, when a step counts
//! as answered, and the query they build) lives in a [`FinderFlow`].
//!
//! ```text
//! Step(1) --Next--> Step(2) --Next--> ... Step(N) --Next--> Submitted
//!    |  <--Back--     |
//!    +--Cancel--> Cancelled
//! ```

mod gift;
mod journal;

pub use gift::{GiftAnswer, GiftAnswers, OccasionSelection, BUDGET_DEFAULT, BUDGET_MAX, BUDGET_STEP};
pub use journal::{JournalAnswer, JournalAnswers};

use crate::search::ListingQuery;
use crate::FinderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Gift finder: occasion, recipient, gift types, budget.
pub type GiftFinder = Finder<GiftAnswers>;
/// Journal finder: journal type, audience, features.
pub type JournalFinder = Finder<JournalAnswers>;

/// Questions and answer slots of one finder variant.
pub trait FinderFlow: Default + Clone + fmt::Debug {
    /// Answer actions accepted by this variant.
    type Answer: Clone + fmt::Debug;

    /// Number of steps.
    const STEPS: u8;

    /// Variant name used in logs.
    fn variant() -> &'static str;

    /// Heading of a step (1-indexed).
    fn step_title(step: u8) -> &'static str;

    /// Step an answer belongs to.
    fn answer_step(answer: &Self::Answer) -> u8;

    /// Whether the step's required slot is filled. Optional steps are always complete.
    fn is_step_complete(&self, step: u8) -> bool;

    /// Store an answer, or reject a value the step does not offer.
    fn apply_answer(&mut self, answer: Self::Answer) -> Result<(), FinderError>;

    /// Listing query for the collected answers.
    fn build_query(&self) -> ListingQuery;
}

/// Where a finder is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinderStatus {
    /// On a step (1-indexed).
    Step(u8),
    /// Answers handed to the listing.
    Submitted,
    /// Closed from the first step.
    Cancelled,
}

/// Actions a finder accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderAction<A> {
    Next,
    Back,
    Cancel,
    Answer(A),
}

/// What an accepted action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved between steps.
    Moved { from: u8, to: u8 },
    /// Stored an answer on the current step.
    Answered { step: u8 },
    /// Finished; navigate to the listing with this query.
    Submitted(ListingQuery),
    /// Closed without submitting.
    Cancelled,
}

/// Step indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMarker {
    Completed,
    Current,
    Upcoming,
}

/// Wizard state machine over a [`FinderFlow`].
#[derive(Debug, Clone, PartialEq)]
pub struct Finder<F: FinderFlow> {
    status: FinderStatus,
    answers: F,
}

impl<F: FinderFlow> Default for Finder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FinderFlow> Finder<F> {
    /// Fresh finder on step 1.
    pub fn new() -> Self {
        Self {
            status: FinderStatus::Step(1),
            answers: F::default(),
        }
    }

    /// Apply an action. A rejected action leaves the finder unchanged.
    pub fn update(&mut self, action: FinderAction<F::Answer>) -> Result<Transition, FinderError> {
        let step = self.current_step().ok_or(FinderError::AlreadyFinished)?;

        match action {
            FinderAction::Next => {
                if !self.answers.is_step_complete(step) {
                    return Err(FinderError::StepIncomplete { step });
                }
                if step >= F::STEPS {
                    let query = self.answers.build_query();
                    self.status = FinderStatus::Submitted;
                    info!(finder = F::variant(), query = %query, "Finder submitted");
                    return Ok(Transition::Submitted(query));
                }
                self.status = FinderStatus::Step(step + 1);
                debug!(finder = F::variant(), from = step, to = step + 1, "Finder advanced");
                Ok(Transition::Moved { from: step, to: step + 1 })
            }
            FinderAction::Back => {
                if step <= 1 {
                    return Err(FinderError::NoPreviousStep);
                }
                self.status = FinderStatus::Step(step - 1);
                debug!(finder = F::variant(), from = step, to = step - 1, "Finder went back");
                Ok(Transition::Moved { from: step, to: step - 1 })
            }
            FinderAction::Cancel => {
                if step != 1 {
                    return Err(FinderError::CancelUnavailable { step });
                }
                self.status = FinderStatus::Cancelled;
                debug!(finder = F::variant(), "Finder cancelled");
                Ok(Transition::Cancelled)
            }
            FinderAction::Answer(answer) => {
                let expected = F::answer_step(&answer);
                if expected != step {
                    return Err(FinderError::WrongStep {
                        expected,
                        actual: step,
                    });
                }
                let mut answers = self.answers.clone();
                answers.apply_answer(answer)?;
                self.answers = answers;
                debug!(finder = F::variant(), step, "Finder answer stored");
                Ok(Transition::Answered { step })
            }
        }
    }

    /// Whether Next is enabled.
    pub fn can_proceed(&self) -> bool {
        self.current_step()
            .map(|step| self.answers.is_step_complete(step))
            .unwrap_or(false)
    }

    /// Current step, or `None` once finished.
    pub fn current_step(&self) -> Option<u8> {
        match self.status {
            FinderStatus::Step(step) => Some(step),
            _ => None,
        }
    }

    pub fn status(&self) -> FinderStatus {
        self.status
    }

    pub fn answers(&self) -> &F {
        &self.answers
    }

    pub fn total_steps(&self) -> u8 {
        F::STEPS
    }

    /// Heading of the current step.
    pub fn step_title(&self) -> Option<&'static str> {
        self.current_step().map(F::step_title)
    }

    /// Whether the current step is the last one (Next submits).
    pub fn is_last_step(&self) -> bool {
        self.current_step() == Some(F::STEPS)
    }

    pub fn is_submitted(&self) -> bool {
        self.status == FinderStatus::Submitted
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == FinderStatus::Cancelled
    }

    /// Marker for each step, first to last.
    pub fn progress(&self) -> Vec<StepMarker> {
        (1..=F::STEPS)
            .map(|i| match self.status {
                FinderStatus::Step(current) if i < current => StepMarker::Completed,
                FinderStatus::Step(current) if i == current => StepMarker::Current,
                FinderStatus::Step(_) | FinderStatus::Cancelled => StepMarker::Upcoming,
                FinderStatus::Submitted => StepMarker::Completed,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Feature, Recipient};

    type Action = FinderAction<JournalAnswer>;

    #[test]
    fn test_starts_on_step_one() {
        let finder = JournalFinder::default();
        assert_eq!(finder.status(), FinderStatus::Step(1));
        assert_eq!(finder.total_steps(), 3);
        assert!(!finder.can_proceed());
        assert_eq!(
            finder.progress(),
            vec![StepMarker::Current, StepMarker::Upcoming, StepMarker::Upcoming]
        );
    }

    #[test]
    fn test_next_blocked_leaves_state() {
        let mut finder = JournalFinder::default();
        let before = finder.clone();
        assert_eq!(
            finder.update(Action::Next),
            Err(FinderError::StepIncomplete { step: 1 })
        );
        assert_eq!(finder, before);
    }

    #[test]
    fn test_back_preserves_answers() {
        let mut finder = JournalFinder::default();
        finder
            .update(Action::Answer(JournalAnswer::JournalType(Category::WeeklyPrayerJournal)))
            .unwrap();
        assert_eq!(finder.update(Action::Next), Ok(Transition::Moved { from: 1, to: 2 }));
        assert_eq!(finder.update(Action::Back), Ok(Transition::Moved { from: 2, to: 1 }));
        assert_eq!(
            finder.answers().journal_type,
            Some(Category::WeeklyPrayerJournal)
        );
        assert!(finder.can_proceed());
    }

    #[test]
    fn test_back_on_first_step_rejected() {
        let mut finder = JournalFinder::default();
        assert_eq!(finder.update(Action::Back), Err(FinderError::NoPreviousStep));
    }

    #[test]
    fn test_cancel_only_on_first_step() {
        let mut finder = JournalFinder::default();
        finder
            .update(Action::Answer(JournalAnswer::JournalType(Category::DailyJournals)))
            .unwrap();
        finder.update(Action::Next).unwrap();
        assert_eq!(
            finder.update(Action::Cancel),
            Err(FinderError::CancelUnavailable { step: 2 })
        );

        finder.update(Action::Back).unwrap();
        assert_eq!(finder.update(Action::Cancel), Ok(Transition::Cancelled));
        assert!(finder.is_cancelled());
        assert_eq!(finder.update(Action::Next), Err(FinderError::AlreadyFinished));
    }

    #[test]
    fn test_answer_for_wrong_step_rejected() {
        let mut finder = JournalFinder::default();
        assert_eq!(
            finder.update(Action::Answer(JournalAnswer::ToggleFeature(Feature::GoalSetting))),
            Err(FinderError::WrongStep { expected: 3, actual: 1 })
        );
        assert!(finder.answers().features.is_empty());
    }

    #[test]
    fn test_full_run_submits() {
        let mut finder = JournalFinder::default();
        finder
            .update(Action::Answer(JournalAnswer::JournalType(Category::TeensPrayerJournal)))
            .unwrap();
        finder.update(Action::Next).unwrap();
        finder
            .update(Action::Answer(JournalAnswer::Audience(Recipient::ForTeens)))
            .unwrap();
        finder.update(Action::Next).unwrap();
        assert!(finder.is_last_step());
        assert_eq!(
            finder.progress(),
            vec![StepMarker::Completed, StepMarker::Completed, StepMarker::Current]
        );

        let Ok(Transition::Submitted(query)) = finder.update(Action::Next) else {
            panic!("expected submission");
        };
        assert_eq!(query.to_query_string(), "type=teens-prayer-journal&for=for-teens");
        assert!(finder.is_submitted());
        assert_eq!(finder.progress(), vec![StepMarker::Completed; 3]);
        assert!(!finder.can_proceed());
        assert_eq!(
            finder.update(Action::Answer(JournalAnswer::ToggleFeature(Feature::GoalSetting))),
            Err(FinderError::AlreadyFinished)
        );
    }
}
