//! Journal finder answers.

use crate::catalog::{Category, Feature, Recipient};
use crate::finder::FinderFlow;
use crate::search::{keys, ListingQuery};
use crate::FinderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Answer actions of the journal finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalAnswer {
    /// Step 1: pick a journal type.
    JournalType(Category),
    /// Step 2: pick who it is for.
    Audience(Recipient),
    /// Step 3: flip a feature.
    ToggleFeature(Feature),
}

/// Collected journal finder answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalAnswers {
    pub journal_type: Option<Category>,
    pub audience: Option<Recipient>,
    pub features: BTreeSet<Feature>,
}

impl FinderFlow for JournalAnswers {
    type Answer = JournalAnswer;

    const STEPS: u8 = 3;

    fn variant() -> &'static str {
        "journal"
    }

    fn step_title(step: u8) -> &'static str {
        match step {
            1 => "What type of journal?",
            2 => "Who is it for?",
            _ => "Preferred Features",
        }
    }

    fn answer_step(answer: &JournalAnswer) -> u8 {
        match answer {
            JournalAnswer::JournalType(_) => 1,
            JournalAnswer::Audience(_) => 2,
            JournalAnswer::ToggleFeature(_) => 3,
        }
    }

    fn is_step_complete(&self, step: u8) -> bool {
        match step {
            1 => self.journal_type.is_some(),
            2 => self.audience.is_some(),
            _ => true,
        }
    }

    fn apply_answer(&mut self, answer: JournalAnswer) -> Result<(), FinderError> {
        match answer {
            JournalAnswer::JournalType(category) => {
                if category.is_accessory() {
                    return Err(FinderError::InvalidChoice {
                        step: 1,
                        value: category.slug().to_string(),
                    });
                }
                self.journal_type = Some(category);
            }
            JournalAnswer::Audience(recipient) => {
                if !Recipient::JOURNAL_AUDIENCES.contains(&recipient) {
                    return Err(FinderError::InvalidChoice {
                        step: 2,
                        value: recipient.slug().to_string(),
                    });
                }
                self.audience = Some(recipient);
            }
            JournalAnswer::ToggleFeature(feature) => {
                if !self.features.remove(&feature) {
                    self.features.insert(feature);
                }
            }
        }
        Ok(())
    }

    fn build_query(&self) -> ListingQuery {
        let mut query = ListingQuery::new();
        if let Some(category) = self.journal_type {
            query.append(keys::KEY_TYPE, category.slug());
        }
        if let Some(audience) = self.audience {
            query.append(keys::KEY_FOR, audience.slug());
        }
        query.append_list(keys::KEY_FEATURES, self.features.iter().map(|f| f.slug()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::{FinderAction, JournalFinder};

    #[test]
    fn test_accessory_is_not_a_journal_type() {
        let mut finder = JournalFinder::default();
        let result = finder.update(FinderAction::Answer(JournalAnswer::JournalType(
            Category::GratitudeJars,
        )));
        assert_eq!(
            result,
            Err(FinderError::InvalidChoice {
                step: 1,
                value: "gratitude-jars".to_string()
            })
        );
        assert!(!finder.can_proceed());
    }

    #[test]
    fn test_audience_gate() {
        let mut answers = JournalAnswers::default();
        assert!(!answers.is_step_complete(2));
        assert!(answers
            .apply_answer(JournalAnswer::Audience(Recipient::ForHer))
            .is_err());
        answers
            .apply_answer(JournalAnswer::Audience(Recipient::ForFamily))
            .unwrap();
        assert!(answers.is_step_complete(2));
        assert!(answers.is_step_complete(3));
    }

    #[test]
    fn test_query_lists_features() {
        let mut answers = JournalAnswers::default();
        answers
            .apply_answer(JournalAnswer::JournalType(Category::PremiumDailyJournals))
            .unwrap();
        answers
            .apply_answer(JournalAnswer::Audience(Recipient::ForAdults))
            .unwrap();
        for feature in [Feature::PrayerTracking, Feature::ScriptureReferences, Feature::GoalSetting] {
            answers.apply_answer(JournalAnswer::ToggleFeature(feature)).unwrap();
        }
        answers
            .apply_answer(JournalAnswer::ToggleFeature(Feature::GoalSetting))
            .unwrap();

        assert_eq!(
            answers.build_query().to_query_string(),
            "type=premium-daily-journals&for=for-adults\
             &features=scripture-references%2Cprayer-tracking"
        );
    }
}
