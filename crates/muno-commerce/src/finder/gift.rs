//! Gift finder answers.

use crate::catalog::{Category, GiftType, Occasion, Recipient};
use crate::finder::FinderFlow;
use crate::search::{keys, ListingQuery};
use crate::FinderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Starting budget.
pub const BUDGET_DEFAULT: u64 = 100_000;
/// Top of the budget slider.
pub const BUDGET_MAX: u64 = 300_000;
/// Budget slider step.
pub const BUDGET_STEP: u64 = 5_000;

/// Step 1 choice: a preset occasion or "other" with free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccasionSelection {
    Preset(Occasion),
    Other,
}

/// Answer actions of the gift finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftAnswer {
    /// Step 1: pick an occasion.
    Occasion(OccasionSelection),
    /// Step 1: text for the "other" occasion.
    CustomOccasion(String),
    /// Step 2: pick a recipient.
    Recipient(Recipient),
    /// Step 3: flip a gift type.
    ToggleGiftType(GiftType),
    /// Step 4: move the budget slider.
    Budget(u64),
}

/// Collected gift finder answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftAnswers {
    pub occasion: Option<OccasionSelection>,
    pub custom_occasion: String,
    pub recipient: Option<Recipient>,
    pub gift_types: BTreeSet<GiftType>,
    pub budget: u64,
}

impl Default for GiftAnswers {
    fn default() -> Self {
        Self {
            occasion: None,
            custom_occasion: String::new(),
            recipient: None,
            gift_types: BTreeSet::new(),
            budget: BUDGET_DEFAULT,
        }
    }
}

impl GiftAnswers {
    /// The chosen occasion, resolving "other" to its trimmed text.
    pub fn occasion(&self) -> Option<Occasion> {
        match self.occasion.as_ref()? {
            OccasionSelection::Preset(occasion) => Some(occasion.clone()),
            OccasionSelection::Other => Occasion::parse(&self.custom_occasion),
        }
    }

    /// Categories covered by the selected gift types.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.gift_types
            .iter()
            .flat_map(|g| g.categories().iter().copied())
            .collect()
    }
}

/// Clamp to the slider and snap to the nearest step.
fn snap_budget(value: u64) -> u64 {
    let clamped = value.min(BUDGET_MAX);
    ((clamped + BUDGET_STEP / 2) / BUDGET_STEP * BUDGET_STEP).min(BUDGET_MAX)
}

impl FinderFlow for GiftAnswers {
    type Answer = GiftAnswer;

    const STEPS: u8 = 4;

    fn variant() -> &'static str {
        "gift"
    }

    fn step_title(step: u8) -> &'static str {
        match step {
            1 => "What's the occasion?",
            2 => "Who's it for?",
            3 => "What kind of gift?",
            _ => "What's your budget?",
        }
    }

    fn answer_step(answer: &GiftAnswer) -> u8 {
        match answer {
            GiftAnswer::Occasion(_) | GiftAnswer::CustomOccasion(_) => 1,
            GiftAnswer::Recipient(_) => 2,
            GiftAnswer::ToggleGiftType(_) => 3,
            GiftAnswer::Budget(_) => 4,
        }
    }

    fn is_step_complete(&self, step: u8) -> bool {
        match step {
            1 => match &self.occasion {
                Some(OccasionSelection::Preset(_)) => true,
                Some(OccasionSelection::Other) => !self.custom_occasion.trim().is_empty(),
                None => false,
            },
            2 => self.recipient.is_some(),
            _ => true,
        }
    }

    fn apply_answer(&mut self, answer: GiftAnswer) -> Result<(), FinderError> {
        match answer {
            GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Custom(text))) => {
                return Err(FinderError::InvalidChoice { step: 1, value: text });
            }
            GiftAnswer::Occasion(selection) => self.occasion = Some(selection),
            GiftAnswer::CustomOccasion(text) => self.custom_occasion = text,
            GiftAnswer::Recipient(recipient) => {
                if !Recipient::GIFT_RECIPIENTS.contains(&recipient) {
                    return Err(FinderError::InvalidChoice {
                        step: 2,
                        value: recipient.slug().to_string(),
                    });
                }
                self.recipient = Some(recipient);
            }
            GiftAnswer::ToggleGiftType(gift_type) => {
                if !self.gift_types.remove(&gift_type) {
                    self.gift_types.insert(gift_type);
                }
            }
            GiftAnswer::Budget(value) => self.budget = snap_budget(value),
        }
        Ok(())
    }

    fn build_query(&self) -> ListingQuery {
        let mut query = ListingQuery::new();
        if let Some(occasion) = self.occasion() {
            query.append(keys::KEY_OCCASION, occasion.slug());
        }
        if let Some(recipient) = self.recipient {
            query.append(keys::KEY_RECIPIENT, recipient.slug());
        }
        query.append_list(keys::KEY_CATEGORY, self.categories().iter().map(|c| c.slug()));
        query.append(keys::KEY_PRICE_MAX, self.budget.to_string());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::{FinderAction, GiftFinder, Transition};

    type Action = FinderAction<GiftAnswer>;

    fn answer(finder: &mut GiftFinder, answer: GiftAnswer) {
        finder.update(Action::Answer(answer)).unwrap();
    }

    #[test]
    fn test_occasion_gate() {
        let mut finder = GiftFinder::default();
        assert!(!finder.can_proceed());

        answer(&mut finder, GiftAnswer::Occasion(OccasionSelection::Other));
        assert!(!finder.can_proceed());

        answer(&mut finder, GiftAnswer::CustomOccasion("   ".to_string()));
        assert!(!finder.can_proceed());

        answer(&mut finder, GiftAnswer::CustomOccasion("Retirement".to_string()));
        assert!(finder.can_proceed());

        answer(
            &mut finder,
            GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Wedding)),
        );
        assert!(finder.can_proceed());
    }

    #[test]
    fn test_preset_custom_rejected() {
        let mut finder = GiftFinder::default();
        let result = finder.update(Action::Answer(GiftAnswer::Occasion(
            OccasionSelection::Preset(Occasion::Custom("x".to_string())),
        )));
        assert!(matches!(result, Err(FinderError::InvalidChoice { step: 1, .. })));
        assert_eq!(finder.answers().occasion, None);
    }

    #[test]
    fn test_recipient_must_be_offered() {
        let mut finder = GiftFinder::default();
        answer(
            &mut finder,
            GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Birthday)),
        );
        finder.update(Action::Next).unwrap();
        assert!(matches!(
            finder.update(Action::Answer(GiftAnswer::Recipient(Recipient::ForAdults))),
            Err(FinderError::InvalidChoice { step: 2, .. })
        ));
        answer(&mut finder, GiftAnswer::Recipient(Recipient::ForHim));
        assert!(finder.can_proceed());
    }

    #[test]
    fn test_budget_snaps_and_clamps() {
        assert_eq!(snap_budget(0), 0);
        assert_eq!(snap_budget(52_400), 50_000);
        assert_eq!(snap_budget(52_500), 55_000);
        assert_eq!(snap_budget(1_000_000), BUDGET_MAX);
    }

    #[test]
    fn test_full_run_query() {
        let mut finder = GiftFinder::default();
        answer(
            &mut finder,
            GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Anniversary)),
        );
        finder.update(Action::Next).unwrap();
        answer(&mut finder, GiftAnswer::Recipient(Recipient::ForCouples));
        finder.update(Action::Next).unwrap();
        // Step 3 is optional.
        assert!(finder.can_proceed());
        answer(&mut finder, GiftAnswer::ToggleGiftType(GiftType::PrayerBoxes));
        answer(&mut finder, GiftAnswer::ToggleGiftType(GiftType::VerseCards));
        finder.update(Action::Next).unwrap();
        answer(&mut finder, GiftAnswer::Budget(150_000));

        let Ok(Transition::Submitted(query)) = finder.update(Action::Next) else {
            panic!("expected submission");
        };
        assert_eq!(
            query.to_query_string(),
            "occasion=anniversary&recipient=for-couples\
             &category=timeless-prayer-box%2Calphabetical-verse-cards&priceMax=150000"
        );
    }

    #[test]
    fn test_custom_occasion_emitted_trimmed() {
        let answers = GiftAnswers {
            occasion: Some(OccasionSelection::Other),
            custom_occasion: "  baby shower ".to_string(),
            recipient: Some(Recipient::ForFriends),
            ..GiftAnswers::default()
        };
        assert_eq!(
            answers.build_query().to_query_string(),
            "occasion=baby+shower&recipient=for-friends&priceMax=100000"
        );
    }
}
