//! Closed vocabularies shared by products, filters, finders and query strings.
//!
//! Every value has a wire slug (what appears in a listing query string and in
//! serialized data) and a display label.

use crate::UnknownSlug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Macro to generate a closed slug-carrying enum.
macro_rules! define_slug_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($slug:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $slug)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire slug.
            pub fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Look up a value by slug.
            pub fn from_slug(slug: &str) -> Option<Self> {
                match slug.trim() {
                    $($slug => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownSlug;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_slug(s).ok_or_else(|| UnknownSlug(s.to_string()))
            }
        }
    };
}

define_slug_enum! {
    /// Product category: a journal type or an accessory line.
    Category {
        DailyJournals => ("daily-journals", "Daily Journals"),
        PremiumDailyJournals => ("premium-daily-journals", "Premium Daily Journals"),
        KidsPrayerJournal => ("kids-prayer-journal", "Kids Prayer Journals"),
        WeeklyPrayerJournal => ("weekly-prayer-journal", "Weekly Prayer Journals"),
        TeensPrayerJournal => ("teens-prayer-journal", "Teens Prayer Journals"),
        TimelessPrayerBox => ("timeless-prayer-box", "Timeless Prayer Boxes"),
        AlphabeticalVerseCards => ("alphabetical-verse-cards", "Alphabetical Verse Cards"),
        JournalPersonalisation => ("journal-personalisation", "Journal Personalisation"),
        JournalBookmarks => ("journal-bookmarks", "Journal Bookmarks"),
        JournalSupplies => ("journal-supplies", "Journal Supplies"),
        GratitudeJars => ("gratitude-jars", "Gratitude Jars"),
    }
}

impl Category {
    /// Journal types.
    pub const JOURNAL_TYPES: &'static [Category] = &[
        Category::DailyJournals,
        Category::PremiumDailyJournals,
        Category::KidsPrayerJournal,
        Category::WeeklyPrayerJournal,
        Category::TeensPrayerJournal,
        Category::TimelessPrayerBox,
    ];

    /// Accessory lines.
    pub const ACCESSORIES: &'static [Category] = &[
        Category::AlphabeticalVerseCards,
        Category::JournalPersonalisation,
        Category::JournalBookmarks,
        Category::JournalSupplies,
        Category::GratitudeJars,
    ];

    /// Whether this is an accessory rather than a journal type.
    pub fn is_accessory(&self) -> bool {
        Self::ACCESSORIES.contains(self)
    }
}

define_slug_enum! {
    /// Who a product is meant for.
    Recipient {
        ForAdults => ("for-adults", "For Adults"),
        ForTeens => ("for-teens", "For Teens"),
        ForKids => ("for-kids", "For Kids"),
        ForCouples => ("for-couples", "For Couples"),
        ForFamily => ("for-family", "For Family"),
        ForHer => ("for-her", "For Her"),
        ForHim => ("for-him", "For Him"),
        ForFriends => ("for-friends", "For Friends"),
    }
}

impl Recipient {
    /// Audiences offered by the journal finder and the listing's "for whom" filter.
    pub const JOURNAL_AUDIENCES: &'static [Recipient] = &[
        Recipient::ForAdults,
        Recipient::ForTeens,
        Recipient::ForKids,
        Recipient::ForCouples,
        Recipient::ForFamily,
    ];

    /// Recipients offered by the gift finder.
    pub const GIFT_RECIPIENTS: &'static [Recipient] = &[
        Recipient::ForHer,
        Recipient::ForHim,
        Recipient::ForCouples,
        Recipient::ForKids,
        Recipient::ForFriends,
        Recipient::ForFamily,
    ];
}

define_slug_enum! {
    /// Journal feature tag.
    Feature {
        ScriptureReferences => ("scripture-references", "Scripture References"),
        GratitudeSection => ("gratitude-section", "Gratitude Section"),
        ReflectionPrompts => ("reflection-prompts", "Reflection Prompts"),
        GoalSetting => ("goal-setting", "Goal Setting"),
        MonthlyThemes => ("monthly-themes", "Monthly Themes"),
        PrayerTracking => ("prayer-tracking", "Prayer Tracking"),
    }
}

define_slug_enum! {
    /// Kind of gift picked on the gift finder's third step.
    GiftType {
        Journals => ("journals", "Prayer Journals"),
        Accessories => ("accessories", "Journal Accessories"),
        VerseCards => ("verse-cards", "Verse Cards"),
        PrayerBoxes => ("prayer-boxes", "Prayer Boxes"),
        Personalized => ("personalized", "Personalized Gifts"),
    }
}

impl GiftType {
    /// Catalog categories this gift type stands for.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            GiftType::Journals => &[
                Category::DailyJournals,
                Category::PremiumDailyJournals,
                Category::KidsPrayerJournal,
                Category::WeeklyPrayerJournal,
                Category::TeensPrayerJournal,
            ],
            GiftType::Accessories => &[
                Category::JournalBookmarks,
                Category::JournalSupplies,
                Category::GratitudeJars,
            ],
            GiftType::VerseCards => &[Category::AlphabeticalVerseCards],
            GiftType::PrayerBoxes => &[Category::TimelessPrayerBox],
            GiftType::Personalized => &[Category::JournalPersonalisation],
        }
    }
}

/// Occasion a product suits, or the free-text occasion typed into the gift finder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Occasion {
    Birthday,
    Anniversary,
    Wedding,
    Graduation,
    Housewarming,
    ThankYou,
    Congratulations,
    /// Anything else, kept verbatim (trimmed).
    Custom(String),
}

impl Occasion {
    /// The preset occasions, in display order.
    pub fn presets() -> [Occasion; 7] {
        [
            Occasion::Birthday,
            Occasion::Anniversary,
            Occasion::Wedding,
            Occasion::Graduation,
            Occasion::Housewarming,
            Occasion::ThankYou,
            Occasion::Congratulations,
        ]
    }

    /// Wire slug. Custom occasions use their text.
    pub fn slug(&self) -> &str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::Anniversary => "anniversary",
            Occasion::Wedding => "wedding",
            Occasion::Graduation => "graduation",
            Occasion::Housewarming => "housewarming",
            Occasion::ThankYou => "thank-you",
            Occasion::Congratulations => "congratulations",
            Occasion::Custom(text) => text,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Anniversary => "Anniversary",
            Occasion::Wedding => "Wedding",
            Occasion::Graduation => "Graduation",
            Occasion::Housewarming => "Housewarming",
            Occasion::ThankYou => "Thank You",
            Occasion::Congratulations => "Congratulations",
            Occasion::Custom(text) => text,
        }
    }

    /// Preset for a known slug; `None` otherwise.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::presets().into_iter().find(|o| o.slug() == slug.trim())
    }

    /// Preset for a known slug, otherwise a custom occasion. Blank input is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self::from_slug(value).unwrap_or_else(|| Occasion::Custom(value.to_string())))
    }

    /// Whether this is free text rather than a preset.
    pub fn is_custom(&self) -> bool {
        matches!(self, Occasion::Custom(_))
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Occasion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Occasion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Occasion::parse(&raw).ok_or_else(|| serde::de::Error::custom("occasion must not be blank"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug_lookup() {
        assert_eq!(
            Category::from_slug("kids-prayer-journal"),
            Some(Category::KidsPrayerJournal)
        );
        assert_eq!(Category::from_slug("books"), None);
        assert_eq!("gratitude-jars".parse::<Category>(), Ok(Category::GratitudeJars));
    }

    #[test]
    fn test_category_groups_partition_all() {
        assert_eq!(
            Category::JOURNAL_TYPES.len() + Category::ACCESSORIES.len(),
            Category::ALL.len()
        );
        assert!(Category::JOURNAL_TYPES.iter().all(|c| !c.is_accessory()));
        assert!(Category::ACCESSORIES.iter().all(|c| c.is_accessory()));
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&Recipient::ForCouples).unwrap();
        assert_eq!(json, "\"for-couples\"");
        let feature: Feature = serde_json::from_str("\"goal-setting\"").unwrap();
        assert_eq!(feature, Feature::GoalSetting);
    }

    #[test]
    fn test_gift_types_map_to_categories() {
        assert_eq!(GiftType::PrayerBoxes.categories(), &[Category::TimelessPrayerBox]);
        let mapped: usize = GiftType::ALL.iter().map(|g| g.categories().len()).sum();
        assert_eq!(mapped, Category::ALL.len());
    }

    #[test]
    fn test_occasion_parse() {
        assert_eq!(Occasion::parse("thank-you"), Some(Occasion::ThankYou));
        assert_eq!(
            Occasion::parse("  baby shower "),
            Some(Occasion::Custom("baby shower".to_string()))
        );
        assert_eq!(Occasion::parse("   "), None);
        assert_eq!(Occasion::from_slug("baby shower"), None);
    }

    #[test]
    fn test_occasion_serde_round_trips_custom_text() {
        let custom = Occasion::Custom("retirement".to_string());
        let json = serde_json::to_string(&custom).unwrap();
        assert_eq!(json, "\"retirement\"");
        let back: Occasion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, custom);
    }
}
