//! Gift and journal finder wizards.

use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, MultiSelect, Select};
use muno_commerce::catalog::{Category, Feature, GiftType, Occasion, Recipient, UnknownSlug};
use muno_commerce::finder::{
    Finder, FinderAction, FinderFlow, GiftAnswer, GiftAnswers, JournalAnswer, JournalAnswers,
    OccasionSelection, Transition,
};
use muno_commerce::search::ListingQuery;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{browse, FinderArgs, FinderKind, FinderRunArgs};
use crate::context::Context;
use crate::output::progress_markers;

/// Run the finder command.
pub async fn run(args: FinderArgs, ctx: &Context) -> Result<()> {
    let (view, run_args, query) = match args.kind {
        FinderKind::Gift(run_args) => {
            let query = collect::<GiftAnswers>(&run_args, ctx)?;
            ("gift-finder", run_args, query)
        }
        FinderKind::Journal(run_args) => {
            let query = collect::<JournalAnswers>(&run_args, ctx)?;
            ("journal-finder", run_args, query)
        }
    };

    let logger = ctx.logger.for_view(view);
    let Some(query) = query else {
        logger.info("Finder cancelled");
        ctx.output.warn("Finder cancelled");
        return Ok(());
    };
    logger
        .info_builder("Finder submitted")
        .field("path", query.to_path())
        .emit();

    if run_args.no_browse {
        if ctx.output.is_json() {
            ctx.output.json(&FinderReport {
                path: query.to_path(),
                params: query.params(),
            });
        } else {
            println!("{}", query.to_path());
        }
        return Ok(());
    }

    ctx.output.success(&format!("Opening {}", query.to_path()));
    let listing = browse::open_listing(&query, ctx).await?;
    browse::render(&listing, ctx);

    Ok(())
}

#[derive(Serialize)]
struct FinderReport<'a> {
    path: String,
    params: &'a [(String, String)],
}

/// Drive a finder from an answer file or the terminal. `None` when cancelled.
fn collect<F: TerminalFlow>(args: &FinderRunArgs, ctx: &Context) -> Result<Option<ListingQuery>> {
    let mut finder = Finder::<F>::new();
    match &args.answers {
        Some(path) => {
            let path = ctx.resolve_path(path);
            let path = path.to_string_lossy();
            let steps = F::steps_from_file(&path)?;
            replay(&mut finder, steps).map(Some)
        }
        None => prompt_loop(&mut finder, ctx),
    }
}

/// Feed each step's answers, pressing Next after each step.
fn replay<F: FinderFlow>(
    finder: &mut Finder<F>,
    steps: Vec<Vec<F::Answer>>,
) -> Result<ListingQuery> {
    for answers in steps {
        for answer in answers {
            finder.update(FinderAction::Answer(answer))?;
        }
        if let Transition::Submitted(query) = finder.update(FinderAction::Next)? {
            return Ok(query);
        }
    }
    bail!("Answer file ended before the last step")
}

fn prompt_loop<F: TerminalFlow>(
    finder: &mut Finder<F>,
    ctx: &Context,
) -> Result<Option<ListingQuery>> {
    while let Some(step) = finder.current_step() {
        ctx.output.header(&format!(
            "{}  {}",
            progress_markers(&finder.progress()),
            F::step_title(step)
        ));

        let transition = match F::prompt(step, finder.answers())? {
            Prompt::Back => finder.update(FinderAction::Back)?,
            Prompt::Cancel => finder.update(FinderAction::Cancel)?,
            Prompt::Answer(answers) => {
                for answer in answers {
                    if let Err(e) = finder.update(FinderAction::Answer(answer)) {
                        ctx.output.warn(&e.to_string());
                    }
                }
                match finder.update(FinderAction::Next) {
                    Ok(transition) => transition,
                    Err(e) => {
                        ctx.output.warn(&e.to_string());
                        continue;
                    }
                }
            }
        };
        ctx.output.debug(&format!("{:?}", transition));

        match transition {
            Transition::Submitted(query) => return Ok(Some(query)),
            Transition::Cancelled => return Ok(None),
            Transition::Moved { .. } | Transition::Answered { .. } => {}
        }
    }
    Ok(None)
}

/// What the shopper did at one prompt.
enum Prompt<A> {
    Answer(Vec<A>),
    Back,
    Cancel,
}

/// A finder the terminal can run.
trait TerminalFlow: FinderFlow {
    /// Ask the question for `step`, starting from the current answers.
    fn prompt(step: u8, answers: &Self) -> Result<Prompt<Self::Answer>>;

    /// Per-step answers read from a TOML or JSON file.
    fn steps_from_file(path: &str) -> Result<Vec<Vec<Self::Answer>>>;
}

const CONTINUE: &str = "Continue";
const BACK: &str = "← Back";
const CANCEL: &str = "Cancel";
const OTHER: &str = "Something else...";

/// Answer file for the gift finder.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GiftAnswerFile {
    /// Preset slug or free text.
    occasion: String,
    recipient: Option<String>,
    gift_types: Vec<String>,
    budget: Option<u64>,
}

impl GiftAnswerFile {
    fn into_steps(self) -> Result<Vec<Vec<GiftAnswer>>> {
        let occasion = match Occasion::parse(&self.occasion) {
            None => vec![],
            Some(occasion) if occasion.is_custom() => vec![
                GiftAnswer::Occasion(OccasionSelection::Other),
                GiftAnswer::CustomOccasion(self.occasion.clone()),
            ],
            Some(occasion) => vec![GiftAnswer::Occasion(OccasionSelection::Preset(occasion))],
        };
        let recipient = self
            .recipient
            .as_deref()
            .map(|slug| parse_slug::<Recipient>("recipient", slug))
            .transpose()?
            .map(GiftAnswer::Recipient)
            .into_iter()
            .collect();
        let gift_types = self
            .gift_types
            .iter()
            .map(|slug| parse_slug::<GiftType>("gift type", slug).map(GiftAnswer::ToggleGiftType))
            .collect::<Result<Vec<_>>>()?;
        let budget = self.budget.map(GiftAnswer::Budget).into_iter().collect();

        Ok(vec![occasion, recipient, gift_types, budget])
    }
}

impl TerminalFlow for GiftAnswers {
    fn prompt(step: u8, answers: &Self) -> Result<Prompt<GiftAnswer>> {
        match step {
            1 => {
                let presets = Occasion::presets();
                let mut items: Vec<&str> = presets.iter().map(|o| o.label()).collect();
                items.push(OTHER);
                items.push(CANCEL);
                let current = match &answers.occasion {
                    Some(OccasionSelection::Preset(o)) => presets.iter().position(|p| p == o),
                    Some(OccasionSelection::Other) => Some(presets.len()),
                    None => None,
                };

                let choice = select(&items, current)?;
                if choice < presets.len() {
                    let occasion = presets[choice].clone();
                    Ok(Prompt::Answer(vec![GiftAnswer::Occasion(
                        OccasionSelection::Preset(occasion),
                    )]))
                } else if choice == presets.len() {
                    let text: String = Input::new()
                        .with_prompt("Tell us the occasion")
                        .with_initial_text(answers.custom_occasion.clone())
                        .allow_empty(true)
                        .interact_text()?;
                    Ok(Prompt::Answer(vec![
                        GiftAnswer::Occasion(OccasionSelection::Other),
                        GiftAnswer::CustomOccasion(text),
                    ]))
                } else {
                    Ok(Prompt::Cancel)
                }
            }
            2 => {
                let options = Recipient::GIFT_RECIPIENTS;
                let current = answers
                    .recipient
                    .and_then(|r| options.iter().position(|o| *o == r));
                Ok(match select_or_back(options, current, |r| r.label())? {
                    Some(recipient) => Prompt::Answer(vec![GiftAnswer::Recipient(recipient)]),
                    None => Prompt::Back,
                })
            }
            3 => continue_or_back(|| {
                let chosen = multi_select(GiftType::ALL, &answers.gift_types, |g| g.label())?;
                Ok(toggles(GiftType::ALL, &answers.gift_types, &chosen)
                    .into_iter()
                    .map(GiftAnswer::ToggleGiftType)
                    .collect())
            }),
            _ => continue_or_back(|| {
                let budget: u64 = Input::new()
                    .with_prompt("Maximum budget")
                    .default(answers.budget)
                    .interact_text()?;
                Ok(vec![GiftAnswer::Budget(budget)])
            }),
        }
    }

    fn steps_from_file(path: &str) -> Result<Vec<Vec<GiftAnswer>>> {
        load_answers::<GiftAnswerFile>(path)?.into_steps()
    }
}

/// Answer file for the journal finder.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JournalAnswerFile {
    journal_type: Option<String>,
    audience: Option<String>,
    features: Vec<String>,
}

impl JournalAnswerFile {
    fn into_steps(self) -> Result<Vec<Vec<JournalAnswer>>> {
        let journal_type = self
            .journal_type
            .as_deref()
            .map(|slug| parse_slug::<Category>("journal type", slug))
            .transpose()?
            .map(JournalAnswer::JournalType)
            .into_iter()
            .collect();
        let audience = self
            .audience
            .as_deref()
            .map(|slug| parse_slug::<Recipient>("audience", slug))
            .transpose()?
            .map(JournalAnswer::Audience)
            .into_iter()
            .collect();
        let features = self
            .features
            .iter()
            .map(|slug| parse_slug::<Feature>("feature", slug).map(JournalAnswer::ToggleFeature))
            .collect::<Result<Vec<_>>>()?;

        Ok(vec![journal_type, audience, features])
    }
}

impl TerminalFlow for JournalAnswers {
    fn prompt(step: u8, answers: &Self) -> Result<Prompt<JournalAnswer>> {
        match step {
            1 => {
                let options = Category::JOURNAL_TYPES;
                let mut items: Vec<&str> = options.iter().map(|c| c.label()).collect();
                items.push(CANCEL);
                let current = answers
                    .journal_type
                    .and_then(|c| options.iter().position(|o| *o == c));

                let choice = select(&items, current)?;
                Ok(match options.get(choice) {
                    Some(category) => Prompt::Answer(vec![JournalAnswer::JournalType(*category)]),
                    None => Prompt::Cancel,
                })
            }
            2 => {
                let options = Recipient::JOURNAL_AUDIENCES;
                let current = answers
                    .audience
                    .and_then(|r| options.iter().position(|o| *o == r));
                Ok(match select_or_back(options, current, |r| r.label())? {
                    Some(audience) => Prompt::Answer(vec![JournalAnswer::Audience(audience)]),
                    None => Prompt::Back,
                })
            }
            _ => continue_or_back(|| {
                let chosen = multi_select(Feature::ALL, &answers.features, |f| f.label())?;
                Ok(toggles(Feature::ALL, &answers.features, &chosen)
                    .into_iter()
                    .map(JournalAnswer::ToggleFeature)
                    .collect())
            }),
        }
    }

    fn steps_from_file(path: &str) -> Result<Vec<Vec<JournalAnswer>>> {
        load_answers::<JournalAnswerFile>(path)?.into_steps()
    }
}

fn select(items: &[&str], current: Option<usize>) -> Result<usize> {
    Ok(Select::new()
        .items(items)
        .default(current.unwrap_or(0))
        .interact()?)
}

/// Single choice with a trailing Back entry. `None` means Back.
fn select_or_back<T: Copy>(
    options: &[T],
    current: Option<usize>,
    label: impl Fn(&T) -> &'static str,
) -> Result<Option<T>> {
    let mut items: Vec<&str> = options.iter().map(label).collect();
    items.push(BACK);
    let choice = select(&items, current)?;
    Ok(options.get(choice).copied())
}

/// Continue/Back choice ahead of a prompt that has no Back entry of its own.
fn continue_or_back<A>(ask: impl FnOnce() -> Result<Vec<A>>) -> Result<Prompt<A>> {
    let choice = select(&[CONTINUE, BACK], None)?;
    after_continue_or_back(choice, ask)
}

/// Choice 0 runs `ask`; any other choice is Back.
fn after_continue_or_back<A>(
    choice: usize,
    ask: impl FnOnce() -> Result<Vec<A>>,
) -> Result<Prompt<A>> {
    if choice == 0 {
        ask().map(Prompt::Answer)
    } else {
        Ok(Prompt::Back)
    }
}

fn multi_select<T: Ord>(
    options: &[T],
    selected: &BTreeSet<T>,
    label: impl Fn(&T) -> &'static str,
) -> Result<Vec<usize>> {
    let items: Vec<&str> = options.iter().map(label).collect();
    let defaults: Vec<bool> = options.iter().map(|o| selected.contains(o)).collect();
    Ok(MultiSelect::new()
        .with_prompt("Space to toggle, Enter to continue")
        .items(&items)
        .defaults(&defaults)
        .interact()?)
}

/// Options whose selection differs between `current` and the `chosen` indices.
fn toggles<T: Copy + Ord>(options: &[T], current: &BTreeSet<T>, chosen: &[usize]) -> Vec<T> {
    options
        .iter()
        .enumerate()
        .filter(|(i, option)| current.contains(*option) != chosen.contains(i))
        .map(|(_, option)| *option)
        .collect()
}

fn parse_slug<T: FromStr<Err = UnknownSlug>>(field: &str, slug: &str) -> Result<T> {
    slug.parse()
        .with_context(|| format!("Invalid {} in answer file", field))
}

fn load_answers<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answer file: {}", path))?;

    if path.ends_with(".json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON answers: {}", path))
    } else {
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML answers: {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muno_commerce::search::keys;

    #[test]
    fn test_toggles_diff_selection() {
        let current: BTreeSet<_> = [Feature::GoalSetting].into_iter().collect();
        let chosen = [0, 1];
        let flipped = toggles(&Feature::ALL[..4], &current, &chosen);
        assert_eq!(
            flipped,
            vec![
                Feature::ALL[0],
                Feature::ALL[1],
                Feature::GoalSetting
            ]
        );
    }

    #[test]
    fn test_gift_file_replays_to_query() {
        let file: GiftAnswerFile = toml::from_str(
            r#"
            occasion = "birthday"
            recipient = "for-her"
            gift_types = ["verse-cards"]
            budget = 100000
            "#,
        )
        .unwrap();
        let mut finder = Finder::<GiftAnswers>::new();
        let query = replay(&mut finder, file.into_steps().unwrap()).unwrap();

        assert!(finder.is_submitted());
        assert_eq!(query.get(keys::KEY_OCCASION), Some("birthday"));
        assert_eq!(query.get(keys::KEY_RECIPIENT), Some("for-her"));
        assert_eq!(query.get(keys::KEY_CATEGORY), Some("alphabetical-verse-cards"));
        assert_eq!(query.get(keys::KEY_PRICE_MAX), Some("100000"));
    }

    #[test]
    fn test_gift_file_free_text_occasion() {
        let file: GiftAnswerFile =
            toml::from_str("occasion = \"Retirement\"\nrecipient = \"for-him\"\n").unwrap();
        let mut finder = Finder::<GiftAnswers>::new();
        let query = replay(&mut finder, file.into_steps().unwrap()).unwrap();
        assert_eq!(query.get(keys::KEY_OCCASION), Some("Retirement"));
    }

    #[test]
    fn test_gift_file_missing_occasion_stops_on_step_one() {
        let file: GiftAnswerFile = toml::from_str("recipient = \"for-her\"\n").unwrap();
        let mut finder = Finder::<GiftAnswers>::new();
        let err = replay(&mut finder, file.into_steps().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Step 1 is missing a required answer");
        assert_eq!(finder.current_step(), Some(1));
    }

    #[test]
    fn test_journal_file_replays_to_query() {
        let file: JournalAnswerFile = serde_json::from_str(
            r#"{"journal_type": "kids-prayer-journal", "audience": "for-kids", "features": ["goal-setting"]}"#,
        )
        .unwrap();
        let mut finder = Finder::<JournalAnswers>::new();
        let query = replay(&mut finder, file.into_steps().unwrap()).unwrap();
        assert_eq!(
            query.to_query_string(),
            "type=kids-prayer-journal&for=for-kids&features=goal-setting"
        );
    }

    #[test]
    fn test_journal_file_unknown_slug() {
        let file = JournalAnswerFile {
            journal_type: Some("diary".to_string()),
            ..JournalAnswerFile::default()
        };
        let err = file.into_steps().unwrap_err();
        assert_eq!(err.to_string(), "Invalid journal type in answer file");
    }

    #[test]
    fn test_back_from_gift_step_three() {
        let mut finder = Finder::<GiftAnswers>::new();
        finder
            .update(FinderAction::Answer(GiftAnswer::Occasion(
                OccasionSelection::Preset(Occasion::Birthday),
            )))
            .unwrap();
        finder.update(FinderAction::Next).unwrap();
        finder
            .update(FinderAction::Answer(GiftAnswer::Recipient(Recipient::ForHer)))
            .unwrap();
        finder.update(FinderAction::Next).unwrap();
        assert_eq!(finder.current_step(), Some(3));

        let prompt = after_continue_or_back::<GiftAnswer>(1, || bail!("step prompt not shown"));
        assert!(matches!(prompt, Ok(Prompt::Back)));
        finder.update(FinderAction::Back).unwrap();
        assert_eq!(finder.current_step(), Some(2));
    }

    #[test]
    fn test_continue_runs_the_step_prompt() {
        let goals = JournalAnswer::ToggleFeature(Feature::GoalSetting);
        let prompt = after_continue_or_back(0, || Ok(vec![goals]));
        assert!(matches!(prompt, Ok(Prompt::Answer(answers)) if answers == vec![goals]));
        let back = after_continue_or_back::<JournalAnswer>(1, || bail!("step prompt not shown"));
        assert!(matches!(back, Ok(Prompt::Back)));
    }
}
