//! Shared argument parsing for split policies and participants

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;

use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{even_percentages, Money, ParticipantId, Percentages, SplitPolicy, Splits};

/// How an amount is divided, as given on the command line
///
/// With neither `--percent` nor `--fixed` the amount is split equally. A bare
/// `--percent` seeds an even percentage table over `--among`.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Participants, comma separated (e.g. alice,bob,carol)
    #[arg(long, value_delimiter = ',')]
    pub among: Vec<String>,

    /// Percentage per participant (e.g. alice=50,bob=30,carol=20); with no
    /// values, an even split of 100% over --among
    #[arg(long, value_delimiter = ',', num_args = 0.., conflicts_with = "fixed")]
    pub percent: Option<Vec<String>>,

    /// Fixed amount per participant (e.g. alice=10.00,bob=5.00)
    #[arg(long, value_delimiter = ',')]
    pub fixed: Vec<String>,
}

impl PolicyArgs {
    /// Resolve the participant set and split policy
    ///
    /// When `--among` is omitted, the participants are the names used in
    /// `--percent` or `--fixed`.
    pub fn resolve(&self) -> ZenSplitResult<(BTreeSet<ParticipantId>, SplitPolicy)> {
        let mut participants = self
            .among
            .iter()
            .map(|s| parse_participant(s))
            .collect::<ZenSplitResult<BTreeSet<_>>>()?;

        let policy = match &self.percent {
            Some(pairs) if pairs.is_empty() => {
                if participants.is_empty() {
                    return Err(ZenSplitError::Validation(
                        "--percent without values needs --among".into(),
                    ));
                }
                SplitPolicy::Percentage {
                    percentages: even_percentages(&participants),
                }
            }
            Some(pairs) => {
                let percentages: Percentages = parse_pairs(pairs, parse_percentage)?;
                SplitPolicy::Percentage { percentages }
            }
            None if !self.fixed.is_empty() => {
                let amounts: Splits = parse_pairs(&self.fixed, parse_amount)?;
                SplitPolicy::Fixed { amounts }
            }
            None => SplitPolicy::Equal,
        };

        if participants.is_empty() {
            participants = match &policy {
                SplitPolicy::Equal => BTreeSet::new(),
                SplitPolicy::Percentage { percentages } => percentages.keys().cloned().collect(),
                SplitPolicy::Fixed { amounts } => amounts.keys().cloned().collect(),
            };
        }

        Ok((participants, policy))
    }
}

/// Parse a participant id, rejecting blanks
pub fn parse_participant(s: &str) -> ZenSplitResult<ParticipantId> {
    ParticipantId::new(s)
        .ok_or_else(|| ZenSplitError::Validation("Participant id cannot be blank".into()))
}

fn parse_percentage(s: &str) -> ZenSplitResult<Decimal> {
    Decimal::from_str(s.trim().trim_end_matches('%')).map_err(|e| {
        ZenSplitError::Validation(format!("invalid percentage '{}': {}", s, e))
    })
}

/// Parse a user-entered amount such as `12.50` or `₹1,200`
pub fn parse_amount(s: &str) -> ZenSplitResult<Money> {
    Money::parse(s).map_err(|e| ZenSplitError::Validation(e.to_string()))
}

fn parse_pairs<V, F>(
    pairs: &[String],
    parse_value: F,
) -> ZenSplitResult<BTreeMap<ParticipantId, V>>
where
    F: Fn(&str) -> ZenSplitResult<V>,
{
    let mut parsed = BTreeMap::new();

    for pair in pairs {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            ZenSplitError::Validation(format!("expected name=value, got '{}'", pair))
        })?;
        let participant = parse_participant(name)?;
        let value = parse_value(value)?;

        if parsed.insert(participant.clone(), value).is_some() {
            return Err(ZenSplitError::Validation(format!(
                "{} is listed more than once",
                participant
            )));
        }
    }

    Ok(parsed)
}
