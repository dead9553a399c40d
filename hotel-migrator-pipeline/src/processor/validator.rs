use std::collections::HashSet;
use std::fmt;

use hotel_migrator_shared::{Category, Chain, Dimension, Hotel};
use thiserror::Error;
use tracing::{error, warn};

/// Why an identifier was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierIssue {
    #[error("conversion error from string to integer: {0:?}")]
    NotAnInteger(String),
    #[error("negative id: {0}")]
    Negative(i64),
}

/// Parses a textual identifier as a non-negative integer.
///
/// Surrounding whitespace is ignored. The stored text is never rewritten, so
/// two entities that name the same id keep matching each other.
pub fn parse_identifier(raw: &str) -> Result<i64, IdentifierIssue> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| IdentifierIssue::NotAnInteger(raw.to_string()))?;
    if value < 0 {
        return Err(IdentifierIssue::Negative(value));
    }
    Ok(value)
}

/// Counts and messages for one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub accepted: usize,
    pub not_an_integer: usize,
    pub negative: usize,
    /// Hotel references cleared because no valid dimension with that id exists.
    pub detached_references: usize,
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn rejected(&self) -> usize {
        self.not_an_integer + self.negative
    }

    fn reject(&mut self, subject: fmt::Arguments<'_>, issue: &IdentifierIssue) {
        match issue {
            IdentifierIssue::NotAnInteger(_) => {
                error!(%issue, "Excluding {subject}");
                self.not_an_integer += 1;
            }
            IdentifierIssue::Negative(_) => {
                warn!(%issue, "Excluding {subject}");
                self.negative += 1;
            }
        }
        self.messages.push(format!("excluded {subject}: {issue}"));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub accepted: Vec<T>,
    pub report: ValidationReport,
}

/// Keeps the dimensions whose id is a non-negative integer.
pub fn validate_dimensions<D: Dimension>(dimensions: Vec<D>) -> Validated<D> {
    let mut report = ValidationReport::default();
    let mut accepted = Vec::with_capacity(dimensions.len());

    for dimension in dimensions {
        match parse_identifier(dimension.id()) {
            Ok(_) => accepted.push(dimension),
            Err(issue) => report.reject(
                format_args!("{} {:?} ({})", D::KIND, dimension.id(), dimension.name()),
                &issue,
            ),
        }
    }

    report.accepted = accepted.len();
    Validated { accepted, report }
}

pub fn validate_categories(categories: Vec<Category>) -> Validated<Category> {
    validate_dimensions(categories)
}

pub fn validate_chains(chains: Vec<Chain>) -> Validated<Chain> {
    validate_dimensions(chains)
}

/// Keeps the hotels whose own id and every present reference id are
/// non-negative integers.
///
/// A reference that passes that check but names no entity in `categories` /
/// `chains` (the already validated dimensions of the same run) is cleared to
/// `None` rather than left to fail the foreign key at insert time.
pub fn validate_hotels(hotels: Vec<Hotel>, categories: &[Category], chains: &[Chain]) -> Validated<Hotel> {
    let category_ids: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    let chain_ids: HashSet<&str> = chains.iter().map(|c| c.id.as_str()).collect();

    let mut report = ValidationReport::default();
    let mut accepted = Vec::with_capacity(hotels.len());

    for mut hotel in hotels {
        if hotel.id < 0 {
            report.reject(
                format_args!("hotel {} ({})", hotel.id, hotel.name),
                &IdentifierIssue::Negative(hotel.id),
            );
            continue;
        }

        let references = [
            ("category", hotel.category_id.as_deref()),
            ("chain", hotel.chain_id.as_deref()),
        ];
        let failure = references.iter().find_map(|(field, id)| {
            id.and_then(|id| parse_identifier(id).err())
                .map(|issue| (*field, issue))
        });
        if let Some((field, issue)) = failure {
            report.reject(
                format_args!("hotel {} ({}) for its {field} reference", hotel.id, hotel.name),
                &issue,
            );
            continue;
        }

        detach_unknown(&mut hotel.category_id, &category_ids, hotel.id, "category", &mut report);
        detach_unknown(&mut hotel.chain_id, &chain_ids, hotel.id, "chain", &mut report);
        accepted.push(hotel);
    }

    report.accepted = accepted.len();
    Validated { accepted, report }
}

fn detach_unknown(
    reference: &mut Option<String>,
    known: &HashSet<&str>,
    hotel_id: i64,
    field: &str,
    report: &mut ValidationReport,
) {
    let Some(id) = reference.as_deref() else {
        return;
    };
    if known.contains(id) {
        return;
    }

    warn!(hotel_id, field, reference = id, "Clearing reference to unknown {field}");
    report
        .messages
        .push(format!("hotel {hotel_id}: cleared {field} reference {id:?}, no valid {field} with that id"));
    report.detached_references += 1;
    *reference = None;
}
