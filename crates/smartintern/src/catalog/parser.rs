use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::CatalogError;
use crate::matching::domain::{Posting, PostingId, PostingStatus, SkillSet};

/// Parses a posting CSV export; `required_skills` cells are `;`-separated.
pub(crate) fn parse_postings<R: Read>(reader: R) -> Result<Vec<Posting>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut postings = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: PostingRow = record.deserialize(Some(&headers))?;
        postings.push(row.into_posting(line)?);
    }

    Ok(postings)
}

#[derive(Debug, Deserialize)]
struct PostingRow {
    id: String,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    department: Option<String>,
    #[serde(default)]
    required_skills: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_standing: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    posted_on: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applicants: Option<String>,
}

impl PostingRow {
    fn into_posting(self, line: u64) -> Result<Posting, CatalogError> {
        let invalid = |message: String| CatalogError::InvalidRow { line, message };

        if self.id.trim().is_empty() {
            return Err(invalid("posting id is empty".to_string()));
        }

        let min_standing = self
            .min_standing
            .map(|raw| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| invalid(format!("min_standing '{raw}' is not a number")))
            })
            .transpose()?;

        let status = match self.status {
            Some(raw) => PostingStatus::parse(&raw)
                .ok_or_else(|| invalid(format!("unknown status '{raw}'")))?,
            None => PostingStatus::Active,
        };

        let posted_on = self
            .posted_on
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|err| invalid(format!("posted_on '{raw}' is not YYYY-MM-DD ({err})")))
            })
            .transpose()?;

        let applicants = self
            .applicants
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| invalid(format!("applicants '{raw}' is not a count")))
            })
            .transpose()?;

        let required_skills: SkillSet = self.required_skills.split(';').collect();

        Ok(Posting {
            id: PostingId(self.id),
            title: self.title,
            company: self.company,
            description: self.description,
            location: self.location,
            department: self.department,
            required_skills,
            min_standing,
            status,
            posted_on,
            applicants,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
