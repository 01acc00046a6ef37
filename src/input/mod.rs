//! Business list input
//!
//! Reads the CSV list of businesses and turns it into crawl tasks. Rows are
//! filtered in file order:
//! - rows without a website are skipped
//! - rows whose website is a social media page are skipped
//! - rows repeating the phone number of an earlier kept row are skipped

use crate::config::{Config, InputConfig};
use crate::crawler::DomainTask;
use crate::InputError;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the business list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessRecord {
    pub name: Option<String>,
    pub phone: String,
    pub website: String,
}

/// Reads business records from CSV with a header row
///
/// The website and phone columns are required; the name column is optional.
/// Values are trimmed and short rows yield empty values.
pub fn read_records<R: Read>(
    reader: R,
    columns: &InputConfig,
) -> Result<Vec<BusinessRecord>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let website = column_index(&headers, &columns.website_column)
        .ok_or_else(|| InputError::MissingColumn(columns.website_column.clone()))?;
    let phone = column_index(&headers, &columns.phone_column)
        .ok_or_else(|| InputError::MissingColumn(columns.phone_column.clone()))?;
    let name = column_index(&headers, &columns.name_column);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |index: usize| row.get(index).unwrap_or("").trim().to_string();

        records.push(BusinessRecord {
            name: name.map(field).filter(|n| !n.is_empty()),
            phone: field(phone),
            website: field(website),
        });
    }

    Ok(records)
}

/// Finds a header by name, ignoring case, surrounding spaces and a UTF-8 BOM
fn column_index(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|header| {
        header
            .trim_start_matches('\u{feff}')
            .trim()
            .eq_ignore_ascii_case(column.trim())
    })
}

/// Filters records into crawl tasks, keeping file order
///
/// Rows without a phone number are never treated as duplicates of each other,
/// so several phoneless businesses all survive the filter.
pub fn filter_records(records: Vec<BusinessRecord>, social_media_hosts: &[String]) -> Vec<DomainTask> {
    let social_media_hosts: Vec<String> = social_media_hosts
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    let mut seen_phones = HashSet::new();
    let mut tasks = Vec::new();

    for record in records {
        if record.website.is_empty() {
            tracing::debug!("Skipping {:?}: no website", record.name);
            continue;
        }

        let website = record.website.to_lowercase();
        if social_media_hosts.iter().any(|host| website.contains(host.as_str())) {
            tracing::debug!("Skipping social media page {}", record.website);
            continue;
        }

        if !record.phone.is_empty() {
            if seen_phones.contains(&record.phone) {
                tracing::debug!(
                    "Skipping {}: phone {} already listed",
                    record.website,
                    record.phone
                );
                continue;
            }
            seen_phones.insert(record.phone);
        }

        tasks.push(DomainTask::new(record.website));
    }

    tasks
}

/// Loads and filters the business list at `path`
pub fn load_domains(path: &Path, config: &Config) -> Result<Vec<DomainTask>, InputError> {
    let file = File::open(path)?;
    let records = read_records(file, &config.input)?;
    let total = records.len();

    let tasks = filter_records(records, &config.heuristics.social_media_hosts);
    tracing::info!(
        "Loaded {} domains from {} ({} rows filtered out)",
        tasks.len(),
        path.display(),
        total - tasks.len()
    );

    Ok(tasks)
}
