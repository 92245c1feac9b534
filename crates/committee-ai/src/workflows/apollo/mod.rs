//! Apollo people-export adapter.
//!
//! Turns a saved Apollo CSV export into the engine's input shapes: one
//! [`OrgRecord`] for the company the export was filtered to, plus a
//! [`Candidate`] per contact row. Candidate ids are derived from row content
//! so re-importing the same export yields the same ids.

mod mapping;
mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::workflows::committee::domain::{
    Candidate, CandidateId, ContactField, EngagementCounters, OrgId, OrgRecord,
};

use parser::ApolloRow;

const VERIFIED_EMAIL_CONFIDENCE: u8 = 95;
const UNVERIFIED_EMAIL_CONFIDENCE: u8 = 70;
const PHONE_CONFIDENCE: u8 = 80;
const PROFILE_CONFIDENCE: u8 = 90;

#[derive(Debug)]
pub enum ApolloImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    EmptyExport,
}

impl std::fmt::Display for ApolloImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApolloImportError::Io(err) => write!(f, "failed to read Apollo export: {}", err),
            ApolloImportError::Csv(err) => write!(f, "invalid Apollo CSV data: {}", err),
            ApolloImportError::EmptyExport => {
                write!(f, "Apollo export contains no contact rows")
            }
        }
    }
}

impl std::error::Error for ApolloImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApolloImportError::Io(err) => Some(err),
            ApolloImportError::Csv(err) => Some(err),
            ApolloImportError::EmptyExport => None,
        }
    }
}

impl From<std::io::Error> for ApolloImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ApolloImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Result of one import: the company record when the export carried company
/// columns, and every contact row as a candidate.
#[derive(Debug, Clone)]
pub struct ApolloImport {
    pub organization: Option<OrgRecord>,
    pub candidates: Vec<Candidate>,
}

pub struct ApolloCommitteeImporter;

impl ApolloCommitteeImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ApolloImport, ApolloImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ApolloImport, ApolloImportError> {
        let rows = parser::parse_rows(reader)?;
        if rows.is_empty() {
            return Err(ApolloImportError::EmptyExport);
        }

        let organization = rows.iter().find_map(organization_from_row);
        let org_name = organization.as_ref().map(|record| record.name.clone());

        let mut used_ids: HashSet<String> = HashSet::new();
        let candidates = rows
            .iter()
            .filter(|row| !row.full_name().is_empty())
            .map(|row| candidate_from_row(row, org_name.as_deref(), &mut used_ids))
            .collect();

        Ok(ApolloImport {
            organization,
            candidates,
        })
    }
}

fn organization_from_row(row: &ApolloRow) -> Option<OrgRecord> {
    let name = row.company.as_deref()?.trim();
    if name.is_empty() {
        return None;
    }

    Some(OrgRecord {
        id: OrgId(slug(name)),
        name: name.to_string(),
        headcount: row.headcount(),
        headcount_growth_pct: row.growth_pct(),
        last_funding_on: row.last_funding_on(),
        industry: row.industry.clone(),
        technologies: row.technology_list(),
        adoption_signals: None,
    })
}

fn candidate_from_row(
    row: &ApolloRow,
    org_name: Option<&str>,
    used_ids: &mut HashSet<String>,
) -> Candidate {
    let full_name = row.full_name();

    let base = row
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|local| !local.is_empty())
        .map(slug)
        .unwrap_or_else(|| slug(&full_name));
    let id = dedup_id(base, used_ids);

    let email = row.email.as_ref().map(|value| ContactField {
        value: value.clone(),
        verified: row.email_verified(),
        confidence: if row.email_verified() {
            VERIFIED_EMAIL_CONFIDENCE
        } else {
            UNVERIFIED_EMAIL_CONFIDENCE
        },
    });
    let phone = row.phone().map(|value| ContactField {
        value: value.to_string(),
        verified: false,
        confidence: PHONE_CONFIDENCE,
    });
    let profile_url = row.linkedin_url.as_ref().map(|value| ContactField {
        value: value.clone(),
        verified: false,
        confidence: PROFILE_CONFIDENCE,
    });

    // Rows in a company-filtered export describe current employees of that
    // company.
    let active_tenure = match (org_name, row.company.as_deref()) {
        (Some(org), Some(company)) => org.eq_ignore_ascii_case(company.trim()),
        _ => false,
    };

    Candidate {
        id: CandidateId(format!("apollo-{id}")),
        full_name,
        title: row.title.clone(),
        department: row
            .departments
            .as_deref()
            .and_then(mapping::canonical_department),
        seniority: row
            .seniority
            .as_deref()
            .and_then(mapping::canonical_seniority)
            .map(str::to_string),
        tenure_months: row.tenure_months(),
        active_tenure,
        prior_employers: Vec::new(),
        engagement: EngagementCounters::default(),
        email,
        phone,
        profile_url,
        data_refreshed_on: row.refreshed_on(),
    }
}

fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_dash = true;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("contact");
    }
    out
}

fn dedup_id(base: String, used_ids: &mut HashSet<String>) -> String {
    if used_ids.insert(base.clone()) {
        return base;
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if used_ids.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const EXPORT: &str = "\
First Name,Last Name,Title,Seniority,Departments,Email,Email Status,Work Direct Phone,Mobile Phone,Person Linkedin Url,Months In Current Role,Company,# Employees,Employee Growth %,Industry,Technologies,Last Raised At,Last Updated
Maya,Okafor,Chief Executive Officer,C Suite,C Suite,maya.okafor@harvestrobotics.com,Verified,+1 415 555 0101,,https://linkedin.com/in/mayaokafor,48,Harvest Robotics,340,32%,Agricultural Technology,Salesforce; Snowflake,2026-02-10,2026-07-15
Liam,Reyes,Director of Revenue Operations,Director,Master Sales,liam.reyes@harvestrobotics.com,Unverified,,+1 415 555 0102,,18,Harvest Robotics,340,32%,Agricultural Technology,Salesforce; Snowflake,2026-02-10,2026-07-12
,,Mystery Person With No Name,,,,,,,,,Harvest Robotics,,,,,,
";

    #[test]
    fn import_builds_organization_and_candidates() {
        let import =
            ApolloCommitteeImporter::from_reader(Cursor::new(EXPORT)).expect("import parses");

        let org = import.organization.expect("organization present");
        assert_eq!(org.id, OrgId("harvest-robotics".to_string()));
        assert_eq!(org.headcount, Some(340));
        assert_eq!(org.headcount_growth_pct, Some(32.0));
        assert_eq!(
            org.last_funding_on,
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
        assert_eq!(org.technologies, vec!["Salesforce", "Snowflake"]);

        // The nameless row is dropped; the other two survive.
        assert_eq!(import.candidates.len(), 2);
    }

    #[test]
    fn candidate_ids_derive_from_email_local_part() {
        let import =
            ApolloCommitteeImporter::from_reader(Cursor::new(EXPORT)).expect("import parses");
        assert_eq!(import.candidates[0].id.0, "apollo-maya-okafor");
        assert_eq!(import.candidates[1].id.0, "apollo-liam-reyes");
    }

    #[test]
    fn verified_email_status_carries_through() {
        let import =
            ApolloCommitteeImporter::from_reader(Cursor::new(EXPORT)).expect("import parses");
        let maya = &import.candidates[0];
        let email = maya.email.as_ref().expect("email present");
        assert!(email.verified);
        assert_eq!(email.confidence, VERIFIED_EMAIL_CONFIDENCE);
        assert!(maya.active_tenure);
        assert_eq!(maya.seniority.as_deref(), Some("c_suite"));
        assert_eq!(maya.department.as_deref(), Some("Executive"));

        let liam = &import.candidates[1];
        let email = liam.email.as_ref().expect("email present");
        assert!(!email.verified);
        assert_eq!(liam.department.as_deref(), Some("Sales"));
    }

    #[test]
    fn reimport_is_deterministic() {
        let first =
            ApolloCommitteeImporter::from_reader(Cursor::new(EXPORT)).expect("import parses");
        let second =
            ApolloCommitteeImporter::from_reader(Cursor::new(EXPORT)).expect("import parses");
        let first_ids: Vec<_> = first.candidates.iter().map(|c| c.id.0.clone()).collect();
        let second_ids: Vec<_> = second.candidates.iter().map(|c| c.id.0.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn empty_export_is_rejected() {
        let header_only = "First Name,Last Name,Title\n";
        let error = ApolloCommitteeImporter::from_reader(Cursor::new(header_only))
            .expect_err("empty export rejected");
        assert!(matches!(error, ApolloImportError::EmptyExport));
    }

    #[test]
    fn date_parser_accepts_rfc3339_and_plain_dates() {
        assert_eq!(
            parser::parse_date_for_tests("2026-02-10T09:30:00Z"),
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
        assert_eq!(
            parser::parse_date_for_tests("2026-02-10"),
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
        assert_eq!(parser::parse_date_for_tests("  "), None);
        assert_eq!(parser::parse_date_for_tests("soon"), None);
    }

    #[test]
    fn normalizer_strips_bom_and_collapses_whitespace() {
        assert_eq!(
            normalizer::normalize_for_tests("\u{feff}  Master   Sales "),
            "master sales"
        );
    }
}
