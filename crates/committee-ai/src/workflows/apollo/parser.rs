use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of an Apollo people export. Column set matches the stock export;
/// everything beyond the name columns is optional because saved exports vary
/// by workspace configuration.
#[derive(Debug, Deserialize)]
pub(crate) struct ApolloRow {
    #[serde(rename = "First Name", default)]
    pub(crate) first_name: String,
    #[serde(rename = "Last Name", default)]
    pub(crate) last_name: String,
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    pub(crate) title: Option<String>,
    #[serde(
        rename = "Seniority",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) seniority: Option<String>,
    #[serde(
        rename = "Departments",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) departments: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(
        rename = "Email Status",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) email_status: Option<String>,
    #[serde(
        rename = "Work Direct Phone",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) work_phone: Option<String>,
    #[serde(
        rename = "Mobile Phone",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) mobile_phone: Option<String>,
    #[serde(
        rename = "Person Linkedin Url",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) linkedin_url: Option<String>,
    #[serde(
        rename = "Months In Current Role",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) months_in_role: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    pub(crate) company: Option<String>,
    #[serde(
        rename = "# Employees",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) employees: Option<String>,
    #[serde(
        rename = "Employee Growth %",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) employee_growth_pct: Option<String>,
    #[serde(
        rename = "Industry",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) industry: Option<String>,
    #[serde(
        rename = "Technologies",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) technologies: Option<String>,
    #[serde(
        rename = "Last Raised At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) last_raised_at: Option<String>,
    #[serde(
        rename = "Last Updated",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) last_updated: Option<String>,
}

impl ApolloRow {
    pub(crate) fn full_name(&self) -> String {
        let joined = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        joined.trim().to_string()
    }

    pub(crate) fn email_verified(&self) -> bool {
        self.email_status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("verified"))
    }

    pub(crate) fn phone(&self) -> Option<&str> {
        self.work_phone
            .as_deref()
            .or(self.mobile_phone.as_deref())
    }

    pub(crate) fn tenure_months(&self) -> Option<u32> {
        self.months_in_role
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
    }

    pub(crate) fn headcount(&self) -> Option<u32> {
        self.employees
            .as_deref()
            .and_then(|raw| raw.trim().replace(',', "").parse::<u32>().ok())
    }

    pub(crate) fn growth_pct(&self) -> Option<f64> {
        self.employee_growth_pct
            .as_deref()
            .and_then(|raw| raw.trim().trim_end_matches('%').parse::<f64>().ok())
    }

    pub(crate) fn technology_list(&self) -> Vec<String> {
        self.technologies
            .as_deref()
            .map(|raw| {
                raw.split([';', ','])
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn last_funding_on(&self) -> Option<NaiveDate> {
        self.last_raised_at.as_deref().and_then(parse_date)
    }

    pub(crate) fn refreshed_on(&self) -> Option<NaiveDate> {
        self.last_updated.as_deref().and_then(parse_date)
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ApolloRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<ApolloRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
