use crate::infra::{build_committee_service, parse_date, ImportedDirectory, InMemoryCommitteeStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use committee_ai::error::AppError;
use committee_ai::workflows::apollo::ApolloCommitteeImporter;
use committee_ai::workflows::committee::scoring::account::{account_components, AccountSignals};
use committee_ai::workflows::committee::scoring::org::{tension_components, OrgSignals};
use committee_ai::workflows::committee::scoring::{account_engine, tension_engine, CompositeScore};
use committee_ai::workflows::committee::{
    AssembleOptions, Candidate, CandidateId, CommitteeRecord, CommitteeServiceError, ContactField,
    DirectoryError, EngagementCounters, OrgId, OrgRecord, ProductContext, Role,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CommitteeAssembleArgs {
    /// Apollo people-export CSV to import
    #[arg(long)]
    apollo_csv: PathBuf,
    /// Reference date for tiering and staleness (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Print every admitted member with evidence
    #[arg(long)]
    list_members: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AccountScoreArgs {
    /// Apollo people-export CSV to import
    #[arg(long)]
    apollo_csv: PathBuf,
    /// Reference date for funding-recency math (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Target industry keyword (repeatable)
    #[arg(long = "target-industry")]
    target_industries: Vec<String>,
    /// Complementary technology to look for in the stack (repeatable)
    #[arg(long = "technology")]
    technologies: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the demo run (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

pub(crate) fn run_committee_assemble(args: CommitteeAssembleArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let import = ApolloCommitteeImporter::from_path(&args.apollo_csv)?;
    let directory = Arc::new(ImportedDirectory::from_import(import));
    let org = directory
        .org_id()
        .ok_or(CommitteeServiceError::from(DirectoryError::OrgNotFound))?;

    let store = Arc::new(InMemoryCommitteeStore::default());
    let service = build_committee_service(directory, store, 180);
    let record = service.assemble(&org, today, AssembleOptions::default())?;

    render_committee(&record, args.list_members);
    Ok(())
}

pub(crate) fn run_account_score(args: AccountScoreArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let import = ApolloCommitteeImporter::from_path(&args.apollo_csv)?;
    let Some(record) = import.organization else {
        return Err(CommitteeServiceError::from(DirectoryError::OrgNotFound).into());
    };

    let product = ProductContext {
        target_departments: Vec::new(),
        target_industries: args.target_industries,
        complementary_technologies: args.technologies,
        keywords: Vec::new(),
    };

    let signals = AccountSignals::from_record(&record, &product, today);
    let components = account_components(&signals);
    let composite = account_engine()
        .map_err(CommitteeServiceError::from)?
        .combine(&components)
        .map_err(CommitteeServiceError::from)?;

    println!("Account fit for {}", record.name);
    println!(
        "Tier: {} ({} employees)",
        record.size_tier().label(),
        record
            .headcount
            .map(|count| count.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    render_composite(&composite);
    for component in &components {
        println!("\n[{}] {:.1}", component.name, component.score);
        for line in &component.evidence {
            println!("  - {line}");
        }
        println!("  => {}", component.implication);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args
        .today
        .unwrap_or_else(|| Local::now().date_naive());

    println!("Committee engine demo (evaluated {today})\n");

    // 1. Organizational tension for a fictional mid-market software company.
    let signals = OrgSignals {
        headcount: Some(420),
        manager_count: Some(18),
        individual_contributors: Some(402),
        leadership_openings: Some(3),
        open_requisitions: Some(24),
        attrition_pct: Some(14.0),
        headcount_growth_pct: Some(38.0),
        reporting_layers: Some(6),
        industry: Some("software".to_string()),
    };
    let components = tension_components(&signals);
    let tension = tension_engine()
        .map_err(CommitteeServiceError::from)?
        .combine(&components)
        .map_err(CommitteeServiceError::from)?;
    println!("Organizational tension");
    render_composite(&tension);

    // 2. Committee assembly over a synthetic pool.
    let record = demo_committee(today)?;
    println!("\nCommittee for {}", record.organization.0);
    render_committee(&record, true);

    Ok(())
}

fn demo_committee(today: NaiveDate) -> Result<CommitteeRecord, AppError> {
    let org = OrgRecord {
        id: OrgId("meridian-software".to_string()),
        name: "Meridian Software".to_string(),
        headcount: Some(420),
        headcount_growth_pct: Some(38.0),
        last_funding_on: today.pred_opt(),
        industry: Some("Software".to_string()),
        technologies: vec!["Salesforce".to_string()],
        adoption_signals: Some(7),
    };

    let pool = vec![
        demo_person("d-01", "Priya Nair", "Chief Revenue Officer", "Executive", Some("c_suite"), today),
        demo_person("d-02", "Marcus Webb", "VP of Sales", "Sales", Some("vp"), today),
        demo_person("d-03", "Elena Sorokina", "Director of Marketing", "Marketing", Some("director"), today),
        demo_person("d-04", "Tom Ishida", "Head of Revenue Operations", "Revenue", Some("head"), today),
        demo_person("d-05", "Grace Obi", "Security Compliance Lead", "Security", None, today),
        demo_person("d-06", "Dana Petrov", "Senior Account Executive", "Sales", Some("senior"), today),
        demo_person("d-07", "Jules Martin", "Solutions Architect", "Engineering", Some("senior"), today),
        demo_person("d-08", "Ravi Menon", "Financial Analyst", "Finance", Some("entry"), today),
    ];

    let import = committee_ai::workflows::apollo::ApolloImport {
        organization: Some(org.clone()),
        candidates: pool,
    };
    let directory = Arc::new(ImportedDirectory::from_import(import));
    let store = Arc::new(InMemoryCommitteeStore::default());
    let service = build_committee_service(directory, store, 180);

    Ok(service.assemble(&org.id, today, AssembleOptions::default())?)
}

fn demo_person(
    id: &str,
    name: &str,
    title: &str,
    department: &str,
    seniority: Option<&str>,
    today: NaiveDate,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        full_name: name.to_string(),
        title: Some(title.to_string()),
        department: Some(department.to_string()),
        seniority: seniority.map(str::to_string),
        tenure_months: Some(20),
        active_tenure: true,
        prior_employers: Vec::new(),
        engagement: EngagementCounters::default(),
        email: Some(ContactField {
            value: format!("{id}@meridiansoftware.example"),
            verified: false,
            confidence: 70,
        }),
        phone: None,
        profile_url: None,
        data_refreshed_on: Some(today),
    }
}

fn render_composite(composite: &CompositeScore) {
    println!(
        "Score {:.1} -> {}",
        composite.score, composite.classification
    );
    for contributor in &composite.top_contributors {
        println!(
            "  {} contributed {:.1} (raw {:.1})",
            contributor.name, contributor.weighted, contributor.score
        );
    }
}

fn render_committee(record: &CommitteeRecord, list_members: bool) {
    let selection = &record.selection;
    println!(
        "{} member(s), mean confidence {:.1}",
        selection.total, selection.overall_confidence
    );
    for role in Role::ordered() {
        let count = selection.count_for(role);
        if count > 0 {
            println!("  {}: {}", role.label(), count);
        }
    }

    if selection.shortfalls.is_empty() {
        println!("Shortfalls: none");
    } else {
        println!("Shortfalls: {:?}", selection.shortfalls);
    }

    let validation = &record.validation;
    println!(
        "Validation: {} (overall {:.2}, confidence {:?})",
        if validation.is_valid { "PASS" } else { "FAIL" },
        validation.metrics.overall_score,
        validation.confidence
    );
    for issue in &validation.issues {
        println!(
            "  [{:?}] {:?}: {}",
            issue.severity, issue.issue_type, issue.description
        );
    }

    if list_members {
        println!("\nMembers");
        for member in &selection.members {
            println!(
                "- {} | {} | confidence {}{}",
                member.candidate.full_name,
                member.role.label(),
                member.confidence,
                if member.collect_full_profile {
                    " | full profile"
                } else {
                    ""
                }
            );
            for line in &member.evidence {
                println!("    * {line}");
            }
        }
    }
}
