//! Sample agency data: three clients, one project and four services.

use chrono::NaiveDate;

use crate::error::WorkspaceError;
use crate::{
    Client, ClientStatus, Interaction, InteractionKind, Project, ProjectStatus, ServiceOption,
    Workspace,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn service(id: &str, name: &str, description: &str, price_estimate: f64) -> ServiceOption {
    ServiceOption {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_estimate,
    }
}

pub fn sample_services() -> Vec<ServiceOption> {
    vec![
        service(
            "srv_1",
            "SEO & Website Marketing",
            "Comprehensive SEO audit, keyword strategy, and website optimization.",
            2500.0,
        ),
        service(
            "srv_2",
            "Custom Website Development",
            "High-performance React/Next.js websites.",
            5000.0,
        ),
        service(
            "srv_3",
            "Social Media Management",
            "Content creation and community management for IG/LinkedIn.",
            1200.0,
        ),
        service(
            "srv_4",
            "Custom CRM & Tools",
            "Tailored internal software solutions.",
            8000.0,
        ),
    ]
}

pub fn sample_clients() -> Vec<Client> {
    vec![
        Client {
            id: "c_1".into(),
            name: "John Doe".into(),
            company: "Acme Construction".into(),
            industry: "Construction".into(),
            email: "john@acme.com".into(),
            phone: "555-0123".into(),
            website: "https://acme-const.com".into(),
            project_notes: "Website is very slow, not mobile friendly. Needs a complete redesign \
                            and local SEO for \"contractors in [City]\"."
                .into(),
            status: ClientStatus::Lead,
            last_contacted: Some(date(2023, 10, 25)),
            interested_services: vec!["srv_1".into(), "srv_2".into()],
            interactions: vec![Interaction {
                id: "i_1".into(),
                date: date(2023, 10, 25),
                kind: InteractionKind::Call,
                notes: "Initial intro. Interested in new site.".into(),
            }],
        },
        Client {
            id: "c_2".into(),
            name: "Jane Smith".into(),
            company: "TechFlow Inc".into(),
            industry: "Software".into(),
            email: "jane@techflow.io".into(),
            phone: "555-9876".into(),
            website: "https://techflow.io".into(),
            project_notes: "Good design but no conversion funnel. Needs landing pages for their \
                            new SaaS product."
                .into(),
            status: ClientStatus::Negotiating,
            last_contacted: Some(date(2023, 11, 1)),
            interested_services: vec!["srv_4".into()],
            interactions: Vec::new(),
        },
        Client {
            id: "c_3".into(),
            name: "Robert Brown".into(),
            company: "Bakery Delights".into(),
            industry: "Food & Beverage".into(),
            email: "bob@bakery.com".into(),
            phone: "555-4567".into(),
            website: "https://bakerydelights.net".into(),
            project_notes: "Needs social media setup and a simple online ordering system added \
                            to current site."
                .into(),
            status: ClientStatus::Closed,
            last_contacted: Some(date(2023, 10, 20)),
            interested_services: vec!["srv_3".into()],
            interactions: Vec::new(),
        },
    ]
}

pub fn sample_projects() -> Vec<Project> {
    vec![Project {
        id: "p_1".into(),
        client_id: "c_3".into(),
        title: "Social Media Launch".into(),
        status: ProjectStatus::InProgress,
        deadline: date(2023, 12, 15),
        value: 1200.0,
        description: "Launch campaign for holiday season.".into(),
    }]
}

pub fn sample_workspace() -> Result<Workspace, WorkspaceError> {
    Workspace::from_parts(sample_clients(), sample_projects(), sample_services())
}
