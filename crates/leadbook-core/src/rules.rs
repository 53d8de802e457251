//! Pipeline rules: derived, read-only views over the workspace.
//!
//! Everything here is a pure function of the collections and the supplied
//! "now". Nothing is cached; callers recompute on every query.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::{
    Client, ClientStatus, InteractionKind, Project, ProjectStatus, ServiceOption, Workspace,
};

/// Open clients go back in the call queue once this many days have passed.
pub const FOLLOW_UP_AFTER_DAYS: i64 = 14;

/// Fixed "potential pipeline" multiplier applied on top of realised revenue.
pub const PIPELINE_MULTIPLIER: f64 = 1.5;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days between `now` and the start (UTC midnight) of `date`, rounded up.
///
/// The distance is absolute, so a date recorded in the future still yields a
/// positive count.
pub fn days_since(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let millis = (now - start).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn needs_follow_up(client: &Client, now: DateTime<Utc>) -> bool {
    if !client.status.is_open() {
        return false;
    }
    match client.last_contacted {
        None => true,
        Some(date) => days_since(date, now) > FOLLOW_UP_AFTER_DAYS,
    }
}

/// Clients due for renewed outreach, in collection order.
pub fn follow_up_queue(clients: &[Client], now: DateTime<Utc>) -> Vec<&Client> {
    clients.iter().filter(|c| needs_follow_up(c, now)).collect()
}

/// Sum of every project's value, whatever its status.
pub fn revenue(projects: &[Project]) -> f64 {
    projects.iter().map(|p| p.value).sum()
}

pub fn pipeline_projection(projects: &[Project]) -> f64 {
    revenue(projects) * PIPELINE_MULTIPLIER
}

pub fn active_project_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|p| p.status != ProjectStatus::Completed)
        .count()
}

/// Number of `Call` interactions across all clients.
pub fn calls_made(clients: &[Client]) -> usize {
    clients
        .iter()
        .flat_map(|c| &c.interactions)
        .filter(|i| i.kind == InteractionKind::Call)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ClientStatus,
    pub count: usize,
}

/// Client count per status. Every status is present, in pipeline order.
pub fn status_histogram(clients: &[Client]) -> Vec<StatusCount> {
    ClientStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: clients.iter().filter(|c| c.status == status).count(),
        })
        .collect()
}

// --- Client list ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive substring of name, company or industry. Empty matches all.
    pub search: String,
    pub status: Option<ClientStatus>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || [&client.name, &client.company, &client.industry]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        let matches_status = self.status.map_or(true, |s| client.status == s);
        matches_search && matches_status
    }
}

pub fn filter_clients<'a>(clients: &'a [Client], filter: &ClientFilter) -> Vec<&'a Client> {
    clients.iter().filter(|c| filter.matches(c)).collect()
}

/// Names of the catalog services a client is interested in.
///
/// Ids that no longer resolve to a service are skipped.
pub fn interested_service_names<'a>(
    client: &Client,
    services: &'a [ServiceOption],
) -> Vec<&'a str> {
    client
        .interested_services
        .iter()
        .filter_map(|id| services.iter().find(|s| &s.id == id))
        .map(|s| s.name.as_str())
        .collect()
}

// --- Project board ---

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectColumn<'a> {
    pub status: ProjectStatus,
    pub projects: Vec<&'a Project>,
}

/// One column per project status, in board order, empty columns included.
pub fn projects_by_status(projects: &[Project]) -> Vec<ProjectColumn<'_>> {
    ProjectStatus::ALL
        .iter()
        .map(|&status| ProjectColumn {
            status,
            projects: projects.iter().filter(|p| p.status == status).collect(),
        })
        .collect()
}

// --- Dashboard ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_clients: usize,
    pub calls_made: usize,
    pub active_projects: usize,
    pub revenue: f64,
    pub pipeline: f64,
    /// Ids of clients in the follow-up queue.
    pub follow_up: Vec<String>,
    pub status_histogram: Vec<StatusCount>,
}

pub fn dashboard(workspace: &Workspace, now: DateTime<Utc>) -> Dashboard {
    let clients = workspace.clients();
    let projects = workspace.projects();
    Dashboard {
        total_clients: clients.len(),
        calls_made: calls_made(clients),
        active_projects: active_project_count(projects),
        revenue: revenue(projects),
        pipeline: pipeline_projection(projects),
        follow_up: follow_up_queue(clients, now)
            .into_iter()
            .map(|c| c.id.clone())
            .collect(),
        status_histogram: status_histogram(clients),
    }
}
