pub mod error;
pub mod rules;
pub mod seed;
pub mod settings;
pub mod workspace;

pub use error::WorkspaceError;
pub use settings::{ai_configured, AiSettings};
pub use workspace::{ClientDraft, ProjectDraft, ServiceDraft, Workspace};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// --- Types ---

/// Where a client sits in the sales pipeline. Any status may move to any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
pub enum ClientStatus {
    Lead,
    Contacted,
    Negotiating,
    Closed,
    Lost,
}

impl ClientStatus {
    /// Every status, in pipeline order.
    pub const ALL: [ClientStatus; 5] = [
        ClientStatus::Lead,
        ClientStatus::Contacted,
        ClientStatus::Negotiating,
        ClientStatus::Closed,
        ClientStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Lead => "Lead",
            ClientStatus::Contacted => "Contacted",
            ClientStatus::Negotiating => "Negotiating",
            ClientStatus::Closed => "Closed",
            ClientStatus::Lost => "Lost",
        }
    }

    /// Closed and lost clients are finished; everything else is still in play.
    pub fn is_open(&self) -> bool {
        !matches!(self, ClientStatus::Closed | ClientStatus::Lost)
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
pub enum ProjectStatus {
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Completed,
}

impl ProjectStatus {
    /// Every status, in board column order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Review,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Review => "Review",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
pub enum InteractionKind {
    Call,
    Email,
    Meeting,
    Note,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Call => "Call",
            InteractionKind::Email => "Email",
            InteractionKind::Meeting => "Meeting",
            InteractionKind::Note => "Note",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged outreach event. Never edited once appended to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_estimate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    /// Contact person.
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    /// Audit of what needs to be done for this client.
    #[serde(default)]
    pub project_notes: String,
    pub status: ClientStatus,
    /// Date of the most recently logged interaction, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<NaiveDate>,
    /// `ServiceOption` ids. May hold ids of services that were since deleted.
    #[serde(default)]
    pub interested_services: Vec<String>,
    /// Append-only, in the order they were logged.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Client {
    pub fn is_interested_in(&self, service_id: &str) -> bool {
        self.interested_services.iter().any(|id| id == service_id)
    }

    pub fn last_interaction(&self) -> Option<&Interaction> {
        self.interactions.last()
    }
}

/// Work won from a client. `client_id` is a plain reference and may dangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub description: String,
}

// --- Ids ---

/// One past the highest numeric suffix in use. If that would overflow, the
/// lowest unused suffix instead, so the result never names an existing id.
fn next_prefixed_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let used: HashSet<u64> = ids
        .filter_map(|id| id.strip_prefix(prefix).and_then(|n| n.parse::<u64>().ok()))
        .collect();
    let next = match used.iter().max() {
        None => 1,
        Some(&max) => match max.checked_add(1) {
            Some(next) => next,
            None => {
                let mut n = 1;
                while used.contains(&n) {
                    n += 1;
                }
                n
            }
        },
    };
    format!("{}{}", prefix, next)
}

/// Generate the next client ID by scanning existing clients: "c_{N}".
pub fn next_client_id(workspace: &Workspace) -> String {
    next_prefixed_id("c_", workspace.clients().iter().map(|c| c.id.as_str()))
}

/// Generate the next project ID by scanning existing projects: "p_{N}".
pub fn next_project_id(workspace: &Workspace) -> String {
    next_prefixed_id("p_", workspace.projects().iter().map(|p| p.id.as_str()))
}

/// Generate the next service ID by scanning existing services: "srv_{N}".
pub fn next_service_id(workspace: &Workspace) -> String {
    next_prefixed_id("srv_", workspace.services().iter().map(|s| s.id.as_str()))
}

/// Generate the next interaction ID by scanning interactions across all clients.
pub fn next_interaction_id(workspace: &Workspace) -> String {
    next_prefixed_id(
        "i_",
        workspace
            .clients()
            .iter()
            .flat_map(|c| &c.interactions)
            .map(|i| i.id.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_prefixed_id_skips_foreign_ids() {
        let ids = ["c_3", "c_abc", "p_9", "c_10"];
        assert_eq!(next_prefixed_id("c_", ids.iter().copied()), "c_11");
        assert_eq!(next_prefixed_id("x_", ids.iter().copied()), "x_1");
    }

    #[test]
    fn next_prefixed_id_falls_back_to_lowest_free_suffix_at_u64_max() {
        let ids = ["c_18446744073709551615", "c_1", "c_2"];
        assert_eq!(next_prefixed_id("c_", ids.iter().copied()), "c_3");
    }

    #[test]
    fn project_status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: ProjectStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, ProjectStatus::InProgress);
    }

    #[test]
    fn interaction_serializes_kind_as_type() {
        let interaction = Interaction {
            id: "i_1".into(),
            date: NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
            kind: InteractionKind::Call,
            notes: "Initial intro.".into(),
        };
        let val = serde_json::to_value(&interaction).unwrap();
        assert_eq!(val["type"], "Call");
        assert_eq!(val["date"], "2023-10-25");
    }

    #[test]
    fn interaction_kind_displays_its_wire_name() {
        assert_eq!(InteractionKind::Meeting.to_string(), "Meeting");
        let json = serde_json::to_string(&InteractionKind::Note).unwrap();
        assert_eq!(json, format!("\"{}\"", InteractionKind::Note));
    }

    #[test]
    fn closed_and_lost_are_not_open() {
        let open: Vec<_> = ClientStatus::ALL.iter().filter(|s| s.is_open()).collect();
        assert_eq!(
            open,
            vec![
                &ClientStatus::Lead,
                &ClientStatus::Contacted,
                &ClientStatus::Negotiating
            ]
        );
    }
}
