use leadbook_core::{ClientStatus, InteractionKind, ProjectStatus};
use leadbook_suggest::Tone;
use rmcp::schemars;
use serde::Deserialize;

// --- Clients ---

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListClientsRequest {
    /// Case-insensitive text matched against contact name, company and industry
    pub search: Option<String>,
    /// Only return clients with this status
    pub status: Option<ClientStatus>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClientIdRequest {
    /// ID of the client (e.g. "c_1")
    pub client_id: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct AddClientRequest {
    /// Explicit ID for the new client. Omit to have one generated ("c_N").
    pub id: Option<String>,
    /// Contact person name. Defaults to "Unknown".
    pub name: Option<String>,
    /// Business name. Defaults to "Unknown Company".
    pub company: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Audit notes: what needs to be done for this client
    pub project_notes: Option<String>,
    /// Initial pipeline status. Defaults to "Lead".
    pub status: Option<ClientStatus>,
    /// IDs of services the client is interested in
    pub interested_services: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct UpdateClientRequest {
    /// ID of the client to update
    pub client_id: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub project_notes: Option<String>,
    /// New pipeline status. Any status may follow any other.
    pub status: Option<ClientStatus>,
    /// Replacement list of interested service IDs
    pub interested_services: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogInteractionRequest {
    /// ID of the client that was contacted
    pub client_id: String,
    /// "Call", "Email", "Meeting" or "Note". Defaults to "Call".
    pub kind: Option<InteractionKind>,
    /// ISO date (YYYY-MM-DD). Defaults to today (UTC).
    pub date: Option<String>,
    /// What happened
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleServiceRequest {
    pub client_id: String,
    /// Service ID to add to or remove from the client's interests
    pub service_id: String,
}

// --- Projects ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddProjectRequest {
    /// Client the project was won from
    pub client_id: String,
    pub title: String,
    /// ISO date (YYYY-MM-DD). Defaults to today (UTC).
    pub deadline: Option<String>,
    /// Monetary value. Defaults to 0.
    pub value: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProjectStatusRequest {
    pub project_id: String,
    /// "Planning", "In Progress", "Review" or "Completed"
    pub status: ProjectStatus,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectIdRequest {
    /// ID of the project (e.g. "p_1")
    pub project_id: String,
}

// --- Services ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddServiceRequest {
    pub name: String,
    pub description: Option<String>,
    /// Typical price for this service
    pub price_estimate: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ServiceIdRequest {
    /// ID of the service (e.g. "srv_1")
    pub service_id: String,
}

// --- Views ---

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct AsOfRequest {
    /// RFC 3339 timestamp to evaluate against. Defaults to now.
    pub now: Option<String>,
}

// --- Generation ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeNotesRequest {
    /// Analyze this client's logged interactions
    pub client_id: Option<String>,
    /// Free-text call notes. Takes precedence over client_id.
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EmailDraftRequest {
    pub client_id: String,
    /// "professional", "casual" or "urgent". Defaults to "professional".
    pub tone: Option<Tone>,
}
