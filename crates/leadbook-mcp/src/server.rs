use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use leadbook_core::rules::{self, ClientFilter};
use leadbook_core::{
    next_interaction_id, AiSettings, Client, ClientDraft, Interaction, InteractionKind,
    ProjectDraft, ServiceDraft, Workspace, WorkspaceError,
};
use leadbook_suggest::{
    generate, Generated, LlmEngine, PromptKind, ProspectContext, TextGenerator, Tone,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::requests::*;

const INSTRUCTIONS: &str = r#"leadbook is a small-agency CRM. It tracks prospects and clients, their sales-pipeline status, logged interactions, projects won from them, and the catalog of services the agency sells.

## Entities
- **Client**: contact name, company, industry, contact details, audit notes, status (Lead, Contacted, Negotiating, Closed, Lost), interested service IDs and a log of interactions.
- **Interaction**: a dated Call, Email, Meeting or Note logged against a client. Logging one moves the client's lastContacted date.
- **Project**: work for a client with a deadline, value and status (Planning, In Progress, Review, Completed). New projects always start in Planning.
- **Service**: a sellable offering with a price estimate.

## Workflow
1. `dashboard` for the overview, `follow_up_queue` for open clients not contacted in over 14 days.
2. After talking to a client, `log_interaction` so the follow-up queue stays accurate.
3. `generate_cold_call_script`, `generate_email_draft` and `analyze_interaction_notes` draft sales copy. Nothing they return is saved.

Statuses may move freely in any direction. Deleting a client keeps its projects; deleting a service keeps the IDs on clients."#;

fn text_error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

fn workspace_error(e: WorkspaceError) -> CallToolResult {
    text_error(e.to_string())
}

fn json_success<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CallToolResult::success(vec![Content::text(json)]),
        Err(e) => text_error(format!("Serialization error: {}", e)),
    }
}

fn generated_result(generated: Generated) -> CallToolResult {
    if generated.is_error() {
        text_error(generated.into_text())
    } else {
        CallToolResult::success(vec![Content::text(generated.into_text())])
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|e| format!("Invalid {} '{}': expected YYYY-MM-DD ({})", field, raw, e)),
    }
}

fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("Invalid now '{}': expected RFC 3339 ({})", raw, e)),
    }
}

fn client_summary(client: &Client) -> serde_json::Value {
    json!({
        "id": client.id,
        "name": client.name,
        "company": client.company,
        "industry": client.industry,
        "status": client.status,
        "lastContacted": client.last_contacted,
        "interactions": client.interactions.len(),
    })
}

// --- Server ---

#[derive(Clone)]
pub struct LeadbookServer {
    workspace: Arc<Mutex<Workspace>>,
    settings: Arc<AiSettings>,
    generator: Arc<dyn TextGenerator>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LeadbookServer {
    pub fn new(workspace: Workspace, settings: AiSettings) -> Self {
        Self::with_generator(workspace, settings, Arc::new(LlmEngine))
    }

    pub fn with_generator(
        workspace: Workspace,
        settings: AiSettings,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(workspace)),
            settings: Arc::new(settings),
            generator,
            tool_router: Self::tool_router(),
        }
    }

    // --- Clients ---

    #[tool(
        description = "List clients as summaries. Optionally filter by a search string (matches name, company, industry; case-insensitive) and/or a status."
    )]
    async fn list_clients(
        &self,
        Parameters(req): Parameters<ListClientsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let filter = ClientFilter {
            search: req.search.unwrap_or_default(),
            status: req.status,
        };
        let ws = self.workspace.lock().await;
        let clients: Vec<_> = rules::filter_clients(ws.clients(), &filter)
            .into_iter()
            .map(client_summary)
            .collect();
        Ok(json_success(&clients))
    }

    #[tool(
        description = "Get one client in full, including interactions and the names of the services they are interested in."
    )]
    async fn get_client(
        &self,
        Parameters(req): Parameters<ClientIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let ws = self.workspace.lock().await;
        let Some(client) = ws.client(&req.client_id) else {
            return Ok(text_error(format!("Client '{}' not found", req.client_id)));
        };
        let services = rules::interested_service_names(client, ws.services());
        Ok(json_success(&json!({
            "client": client,
            "interestedServiceNames": services,
        })))
    }

    #[tool(
        description = "Add a client. Returns the new client's ID. Blank name/company get placeholders; status defaults to Lead."
    )]
    async fn add_client(
        &self,
        Parameters(req): Parameters<AddClientRequest>,
    ) -> Result<CallToolResult, McpError> {
        let draft = ClientDraft {
            name: req.name.unwrap_or_default(),
            company: req.company.unwrap_or_default(),
            industry: req.industry.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            website: req.website.unwrap_or_default(),
            project_notes: req.project_notes.unwrap_or_default(),
            status: req.status,
            interested_services: req.interested_services.unwrap_or_default(),
        };

        let mut ws = self.workspace.lock().await;
        let id = match req.id {
            Some(id) => {
                let id = id.trim().to_string();
                if id.is_empty() {
                    return Ok(text_error("Client id must not be blank"));
                }
                ws.add_client(draft.into_client(id.clone())).map(|()| id)
            }
            None => ws.create_client(draft),
        };
        let id = match id {
            Ok(id) => id,
            Err(e) => return Ok(workspace_error(e)),
        };
        tracing::info!(client_id = %id, "client added via mcp");
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added client {}",
            id
        ))]))
    }

    #[tool(
        description = "Update fields of an existing client. Omitted fields are left unchanged. Status may be set to any value."
    )]
    async fn update_client(
        &self,
        Parameters(req): Parameters<UpdateClientRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        let Some(existing) = ws.client(&req.client_id) else {
            return Ok(workspace_error(WorkspaceError::NotFound {
                entity: "client",
                id: req.client_id,
            }));
        };

        let mut client = existing.clone();
        if let Some(v) = req.name {
            client.name = v;
        }
        if let Some(v) = req.company {
            client.company = v;
        }
        if let Some(v) = req.industry {
            client.industry = v;
        }
        if let Some(v) = req.email {
            client.email = v;
        }
        if let Some(v) = req.phone {
            client.phone = v;
        }
        if let Some(v) = req.website {
            client.website = v;
        }
        if let Some(v) = req.project_notes {
            client.project_notes = v;
        }
        if let Some(v) = req.status {
            client.status = v;
        }
        if let Some(v) = req.interested_services {
            client.interested_services = v;
        }

        match ws.update_client(client) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Updated client {}",
                req.client_id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(description = "Delete a client. Projects referencing the client are kept.")]
    async fn delete_client(
        &self,
        Parameters(req): Parameters<ClientIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        match ws.delete_client(&req.client_id) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted client {}",
                req.client_id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(
        description = "Log an interaction (Call by default) against a client and set their last-contacted date to it."
    )]
    async fn log_interaction(
        &self,
        Parameters(req): Parameters<LogInteractionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let date = match parse_date(req.date.as_deref(), "date") {
            Ok(d) => d.unwrap_or_else(today),
            Err(e) => return Ok(text_error(e)),
        };
        let notes = req.notes.unwrap_or_default();

        let mut ws = self.workspace.lock().await;
        let result = match req.kind.unwrap_or(InteractionKind::Call) {
            InteractionKind::Call => ws.log_call(&req.client_id, date, &notes),
            kind => {
                let id = next_interaction_id(&ws);
                let interaction = Interaction {
                    id: id.clone(),
                    date,
                    kind,
                    notes,
                };
                ws.log_interaction(&req.client_id, interaction).map(|()| id)
            }
        };

        match result {
            Ok(id) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Logged interaction {} for client {} on {}",
                id, req.client_id, date
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(description = "Toggle whether a client is interested in a service.")]
    async fn toggle_service_interest(
        &self,
        Parameters(req): Parameters<ToggleServiceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        match ws.toggle_interested_service(&req.client_id, &req.service_id) {
            Ok(true) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Client {} is now interested in {}",
                req.client_id, req.service_id
            ))])),
            Ok(false) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Client {} is no longer interested in {}",
                req.client_id, req.service_id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    // --- Projects ---

    #[tool(
        description = "List projects grouped into board columns by status (Planning, In Progress, Review, Completed). Each project carries its client's name, or \"Unknown Client\" if that client was deleted."
    )]
    async fn list_projects(&self) -> Result<CallToolResult, McpError> {
        let ws = self.workspace.lock().await;
        let columns: Vec<_> = rules::projects_by_status(ws.projects())
            .into_iter()
            .map(|column| {
                let projects: Vec<_> = column
                    .projects
                    .iter()
                    .map(|p| {
                        json!({
                            "project": p,
                            "clientName": ws.client_display_name(&p.client_id),
                        })
                    })
                    .collect();
                json!({ "status": column.status, "projects": projects })
            })
            .collect();
        Ok(json_success(&columns))
    }

    #[tool(description = "Add a project for a client. New projects always start in Planning.")]
    async fn add_project(
        &self,
        Parameters(req): Parameters<AddProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        if req.client_id.trim().is_empty() || req.title.trim().is_empty() {
            return Ok(text_error("client_id and title are required"));
        }
        let deadline = match parse_date(req.deadline.as_deref(), "deadline") {
            Ok(d) => d,
            Err(e) => return Ok(text_error(e)),
        };
        let draft = ProjectDraft {
            client_id: req.client_id,
            title: req.title,
            deadline,
            value: req.value,
            description: req.description.unwrap_or_default(),
        };

        let mut ws = self.workspace.lock().await;
        match ws.create_project(draft, today()) {
            Ok(id) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Added project {}",
                id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(description = "Set a project's status. Any status may follow any other.")]
    async fn update_project_status(
        &self,
        Parameters(req): Parameters<UpdateProjectStatusRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        match ws.update_project_status(&req.project_id, req.status) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Project {} is now {}",
                req.project_id, req.status
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(description = "Delete a project")]
    async fn delete_project(
        &self,
        Parameters(req): Parameters<ProjectIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        match ws.delete_project(&req.project_id) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted project {}",
                req.project_id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    // --- Services ---

    #[tool(description = "List the service catalog")]
    async fn list_services(&self) -> Result<CallToolResult, McpError> {
        let ws = self.workspace.lock().await;
        Ok(json_success(&ws.services()))
    }

    #[tool(description = "Add a service to the catalog")]
    async fn add_service(
        &self,
        Parameters(req): Parameters<AddServiceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let draft = ServiceDraft {
            name: req.name,
            description: req.description.unwrap_or_default(),
            price_estimate: req.price_estimate,
        };
        let mut ws = self.workspace.lock().await;
        match ws.create_service(draft) {
            Ok(id) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Added service {}",
                id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    #[tool(
        description = "Delete a service from the catalog. Clients that listed it keep the ID."
    )]
    async fn delete_service(
        &self,
        Parameters(req): Parameters<ServiceIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ws = self.workspace.lock().await;
        match ws.delete_service(&req.service_id) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted service {}",
                req.service_id
            ))])),
            Err(e) => Ok(workspace_error(e)),
        }
    }

    // --- Views ---

    #[tool(
        description = "Clients due for follow-up: not Closed or Lost, and never contacted or last contacted more than 14 days ago."
    )]
    async fn follow_up_queue(
        &self,
        Parameters(req): Parameters<AsOfRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = match parse_now(req.now.as_deref()) {
            Ok(now) => now,
            Err(e) => return Ok(text_error(e)),
        };
        let ws = self.workspace.lock().await;
        let queue: Vec<_> = rules::follow_up_queue(ws.clients(), now)
            .into_iter()
            .map(|c| {
                let mut summary = client_summary(c);
                summary["daysSinceContact"] =
                    json!(c.last_contacted.map(|d| rules::days_since(d, now)));
                summary
            })
            .collect();
        Ok(json_success(&queue))
    }

    #[tool(
        description = "Pipeline metrics: total clients, calls made, active projects, revenue (all projects), pipeline projection (revenue x 1.5), follow-up queue IDs and client count per status."
    )]
    async fn dashboard(
        &self,
        Parameters(req): Parameters<AsOfRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = match parse_now(req.now.as_deref()) {
            Ok(now) => now,
            Err(e) => return Ok(text_error(e)),
        };
        let ws = self.workspace.lock().await;
        Ok(json_success(&rules::dashboard(&ws, now)))
    }

    // --- Generation ---

    /// Resolve the prompt context under the lock, then release it before the
    /// remote call so other tools keep working meanwhile.
    async fn prospect_context(&self, client_id: &str) -> Result<ProspectContext, CallToolResult> {
        let ws = self.workspace.lock().await;
        match ws.client(client_id) {
            Some(client) => Ok(ProspectContext::from_client(client, ws.services())),
            None => Err(text_error(format!("Client '{}' not found", client_id))),
        }
    }

    async fn run(&self, kind: PromptKind, context: &ProspectContext) -> CallToolResult {
        let generated = generate(self.generator.as_ref(), &self.settings, kind, context).await;
        generated_result(generated)
    }

    #[tool(
        description = "Draft a cold call script for a client from their audit notes and interested services. The script is returned, not saved."
    )]
    async fn generate_cold_call_script(
        &self,
        Parameters(req): Parameters<ClientIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.prospect_context(&req.client_id).await {
            Ok(context) => Ok(self.run(PromptKind::ColdCallScript, &context).await),
            Err(result) => Ok(result),
        }
    }

    #[tool(
        description = "Suggest three next actions to close the deal, from free-text notes or a client's logged interactions."
    )]
    async fn analyze_interaction_notes(
        &self,
        Parameters(req): Parameters<AnalyzeNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let context = match (req.notes, req.client_id) {
            (Some(notes), _) if !notes.trim().is_empty() => ProspectContext::from_notes(notes),
            (_, Some(client_id)) => match self.prospect_context(&client_id).await {
                Ok(context) => context,
                Err(result) => return Ok(result),
            },
            _ => return Ok(text_error("Provide either notes or client_id")),
        };
        Ok(self.run(PromptKind::InteractionAnalysis, &context).await)
    }

    #[tool(
        description = "Draft an outreach or follow-up email with a subject line. Tone: professional (default), casual or urgent."
    )]
    async fn generate_email_draft(
        &self,
        Parameters(req): Parameters<EmailDraftRequest>,
    ) -> Result<CallToolResult, McpError> {
        let tone = req.tone.unwrap_or(Tone::Professional);
        match self.prospect_context(&req.client_id).await {
            Ok(context) => Ok(self.run(PromptKind::EmailDraft(tone), &context).await),
            Err(result) => Ok(result),
        }
    }
}

#[tool_handler]
impl ServerHandler for LeadbookServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
