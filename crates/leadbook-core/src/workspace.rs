//! The in-memory state container and every operation that changes it.
//!
//! Mutations on an unknown id return `WorkspaceError::NotFound` and leave the
//! workspace untouched. Adding an entity whose id is already taken returns
//! `WorkspaceError::DuplicateId`, also without side effects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::WorkspaceError;
use crate::{
    next_client_id, next_interaction_id, next_project_id, next_service_id, Client, ClientStatus,
    Interaction, InteractionKind, Project, ProjectStatus, ServiceOption,
};

pub const UNKNOWN_CLIENT: &str = "Unknown Client";
pub const EMPTY_CALL_NOTES: &str = "No notes added.";

/// Owns the client, project and service collections. Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    services: Vec<ServiceOption>,
}

/// Form input for a new client. Blank name and company get placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub company: String,
    pub industry: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub project_notes: String,
    pub status: Option<ClientStatus>,
    pub interested_services: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub client_id: String,
    pub title: String,
    /// Defaults to the creation day.
    pub deadline: Option<NaiveDate>,
    pub value: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub price_estimate: f64,
}

impl ClientDraft {
    /// Apply the form defaults and build a client under `id`.
    pub fn into_client(self, id: String) -> Client {
        Client {
            id,
            name: or_placeholder(self.name, "Unknown"),
            company: or_placeholder(self.company, "Unknown Company"),
            industry: self.industry,
            email: self.email,
            phone: self.phone,
            website: self.website,
            project_notes: self.project_notes,
            status: self.status.unwrap_or(ClientStatus::Lead),
            last_contacted: None,
            interested_services: self.interested_services,
            interactions: Vec::new(),
        }
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workspace from existing collections, e.g. fixture data.
    ///
    /// Duplicate ids are rejected the same way `add_*` would reject them.
    pub fn from_parts(
        clients: Vec<Client>,
        projects: Vec<Project>,
        services: Vec<ServiceOption>,
    ) -> Result<Self, WorkspaceError> {
        let mut workspace = Self::new();
        for service in services {
            workspace.add_service(service)?;
        }
        for client in clients {
            workspace.insert_client(client)?;
        }
        for project in projects {
            workspace.insert_project(project)?;
        }
        Ok(workspace)
    }

    // --- Read views ---

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn services(&self) -> &[ServiceOption] {
        &self.services
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Contact name for a client id, or "Unknown Client" when it dangles.
    pub fn client_display_name(&self, client_id: &str) -> &str {
        self.client(client_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CLIENT)
    }

    fn client_mut(&mut self, id: &str) -> Result<&mut Client, WorkspaceError> {
        self.clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| WorkspaceError::not_found("client", id))
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut Project, WorkspaceError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| WorkspaceError::not_found("project", id))
    }

    // --- Clients ---

    pub fn add_client(&mut self, client: Client) -> Result<(), WorkspaceError> {
        self.insert_client(client)
    }

    fn insert_client(&mut self, client: Client) -> Result<(), WorkspaceError> {
        if self.client(&client.id).is_some() {
            return Err(WorkspaceError::duplicate("client", &client.id));
        }
        tracing::debug!(client_id = %client.id, company = %client.company, "client added");
        self.clients.push(client);
        Ok(())
    }

    /// Create a client from form input with a freshly generated id.
    pub fn create_client(&mut self, draft: ClientDraft) -> Result<String, WorkspaceError> {
        let id = next_client_id(self);
        self.insert_client(draft.into_client(id.clone()))?;
        Ok(id)
    }

    /// Replace the stored client that has the same id.
    pub fn update_client(&mut self, client: Client) -> Result<(), WorkspaceError> {
        let slot = self.client_mut(&client.id)?;
        tracing::debug!(client_id = %client.id, status = %client.status, "client updated");
        *slot = client;
        Ok(())
    }

    /// Remove a client. Projects pointing at it are left alone.
    pub fn delete_client(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| WorkspaceError::not_found("client", id))?;
        self.clients.remove(index);
        tracing::debug!(client_id = %id, "client deleted");
        Ok(())
    }

    /// Append an interaction and move `last_contacted` to its date.
    pub fn log_interaction(
        &mut self,
        client_id: &str,
        interaction: Interaction,
    ) -> Result<(), WorkspaceError> {
        let taken = self
            .clients
            .iter()
            .flat_map(|c| &c.interactions)
            .any(|i| i.id == interaction.id);
        if taken {
            return Err(WorkspaceError::duplicate("interaction", &interaction.id));
        }

        let client = self.client_mut(client_id)?;
        tracing::debug!(
            client_id = %client_id,
            interaction_id = %interaction.id,
            kind = ?interaction.kind,
            "interaction logged"
        );
        client.last_contacted = Some(interaction.date);
        client.interactions.push(interaction);
        Ok(())
    }

    /// Log a call made on `today`. Returns the new interaction id.
    pub fn log_call(
        &mut self,
        client_id: &str,
        today: NaiveDate,
        notes: &str,
    ) -> Result<String, WorkspaceError> {
        let id = next_interaction_id(self);
        let notes = if notes.trim().is_empty() {
            EMPTY_CALL_NOTES.to_string()
        } else {
            notes.to_string()
        };
        let interaction = Interaction {
            id: id.clone(),
            date: today,
            kind: InteractionKind::Call,
            notes,
        };
        self.log_interaction(client_id, interaction)?;
        Ok(id)
    }

    /// Flip whether the client is interested in a service.
    ///
    /// Returns `true` when the service is now on the client's list. The service
    /// id itself is not checked against the catalog.
    pub fn toggle_interested_service(
        &mut self,
        client_id: &str,
        service_id: &str,
    ) -> Result<bool, WorkspaceError> {
        let client = self.client_mut(client_id)?;
        if client.is_interested_in(service_id) {
            client.interested_services.retain(|id| id != service_id);
            Ok(false)
        } else {
            client.interested_services.push(service_id.to_string());
            Ok(true)
        }
    }

    // --- Projects ---

    /// Append a project. It always starts out in `Planning`.
    pub fn add_project(&mut self, project: Project) -> Result<(), WorkspaceError> {
        self.insert_project(Project {
            status: ProjectStatus::Planning,
            ..project
        })
    }

    fn insert_project(&mut self, project: Project) -> Result<(), WorkspaceError> {
        if self.project(&project.id).is_some() {
            return Err(WorkspaceError::duplicate("project", &project.id));
        }
        tracing::debug!(
            project_id = %project.id,
            client_id = %project.client_id,
            value = project.value,
            "project added"
        );
        self.projects.push(project);
        Ok(())
    }

    /// Create a project from form input with a freshly generated id.
    pub fn create_project(
        &mut self,
        draft: ProjectDraft,
        today: NaiveDate,
    ) -> Result<String, WorkspaceError> {
        let id = next_project_id(self);
        self.add_project(Project {
            id: id.clone(),
            client_id: draft.client_id,
            title: draft.title,
            status: ProjectStatus::Planning,
            deadline: draft.deadline.unwrap_or(today),
            value: draft.value.unwrap_or(0.0),
            description: draft.description,
        })?;
        Ok(id)
    }

    /// Set a project's status. Every transition is allowed.
    pub fn update_project_status(
        &mut self,
        project_id: &str,
        status: ProjectStatus,
    ) -> Result<(), WorkspaceError> {
        let project = self.project_mut(project_id)?;
        tracing::debug!(
            project_id = %project_id,
            from = %project.status,
            to = %status,
            "project status changed"
        );
        project.status = status;
        Ok(())
    }

    pub fn delete_project(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| WorkspaceError::not_found("project", id))?;
        self.projects.remove(index);
        tracing::debug!(project_id = %id, "project deleted");
        Ok(())
    }

    // --- Services ---

    pub fn add_service(&mut self, service: ServiceOption) -> Result<(), WorkspaceError> {
        if self.service(&service.id).is_some() {
            return Err(WorkspaceError::duplicate("service", &service.id));
        }
        tracing::debug!(service_id = %service.id, name = %service.name, "service added");
        self.services.push(service);
        Ok(())
    }

    pub fn create_service(&mut self, draft: ServiceDraft) -> Result<String, WorkspaceError> {
        let id = next_service_id(self);
        self.add_service(ServiceOption {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            price_estimate: draft.price_estimate,
        })?;
        Ok(id)
    }

    /// Remove a service from the catalog. Client interest lists keep the id.
    pub fn delete_service(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let index = self
            .services
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WorkspaceError::not_found("service", id))?;
        self.services.remove(index);
        tracing::debug!(service_id = %id, "service deleted");
        Ok(())
    }
}
