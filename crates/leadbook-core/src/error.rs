#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} id already in use: {id}")]
    DuplicateId { entity: &'static str, id: String },
}

impl WorkspaceError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate(entity: &'static str, id: &str) -> Self {
        Self::DuplicateId {
            entity,
            id: id.to_string(),
        }
    }
}
