use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Vertex,
    Edge,
    Annotation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Vertex => "vertex",
            EntityKind::Edge => "edge",
            EntityKind::Annotation => "annotation",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u32 },
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
    #[error("malformed layout configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn vertex_not_found(id: u32) -> Self {
        Error::NotFound { kind: EntityKind::Vertex, id }
    }
    pub fn edge_not_found(id: u32) -> Self {
        Error::NotFound { kind: EntityKind::Edge, id }
    }
    pub fn annotation_not_found(id: u32) -> Self {
        Error::NotFound { kind: EntityKind::Annotation, id }
    }
    pub fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument { param, reason: reason.into() }
    }

    /// Stable machine-readable code, shared with the JS binding.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "invalid_id",
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Config(_) => "invalid_config",
        }
    }
}
