//! Centralized error types for the starscroll core.
//!
//! Every failure the core can hit is typed here. The controller is the
//! only place errors turn into state: it logs them and parks the session
//! in the halted phase, which is sticky for the rest of the session.

use crate::host::TypeIndex;

/// Main error type for the game core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Spawn error: {0}")]
    Spawn(#[from] SpawnError),
}

/// A named entity or component the content contract promises is missing,
/// or resolved to the wrong component type.
///
/// These indicate broken content or a host contract violation, not a
/// runtime condition; the session cannot recover without a restart.
#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    #[error("Scene does not have an entity named {0}")]
    EntityNotFound(String),

    #[error("Entity {entity} has no component named {component}: {source}")]
    ComponentNotFound {
        entity: String,
        component: String,
        source: HostError,
    },

    #[error("Host has no component type registered for extension '{0}'")]
    UnknownComponentType(String),

    #[error("Component {component} has type index {actual}, expected {expected}")]
    ComponentTypeMismatch {
        component: String,
        expected: TypeIndex,
        actual: TypeIndex,
    },
}

/// Failures of the asynchronous level-collection load.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Load request rejected by the host: {0}")]
    RequestFailed(HostError),

    #[error("Failed to load collection '{0}'")]
    LoadFailed(String),

    #[error("Failed to get level collection '{0}'")]
    AcquireFailed(String),
}

/// Failures while spawning a star.
///
/// A full star pool is not an error; it is the expected steady state once
/// the screen saturates, and the spawner just skips the attempt.
#[derive(thiserror::Error, Debug)]
pub enum SpawnError {
    #[error("Entity instance index pool is exhausted; raise the host's max instance limit")]
    InstanceIndexExhausted,

    #[error("Host spawn primitive failed: {0}")]
    Host(#[from] HostError),
}

/// Opaque failure reported by a host primitive.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
