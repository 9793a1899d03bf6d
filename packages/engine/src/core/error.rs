//! Kernel error taxonomy
//!
//! Only integrity problems and rejected payloads surface as errors. Soft
//! misses (an unresolved material name, a blocked move) are ordinary
//! outcomes of a tick and never reach this type.

use thiserror::Error;

use crate::domain::MaterialId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("grid buffer size mismatch: expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cell {index} holds material id {id} but only {registry_size} materials are registered")]
    InvalidMaterialId {
        index: usize,
        id: MaterialId,
        registry_size: usize,
    },

    #[error("unknown material id {0}")]
    UnknownMaterial(MaterialId),

    #[error("grid dimensions must be non-zero and fit in memory (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("kernel is not initialized; send `init` first")]
    NotInitialized,

    #[error("material registry is full")]
    RegistryFull,

    #[error("invalid material definition: {0}")]
    InvalidDefinition(String),

    #[error("kernel worker has stopped")]
    WorkerStopped,
}

impl KernelError {
    /// Stable snake_case tag used in `error{kind}` responses.
    pub fn kind(&self) -> &'static str {
        match self {
            KernelError::SizeMismatch { .. } => "size_mismatch",
            KernelError::InvalidMaterialId { .. } => "invalid_material_id",
            KernelError::UnknownMaterial(_) => "unknown_material",
            KernelError::InvalidDimensions { .. } => "invalid_dimensions",
            KernelError::NotInitialized => "not_initialized",
            KernelError::RegistryFull => "registry_full",
            KernelError::InvalidDefinition(_) => "invalid_definition",
            KernelError::WorkerStopped => "worker_stopped",
        }
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
