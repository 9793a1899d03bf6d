use serde::{Deserialize, Serialize};

use crate::core::KernelError;
use crate::domain::{MaterialDefinition, MaterialId, MaterialManifestEntry};
use crate::simulation::{KernelConfig, PerfStats};

/// Caller -> kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// (Re)create the kernel with fresh registry, grid and RNG
    Init(KernelConfig),
    RegisterMaterial {
        material: MaterialDefinition,
    },
    ReplaceGrid {
        grid: Vec<MaterialId>,
    },
    /// Overwrite cells; with `echo: false` no response is sent
    PaintCells {
        material: MaterialId,
        cells: Vec<(i32, i32)>,
        #[serde(default = "echo_default")]
        echo: bool,
    },
    PaintCircle {
        material: MaterialId,
        cx: i32,
        cy: i32,
        radius: i32,
        #[serde(default = "echo_default")]
        echo: bool,
    },
    Clear,
    Step,
    GetGrid,
    GetMaterials,
    GetStats,
}

impl Command {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Wire name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Init(_) => "init",
            Command::RegisterMaterial { .. } => "register_material",
            Command::ReplaceGrid { .. } => "replace_grid",
            Command::PaintCells { .. } => "paint_cells",
            Command::PaintCircle { .. } => "paint_circle",
            Command::Clear => "clear",
            Command::Step => "step",
            Command::GetGrid => "get_grid",
            Command::GetMaterials => "get_materials",
            Command::GetStats => "get_stats",
        }
    }
}

fn echo_default() -> bool {
    true
}

/// Kernel -> caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ready {
        width: u32,
        height: u32,
    },
    MaterialRegistered {
        id: MaterialId,
        name: String,
    },
    /// `grid` carries the current buffer when the command echoes it
    GridReplaced {
        #[serde(skip_serializing_if = "Option::is_none")]
        grid: Option<Vec<MaterialId>>,
        width: u32,
        height: u32,
    },
    Stepped {
        grid: Vec<MaterialId>,
        width: u32,
        height: u32,
        frame: u64,
    },
    Grid {
        grid: Vec<MaterialId>,
        width: u32,
        height: u32,
    },
    Materials {
        materials: Vec<MaterialManifestEntry>,
    },
    Stats {
        stats: PerfStats,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl Response {
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Ready { .. } => "ready",
            Response::MaterialRegistered { .. } => "material_registered",
            Response::GridReplaced { .. } => "grid_replaced",
            Response::Stepped { .. } => "stepped",
            Response::Grid { .. } => "grid",
            Response::Materials { .. } => "materials",
            Response::Stats { .. } => "stats",
            Response::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Grid buffer carried by the response, if any
    pub fn grid(&self) -> Option<&[MaterialId]> {
        match self {
            Response::Stepped { grid, .. } | Response::Grid { grid, .. } => Some(grid),
            Response::GridReplaced { grid, .. } => grid.as_deref(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","kind":"serialize","message":"{}"}}"#, e)
        })
    }
}

impl From<&KernelError> for Response {
    fn from(err: &KernelError) -> Self {
        Response::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
