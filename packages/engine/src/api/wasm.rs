//! `wasm-bindgen` facade over the execution boundary
//!
//! One method per command. Grid buffers cross into JS as `Uint16Array`s the
//! worker can transfer to the main thread; everything else is plain JSON.
//! Error responses reject with a `"kind: message"` string.

use js_sys::{Object, Reflect, Uint16Array, JSON};
use wasm_bindgen::prelude::*;

use crate::domain::{MaterialDefinition, MaterialId};
use crate::protocol::{Command, ExecutionBoundary, Response};
use crate::simulation::{KernelConfig, DEFAULT_SEED};

#[wasm_bindgen]
pub struct KernelWorker {
    boundary: ExecutionBoundary,
}

impl Default for KernelWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl KernelWorker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            boundary: ExecutionBoundary::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn initialized(&self) -> bool {
        self.boundary.is_initialized()
    }

    /// (Re)create the kernel. `seed` defaults to the kernel's fixed seed.
    pub fn init(&mut self, width: u32, height: u32, seed: Option<u32>) -> Result<JsValue, JsValue> {
        let config = KernelConfig::new(width, height).with_seed(seed.map_or(DEFAULT_SEED, u64::from));
        self.run(Command::Init(config))
    }

    /// Register a material definition given as JSON
    pub fn register_material(&mut self, json: String) -> Result<JsValue, JsValue> {
        let material = MaterialDefinition::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.run(Command::RegisterMaterial { material })
    }

    pub fn replace_grid(&mut self, grid: Vec<MaterialId>) -> Result<JsValue, JsValue> {
        self.run(Command::ReplaceGrid { grid })
    }

    /// `coords` is a flat `[x0, y0, x1, y1, ...]` list
    pub fn paint_cells(&mut self, material: MaterialId, coords: Vec<i32>, echo: bool) -> Result<JsValue, JsValue> {
        let cells = coords.chunks_exact(2).map(|p| (p[0], p[1])).collect();
        self.run(Command::PaintCells { material, cells, echo })
    }

    pub fn paint_circle(
        &mut self,
        material: MaterialId,
        cx: i32,
        cy: i32,
        radius: i32,
        echo: bool,
    ) -> Result<JsValue, JsValue> {
        self.run(Command::PaintCircle { material, cx, cy, radius, echo })
    }

    pub fn clear(&mut self) -> Result<JsValue, JsValue> {
        self.run(Command::Clear)
    }

    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        self.run(Command::Step)
    }

    pub fn get_grid(&mut self) -> Result<JsValue, JsValue> {
        self.run(Command::GetGrid)
    }

    pub fn get_materials(&mut self) -> Result<JsValue, JsValue> {
        self.run(Command::GetMaterials)
    }

    pub fn get_stats(&mut self) -> Result<JsValue, JsValue> {
        self.run(Command::GetStats)
    }

    /// Entry point for raw `onmessage` payloads in the wire format
    pub fn handle_message(&mut self, json: String) -> Result<JsValue, JsValue> {
        let command = Command::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.run(command)
    }

    fn run(&mut self, command: Command) -> Result<JsValue, JsValue> {
        to_js(self.boundary.handle(command))
    }
}

fn to_js(response: Option<Response>) -> Result<JsValue, JsValue> {
    let Some(response) = response else {
        return Ok(JsValue::UNDEFINED);
    };

    match response {
        Response::Error { kind, message } => Err(JsValue::from_str(&format!("{}: {}", kind, message))),
        Response::Stepped {
            grid,
            width,
            height,
            frame,
        } => {
            let obj = grid_object("stepped", &grid, width, height)?;
            Reflect::set(&obj, &"frame".into(), &JsValue::from_f64(frame as f64))?;
            Ok(obj.into())
        }
        Response::Grid { grid, width, height } => Ok(grid_object("grid", &grid, width, height)?.into()),
        Response::GridReplaced {
            grid: Some(grid),
            width,
            height,
        } => Ok(grid_object("grid_replaced", &grid, width, height)?.into()),
        other => JSON::parse(&other.to_json()),
    }
}

fn grid_object(kind: &str, grid: &[MaterialId], width: u32, height: u32) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"type".into(), &kind.into())?;
    Reflect::set(&obj, &"grid".into(), &Uint16Array::from(grid).into())?;
    Reflect::set(&obj, &"width".into(), &width.into())?;
    Reflect::set(&obj, &"height".into(), &height.into())?;
    Ok(obj)
}
