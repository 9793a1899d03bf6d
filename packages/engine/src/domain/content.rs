use std::collections::HashMap;

use serde::Serialize;

use super::material::{Material, MaterialDefinition, MaterialId, EMPTY, EMPTY_NAME};
use super::tags::Tags;
use crate::core::{KernelError, KernelResult};

pub const STEAM: &str = "steam";
pub const SMOKE: &str = "smoke";
pub const PLANT: &str = "plant";
pub const DIRT: &str = "dirt";

/// Ids of the materials intrinsic behaviors produce by name.
/// Recomputed every time the name table changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WellKnown {
    pub steam: Option<MaterialId>,
    pub smoke: Option<MaterialId>,
    pub plant: Option<MaterialId>,
    pub dirt: Option<MaterialId>,
}

/// Id-indexed material table with a case-insensitive name index
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    name_to_id: HashMap<String, MaterialId>,
    well_known: WellKnown,
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialRegistry {
    /// Registry holding only the reserved empty material
    pub fn new() -> Self {
        let mut name_to_id = HashMap::new();
        name_to_id.insert(EMPTY_NAME.to_lowercase(), EMPTY);
        Self {
            materials: vec![Material::empty()],
            name_to_id,
            well_known: WellKnown::default(),
        }
    }

    /// Insert or replace a material and re-resolve every rule in the table.
    ///
    /// A definition whose name is already registered replaces that entry and
    /// keeps its id. An explicit `id` targets an existing entry (renaming it)
    /// or the next free slot. Cell values are never touched.
    pub fn register(&mut self, def: MaterialDefinition) -> KernelResult<MaterialId> {
        if let Some(kind) = def.kind.as_deref() {
            if !kind.eq_ignore_ascii_case("material") {
                return Err(KernelError::InvalidDefinition(format!(
                    "unsupported definition type '{}'",
                    kind
                )));
            }
        }

        let key = name_key(&def.name);
        if key.is_empty() {
            return Err(KernelError::InvalidDefinition("material name is empty".to_string()));
        }
        if key == name_key(EMPTY_NAME) || def.id == Some(EMPTY) {
            return Err(KernelError::InvalidDefinition(format!(
                "'{}' (id {}) is reserved",
                EMPTY_NAME, EMPTY
            )));
        }

        let by_name = self.name_to_id.get(&key).copied();
        let id = match (def.id, by_name) {
            (Some(requested), Some(existing)) if requested != existing => {
                return Err(KernelError::InvalidDefinition(format!(
                    "name '{}' already belongs to id {}",
                    def.name.trim(),
                    existing
                )));
            }
            (_, Some(existing)) => existing,
            (Some(requested), None) => {
                if (requested as usize) > self.materials.len() {
                    return Err(KernelError::InvalidDefinition(format!(
                        "id {} leaves a gap after {}",
                        requested,
                        self.materials.len() - 1
                    )));
                }
                requested
            }
            (None, None) => self.next_id()?,
        };

        let material = Material::from_definition(id, def);
        let idx = id as usize;
        if idx == self.materials.len() {
            log::debug!("registered material '{}' as id {}", material.name, id);
            self.materials.push(material);
        } else {
            let previous = name_key(&self.materials[idx].name);
            if previous != key {
                self.name_to_id.remove(&previous);
            }
            log::debug!("re-registered material '{}' (id {})", material.name, id);
            self.materials[idx] = material;
        }
        self.name_to_id.insert(key, id);
        self.resolve_all();
        Ok(id)
    }

    /// Number of ids in use, the empty material included
    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Never true: the empty material is always present
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    #[inline]
    pub fn is_valid_id(&self, id: MaterialId) -> bool {
        (id as usize) < self.materials.len()
    }

    #[inline]
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id as usize)
    }

    /// Lookup for ids already validated against the grid; anything outside
    /// the table reads as the empty material.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials
            .get(id as usize)
            .unwrap_or(&self.materials[EMPTY as usize])
    }

    #[inline]
    pub fn tags(&self, id: MaterialId) -> Tags {
        self.materials
            .get(id as usize)
            .map_or(Tags::empty(), |m| m.tags)
    }

    #[inline]
    pub fn density(&self, id: MaterialId) -> f32 {
        self.materials.get(id as usize).map_or(0.0, |m| m.density)
    }

    /// Case-insensitive name lookup
    pub fn id_by_name(&self, name: &str) -> Option<MaterialId> {
        self.name_to_id.get(&name_key(name)).copied()
    }

    #[inline]
    pub fn well_known(&self) -> WellKnown {
        self.well_known
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// First cell holding an id outside the table, as an integrity error
    pub fn validate_cells(&self, cells: &[MaterialId]) -> KernelResult<()> {
        let registry_size = self.materials.len();
        match cells.iter().position(|&id| id as usize >= registry_size) {
            Some(index) => Err(KernelError::InvalidMaterialId {
                index,
                id: cells[index],
                registry_size,
            }),
            None => Ok(()),
        }
    }

    /// id -> name/color/density/tags table for the renderer
    pub fn manifest(&self) -> Vec<MaterialManifestEntry> {
        self.materials
            .iter()
            .map(|m| MaterialManifestEntry {
                id: m.id,
                name: m.name.clone(),
                color: m.color,
                density: m.density,
                tags: m.tag_names.clone(),
            })
            .collect()
    }

    pub fn manifest_json(&self) -> String {
        serde_json::to_string(&self.manifest()).unwrap_or_else(|_| "[]".to_string())
    }

    fn next_id(&self) -> KernelResult<MaterialId> {
        MaterialId::try_from(self.materials.len()).map_err(|_| KernelError::RegistryFull)
    }

    fn resolve_all(&mut self) {
        let names = &self.name_to_id;
        let lookup = |name: &str| names.get(&name_key(name)).copied();
        for material in self.materials.iter_mut() {
            material.resolve(lookup);
        }
        self.well_known = WellKnown {
            steam: lookup(STEAM),
            smoke: lookup(SMOKE),
            plant: lookup(PLANT),
            dirt: lookup(DIRT),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialManifestEntry {
    pub id: MaterialId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    pub density: f32,
    pub tags: Vec<String>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
