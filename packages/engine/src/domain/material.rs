use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::tags::Tags;

/// Material identifier stored in every grid cell
pub type MaterialId = u16;

/// Id 0 is reserved for the empty cell
pub const EMPTY: MaterialId = 0;
pub const EMPTY_NAME: &str = "Empty";

pub const DEFAULT_DENSITY: f32 = 1.0;

/// Material definition as produced by the authoring pipeline.
///
/// Deserialization is lenient: a field of the wrong shape falls back to its
/// default and a malformed entry inside `tags` or `reactions` is dropped, so an
/// incomplete definition registers as an inert material instead of failing.
/// Only `name` is required.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<MaterialId>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub density: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub reactions: Vec<ReactionRule>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub condense: Option<CondenseRule>,
    #[serde(default, alias = "program", skip_serializing_if = "Option::is_none")]
    pub custom_program: Option<CustomProgram>,
}

impl MaterialDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: Some("material".to_string()),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn with_id(mut self, id: MaterialId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_reaction(mut self, rule: ReactionRule) -> Self {
        self.reactions.push(rule);
        self
    }

    pub fn with_condense(mut self, result: impl Into<String>, probability: f32) -> Self {
        self.condense = Some(CondenseRule {
            result: result.into(),
            probability,
        });
        self
    }

    pub fn with_program(mut self, program: Value) -> Self {
        self.custom_program = Some(CustomProgram(program));
        self
    }
}

/// Display color, either packed `0xAARRGGBB` or a CSS-style hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Packed(u32),
    Hex(String),
}

impl ColorSpec {
    /// Packed `0xAARRGGBB`. Hex strings accept `#rrggbb` and `#rrggbbaa`.
    pub fn to_argb(&self) -> Option<u32> {
        match self {
            ColorSpec::Packed(v) => Some(*v),
            ColorSpec::Hex(s) => {
                let digits = s.trim().trim_start_matches('#');
                let raw = u32::from_str_radix(digits, 16).ok()?;
                match digits.len() {
                    6 => Some(0xFF00_0000 | raw),
                    8 => Some(raw.rotate_right(8)),
                    _ => None,
                }
            }
        }
    }
}

/// Pairwise rule: this material meeting `with` becomes `result`,
/// and the neighbor becomes `byproduct` (or stays `with`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRule {
    pub with: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byproduct: Option<String>,
    #[serde(default = "default_probability")]
    pub probability: f32,
    #[serde(default)]
    pub priority: i32,
}

impl ReactionRule {
    pub fn new(with: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            with: with.into(),
            result: result.into(),
            byproduct: None,
            probability: 1.0,
            priority: 0,
        }
    }

    pub fn byproduct(mut self, name: impl Into<String>) -> Self {
        self.byproduct = Some(name.into());
        self
    }

    pub fn probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Top-row phase change (e.g. steam reaching the ceiling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondenseRule {
    pub result: String,
    #[serde(default = "default_probability")]
    pub probability: f32,
}

/// Opaque program evaluated by an external interpreter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomProgram(pub Value);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedReaction {
    pub with: MaterialId,
    pub result: MaterialId,
    pub byproduct: Option<MaterialId>,
    pub probability: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCondense {
    pub result: MaterialId,
    pub probability: f32,
}

/// A registered material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub density: f32,
    pub color: Option<u32>,
    pub tags: Tags,
    /// Normalized tag names as declared, unknown names included
    pub tag_names: Vec<String>,
    /// Declared rules, sorted by descending priority
    pub reactions: Vec<ReactionRule>,
    pub condense: Option<CondenseRule>,
    pub program: Option<CustomProgram>,
    resolved_reactions: Vec<ResolvedReaction>,
    resolved_condense: Option<ResolvedCondense>,
}

impl Material {
    pub fn empty() -> Self {
        Self {
            id: EMPTY,
            name: EMPTY_NAME.to_string(),
            density: 0.0,
            color: Some(0),
            tags: Tags::empty(),
            tag_names: Vec::new(),
            reactions: Vec::new(),
            condense: None,
            program: None,
            resolved_reactions: Vec::new(),
            resolved_condense: None,
        }
    }

    pub(crate) fn from_definition(id: MaterialId, def: MaterialDefinition) -> Self {
        let density = match def.density {
            Some(d) if d.is_finite() => d,
            _ => DEFAULT_DENSITY,
        };

        let mut tag_names: Vec<String> = Vec::with_capacity(def.tags.len());
        for raw in def.tags {
            let tag = raw.trim().to_lowercase();
            if !tag.is_empty() && !tag_names.contains(&tag) {
                tag_names.push(tag);
            }
        }
        let tags = Tags::from_names(&tag_names);

        let mut reactions: Vec<ReactionRule> = def
            .reactions
            .into_iter()
            .map(|mut r| {
                r.probability = sanitize_probability(r.probability);
                r
            })
            .collect();
        // Stable: equal priorities keep declaration order
        reactions.sort_by(|a, b| b.priority.cmp(&a.priority));

        let condense = def.condense.map(|mut c| {
            c.probability = sanitize_probability(c.probability);
            c
        });

        let program = if tags.is_empty() && reactions.is_empty() {
            def.custom_program
        } else {
            if def.custom_program.is_some() {
                log::debug!("material '{}' has tags or reactions; program ignored", def.name);
            }
            None
        };

        Self {
            id,
            name: def.name.trim().to_string(),
            density,
            color: def.color.as_ref().and_then(ColorSpec::to_argb),
            tags,
            tag_names,
            reactions,
            condense,
            program,
            resolved_reactions: Vec::new(),
            resolved_condense: None,
        }
    }

    /// Rebind rule names to ids. Rules naming an unknown material are dropped
    /// from the resolved set until a later registration makes them resolvable.
    pub(crate) fn resolve<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<MaterialId>,
    {
        self.resolved_reactions = self
            .reactions
            .iter()
            .filter_map(|r| {
                let byproduct = match r.byproduct.as_deref() {
                    Some(name) => Some(lookup(name)?),
                    None => None,
                };
                Some(ResolvedReaction {
                    with: lookup(&r.with)?,
                    result: lookup(&r.result)?,
                    byproduct,
                    probability: r.probability,
                })
            })
            .collect();

        self.resolved_condense = self.condense.as_ref().and_then(|c| {
            Some(ResolvedCondense {
                result: lookup(&c.result)?,
                probability: c.probability,
            })
        });
    }

    #[inline]
    pub fn resolved_reactions(&self) -> &[ResolvedReaction] {
        &self.resolved_reactions
    }

    #[inline]
    pub fn resolved_condense(&self) -> Option<&ResolvedCondense> {
        self.resolved_condense.as_ref()
    }

    /// No tags, no rules, no program: only carried over each tick
    pub fn is_inert(&self) -> bool {
        self.tags.is_empty()
            && self.resolved_reactions.is_empty()
            && self.resolved_condense.is_none()
            && self.program.is_none()
    }
}

fn default_probability() -> f32 {
    1.0
}

fn sanitize_probability(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reactions_sort_by_priority_keeping_ties_in_order() {
        let def = MaterialDefinition::new("Acid")
            .with_reaction(ReactionRule::new("Stone", "Empty").priority(1))
            .with_reaction(ReactionRule::new("Metal", "Empty").priority(5))
            .with_reaction(ReactionRule::new("Wood", "Empty").priority(1));
        let m = Material::from_definition(3, def);
        let order: Vec<&str> = m.reactions.iter().map(|r| r.with.as_str()).collect();
        assert_eq!(order, vec!["Metal", "Stone", "Wood"]);
    }

    #[test]
    fn malformed_fields_degrade_to_defaults() {
        let def: MaterialDefinition = serde_json::from_value(json!({
            "type": "material",
            "name": "Goo",
            "density": "heavy",
            "tags": ["flow", 7, "Sticky"],
            "reactions": [{"with": "Water"}, {"with": "Water", "result": "Mud"}],
            "condense": 12
        }))
        .unwrap();
        let m = Material::from_definition(1, def);
        assert_eq!(m.density, DEFAULT_DENSITY);
        assert_eq!(m.tag_names, vec!["flow", "sticky"]);
        assert_eq!(m.tags, Tags::FLOW);
        assert_eq!(m.reactions.len(), 1);
        assert!(m.condense.is_none());
    }

    #[test]
    fn probabilities_are_clamped() {
        let def = MaterialDefinition::new("Foam")
            .with_reaction(ReactionRule::new("Water", "Foam").probability(4.0))
            .with_condense("Water", f32::NAN);
        let m = Material::from_definition(1, def);
        assert_eq!(m.reactions[0].probability, 1.0);
        assert_eq!(m.condense.as_ref().map(|c| c.probability), Some(0.0));
    }

    #[test]
    fn program_kept_only_without_tags_or_reactions() {
        let with_tags = MaterialDefinition::new("Ant")
            .with_tags(&["sand"])
            .with_program(json!({"op": "wander"}));
        assert!(Material::from_definition(1, with_tags).program.is_none());

        let bare = MaterialDefinition::new("Ant").with_program(json!({"op": "wander"}));
        assert!(Material::from_definition(1, bare).program.is_some());
    }

    #[test]
    fn unknown_tags_do_not_displace_the_program() {
        let def = MaterialDefinition::new("Ant")
            .with_tags(&["sparkly"])
            .with_program(json!({"op": "wander"}));
        let m = Material::from_definition(1, def);
        assert!(m.tags.is_empty());
        assert_eq!(m.tag_names, vec!["sparkly"]);
        assert!(m.program.is_some());
        assert!(!m.is_inert());
    }

    #[test]
    fn unresolved_names_drop_the_rule() {
        let def = MaterialDefinition::new("Lava")
            .with_reaction(ReactionRule::new("Water", "Stone").byproduct("Steam"))
            .with_reaction(ReactionRule::new("Ice", "Stone"));
        let mut m = Material::from_definition(2, def);
        m.resolve(|name| match name {
            "Water" => Some(3),
            "Stone" => Some(4),
            _ => None,
        });
        assert!(m.resolved_reactions().is_empty());

        m.resolve(|name| match name {
            "Water" => Some(3),
            "Stone" => Some(4),
            "Steam" => Some(5),
            _ => None,
        });
        assert_eq!(
            m.resolved_reactions(),
            &[ResolvedReaction { with: 3, result: 4, byproduct: Some(5), probability: 1.0 }]
        );
    }

    #[test]
    fn hex_colors_pack_to_argb() {
        assert_eq!(ColorSpec::Hex("#ffcc00".into()).to_argb(), Some(0xFFFF_CC00));
        assert_eq!(ColorSpec::Hex("#11223380".into()).to_argb(), Some(0x8011_2233));
        assert_eq!(ColorSpec::Hex("nope".into()).to_argb(), None);
    }
}
