//! Materials: definitions, the tag bitmask, and the registry that owns them

pub mod content;
pub mod material;
pub mod tags;

pub use content::{MaterialManifestEntry, MaterialRegistry, WellKnown};
pub use material::{
    CondenseRule, CustomProgram, Material, MaterialDefinition, MaterialId, ReactionRule,
    ResolvedCondense, ResolvedReaction, EMPTY, EMPTY_NAME,
};
pub use tags::Tags;
