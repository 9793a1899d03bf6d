//! Behavior tags
//!
//! Tag names arrive as lowercase strings from material definitions and are
//! folded once, at registration, into a bitmask the tick pipeline tests with
//! a single AND.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tags: u16 {
        // Movement
        const STATIC = 1 << 0;
        const SAND = 1 << 1;
        const FLOW = 1 << 2;
        const FLOAT = 1 << 3;
        const FIRE = 1 << 4;

        // Intrinsic behaviors
        const REACTIVE_WATER = 1 << 5;
        const EXPLOSIVE = 1 << 6;
        const BURNS_OUT = 1 << 7;
        const SEED = 1 << 8;
        const PLANT = 1 << 9;
        const GROW = 1 << 10;
        const MUD = 1 << 11;
        const WATER = 1 << 12;
        const FLAMMABLE = 1 << 13;
    }
}

const TAG_NAMES: [(&str, Tags); 14] = [
    ("static", Tags::STATIC),
    ("sand", Tags::SAND),
    ("flow", Tags::FLOW),
    ("float", Tags::FLOAT),
    ("fire", Tags::FIRE),
    ("reactive_water", Tags::REACTIVE_WATER),
    ("explosive", Tags::EXPLOSIVE),
    ("burns_out", Tags::BURNS_OUT),
    ("seed", Tags::SEED),
    ("plant", Tags::PLANT),
    ("grow", Tags::GROW),
    ("mud", Tags::MUD),
    ("water", Tags::WATER),
    ("flammable", Tags::FLAMMABLE),
];

impl Tags {
    /// Tag for a single lowercase name. Unknown names map to `None`.
    pub fn from_tag(name: &str) -> Option<Tags> {
        TAG_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, tag)| *tag)
    }

    /// Fold a list of tag names into a mask. Unknown names are ignored.
    pub fn from_names<I, S>(names: I) -> Tags
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| Tags::from_tag(n.as_ref()))
            .fold(Tags::empty(), |acc, t| acc | t)
    }

    /// Canonical names of the set bits, in declaration order.
    pub fn names(self) -> Vec<&'static str> {
        TAG_NAMES
            .iter()
            .filter(|(_, tag)| self.contains(*tag))
            .map(|(n, _)| *n)
            .collect()
    }
}
