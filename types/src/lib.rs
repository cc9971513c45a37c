//! Shared vocabulary types for the sigil spell engine
//!
//! This crate contains the closed tag enumerations and tuning constants that
//! are shared between the engine core and any embedding host. Spells are
//! described by combining one or more [`Modifier`]s (HOW the magic is
//! applied: scope, intensity, targeting) with one or more [`Kind`]s (WHAT
//! kind of magic is used: elemental, conceptual). The interaction between
//! the two produces emergent spell behavior.

use serde::{Deserialize, Serialize};

pub mod constants;

// ─────────────────────────────────────────────────────────────────────────────
// Modifier tags
// ─────────────────────────────────────────────────────────────────────────────

/// Priority levels used when two modifiers conflict.
/// The higher-priority modifier survives conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric level, higher wins
    pub fn level(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// Modifiers alter the scope, intensity, and targeting of a spell.
///
/// Conflict rules:
/// - Much/Little/Some are mutually exclusive intensity modifiers
/// - Control overrides Destruction when both are present
/// - Area and Many widen scope in different ways (bigger effect vs. more targets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Precise, controlled magic with minimal side effects
    Control,
    /// Destructive, chaotic magic that damages or destroys
    Destruction,
    /// Creative magic that builds, heals, or constructs
    Construction,
    /// High-intensity modifier that amplifies effects
    Much,
    /// Low-intensity modifier that reduces effects
    Little,
    /// Moderate intensity, balanced effects
    Some,
    /// Affects multiple targets or creates multiple effects
    Many,
    /// Expands the area of effect
    Area,
    /// Adds movement, projectile, or directional components
    Move,
}

impl Modifier {
    /// Every modifier, in declaration order
    pub const ALL: [Modifier; 9] = [
        Modifier::Control,
        Modifier::Destruction,
        Modifier::Construction,
        Modifier::Much,
        Modifier::Little,
        Modifier::Some,
        Modifier::Many,
        Modifier::Area,
        Modifier::Move,
    ];

    /// Lowercase identity name, used for canonical effect names
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Control => "control",
            Modifier::Destruction => "destruction",
            Modifier::Construction => "construction",
            Modifier::Much => "much",
            Modifier::Little => "little",
            Modifier::Some => "some",
            Modifier::Many => "many",
            Modifier::Area => "area",
            Modifier::Move => "move",
        }
    }

    /// Capitalized name for user-facing text
    pub fn display_name(&self) -> &'static str {
        match self {
            Modifier::Control => "Control",
            Modifier::Destruction => "Destruction",
            Modifier::Construction => "Construction",
            Modifier::Much => "Much",
            Modifier::Little => "Little",
            Modifier::Some => "Some",
            Modifier::Many => "Many",
            Modifier::Area => "Area",
            Modifier::Move => "Move",
        }
    }

    /// Parse a lowercase identity name back into a modifier
    pub fn from_name(name: &str) -> Option<Modifier> {
        Modifier::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// RGBA display color
    pub fn color(&self) -> [u8; 4] {
        match self {
            Modifier::Control => [74, 144, 226, 255],
            Modifier::Destruction => [226, 74, 74, 255],
            Modifier::Construction => [74, 226, 74, 255],
            Modifier::Much => [226, 160, 74, 255],
            Modifier::Little => [160, 74, 226, 255],
            Modifier::Some => [226, 226, 74, 255],
            Modifier::Many => [74, 226, 160, 255],
            Modifier::Area => [226, 74, 160, 255],
            Modifier::Move => [128, 128, 128, 255],
        }
    }

    /// Conflict-resolution priority
    pub fn priority(&self) -> Priority {
        match self {
            Modifier::Control => Priority::High,
            Modifier::Destruction | Modifier::Construction => Priority::Medium,
            Modifier::Many | Modifier::Area => Priority::Medium,
            Modifier::Much | Modifier::Little | Modifier::Some => Priority::Low,
            Modifier::Move => Priority::Low,
        }
    }

    /// Is this one of the mutually exclusive intensity modifiers?
    pub fn is_intensity(&self) -> bool {
        matches!(self, Modifier::Much | Modifier::Little | Modifier::Some)
    }

    /// Whether this modifier conflicts with another.
    ///
    /// Intensity modifiers conflict pairwise with each other;
    /// Control and Destruction conflict with each other.
    pub fn conflicts_with(&self, other: Modifier) -> bool {
        if self.is_intensity() && other.is_intensity() {
            return *self != other;
        }
        matches!(
            (*self, other),
            (Modifier::Control, Modifier::Destruction) | (Modifier::Destruction, Modifier::Control)
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kind tags
// ─────────────────────────────────────────────────────────────────────────────

/// Element groups for categorizing kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementGroup {
    /// Fire, Water, Air, Earth, Ice
    Elemental,
    /// Light-based magic
    Radiant,
    /// Dark/negative energy
    Shadow,
    /// Life, growth
    Natural,
    /// Targeting and utility magic
    Neutral,
}

/// How two kinds interact when combined in one spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// The pair amplifies each other's effects
    Amplify,
    /// The pair opposes and reduces each other's effects
    Oppose,
    /// No special interaction
    Neutral,
}

impl Interaction {
    /// The multiplier contributed by one pair with this interaction
    pub fn multiplier(&self) -> f64 {
        match self {
            Interaction::Amplify => constants::AMPLIFY_MULTIPLIER,
            Interaction::Oppose => constants::OPPOSE_MULTIPLIER,
            Interaction::Neutral => constants::NEUTRAL_MULTIPLIER,
        }
    }
}

/// Kinds define the fundamental nature and element of the magic being used.
///
/// Opposing elements reduce each other's effects (Fire/Water, Fire/Ice,
/// Light/Dark, Life/Dark); complementary elements amplify each other
/// (Fire/Light, Water/Ice, Earth/Life); everything else is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Targeting and detection magic
    Target,
    /// Light, illumination, and radiant magic
    Light,
    /// Shadow, decay, and negative energy magic
    Dark,
    /// Water, liquid, and flow magic
    Water,
    /// Life, healing, and growth magic
    Life,
    /// Fire, heat, and combustion magic
    Fire,
    /// Air, wind, and atmospheric magic
    Air,
    /// Ice, cold, and freezing magic
    Ice,
    /// Earth, stone, and mineral magic
    Earth,
}

impl Kind {
    /// Every kind, in declaration order
    pub const ALL: [Kind; 9] = [
        Kind::Target,
        Kind::Light,
        Kind::Dark,
        Kind::Water,
        Kind::Life,
        Kind::Fire,
        Kind::Air,
        Kind::Ice,
        Kind::Earth,
    ];

    /// Lowercase identity name, used for canonical effect names
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Target => "target",
            Kind::Light => "light",
            Kind::Dark => "dark",
            Kind::Water => "water",
            Kind::Life => "life",
            Kind::Fire => "fire",
            Kind::Air => "air",
            Kind::Ice => "ice",
            Kind::Earth => "earth",
        }
    }

    /// Capitalized name for user-facing text
    pub fn display_name(&self) -> &'static str {
        match self {
            Kind::Target => "Target",
            Kind::Light => "Light",
            Kind::Dark => "Dark",
            Kind::Water => "Water",
            Kind::Life => "Life",
            Kind::Fire => "Fire",
            Kind::Air => "Air",
            Kind::Ice => "Ice",
            Kind::Earth => "Earth",
        }
    }

    /// Parse a lowercase identity name back into a kind
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// RGBA display color
    pub fn color(&self) -> [u8; 4] {
        match self {
            Kind::Target => [128, 0, 128, 255],
            Kind::Light => [255, 255, 128, 255],
            Kind::Dark => [64, 64, 64, 255],
            Kind::Water => [64, 128, 255, 255],
            Kind::Life => [128, 255, 128, 255],
            Kind::Fire => [255, 64, 64, 255],
            Kind::Air => [192, 192, 192, 255],
            Kind::Ice => [128, 255, 255, 255],
            Kind::Earth => [139, 69, 19, 255],
        }
    }

    /// Element group this kind belongs to
    pub fn group(&self) -> ElementGroup {
        match self {
            Kind::Fire | Kind::Water | Kind::Air | Kind::Ice | Kind::Earth => {
                ElementGroup::Elemental
            }
            Kind::Light => ElementGroup::Radiant,
            Kind::Dark => ElementGroup::Shadow,
            Kind::Life => ElementGroup::Natural,
            Kind::Target => ElementGroup::Neutral,
        }
    }

    /// Classify the pairwise interaction between this kind and another.
    /// Symmetric: `a.interaction_with(b) == b.interaction_with(a)`.
    pub fn interaction_with(&self, other: Kind) -> Interaction {
        if *self == other {
            return Interaction::Amplify;
        }

        let pair = |a: Kind, b: Kind| (*self == a && other == b) || (*self == b && other == a);

        // Opposing elements
        if pair(Kind::Fire, Kind::Water)
            || pair(Kind::Fire, Kind::Ice)
            || pair(Kind::Light, Kind::Dark)
            || pair(Kind::Life, Kind::Dark)
        {
            return Interaction::Oppose;
        }

        // Complementary elements
        if pair(Kind::Fire, Kind::Light)
            || pair(Kind::Water, Kind::Ice)
            || pair(Kind::Earth, Kind::Life)
        {
            return Interaction::Amplify;
        }

        Interaction::Neutral
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tag sets
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered, deduplicated sequence of modifiers.
///
/// Insertion order is preserved for iteration and display, but equality is
/// membership-based: two sets holding the same modifiers in any order
/// compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierSet {
    members: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a slice, dropping duplicates while keeping first-seen order
    pub fn of(members: &[Modifier]) -> Self {
        members.iter().copied().collect()
    }

    /// Insert a modifier; returns false if it was already present
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        if self.members.contains(&modifier) {
            return false;
        }
        self.members.push(modifier);
        true
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.members.contains(&modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[Modifier] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in alphabetical order (the canonical-name ordering)
    pub fn sorted_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.members.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl PartialEq for ModifierSet {
    fn eq(&self, other: &Self) -> bool {
        // Members are deduplicated, so equal length plus containment is equality
        self.len() == other.len() && self.members.iter().all(|m| other.contains(*m))
    }
}

impl Eq for ModifierSet {}

/// Ordered, deduplicated sequence of kinds.
///
/// Same membership-based equality semantics as [`ModifierSet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindSet {
    members: Vec<Kind>,
}

impl KindSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a slice, dropping duplicates while keeping first-seen order
    pub fn of(members: &[Kind]) -> Self {
        members.iter().copied().collect()
    }

    /// Insert a kind; returns false if it was already present
    pub fn insert(&mut self, kind: Kind) -> bool {
        if self.members.contains(&kind) {
            return false;
        }
        self.members.push(kind);
        true
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.members.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = Kind> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[Kind] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in alphabetical order (the canonical-name ordering)
    pub fn sorted_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.members.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Kind> for KindSet {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        let mut set = KindSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl PartialEq for KindSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.members.iter().all(|k| other.contains(*k))
    }
}

impl Eq for KindSet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_is_symmetric() {
        for a in Kind::ALL {
            for b in Kind::ALL {
                assert_eq!(
                    a.interaction_with(b),
                    b.interaction_with(a),
                    "asymmetric interaction between {a:?} and {b:?}"
                );
            }
        }
    }

    #[test]
    fn conflicts_are_symmetric() {
        for a in Modifier::ALL {
            for b in Modifier::ALL {
                assert_eq!(
                    a.conflicts_with(b),
                    b.conflicts_with(a),
                    "asymmetric conflict between {a:?} and {b:?}"
                );
            }
        }
    }

    #[test]
    fn identical_kinds_amplify() {
        assert_eq!(Kind::Fire.interaction_with(Kind::Fire), Interaction::Amplify);
    }

    #[test]
    fn control_outranks_destruction() {
        assert!(Modifier::Control.priority() > Modifier::Destruction.priority());
        assert_eq!(Modifier::Control.priority().level(), 3);
        assert_eq!(Modifier::Move.priority(), Priority::Low);
    }

    #[test]
    fn kinds_map_to_their_element_groups() {
        for k in [Kind::Fire, Kind::Water, Kind::Air, Kind::Ice, Kind::Earth] {
            assert_eq!(k.group(), ElementGroup::Elemental);
        }
        assert_eq!(Kind::Light.group(), ElementGroup::Radiant);
        assert_eq!(Kind::Dark.group(), ElementGroup::Shadow);
        assert_eq!(Kind::Life.group(), ElementGroup::Natural);
        assert_eq!(Kind::Target.group(), ElementGroup::Neutral);
    }

    #[test]
    fn every_tag_has_a_distinct_color() {
        let mut colors: Vec<[u8; 4]> = Modifier::ALL.iter().map(|m| m.color()).collect();
        colors.extend(Kind::ALL.iter().map(|k| k.color()));
        let unique: std::collections::HashSet<[u8; 4]> = colors.iter().copied().collect();
        assert_eq!(unique.len(), colors.len(), "display colors must not collide");
    }

    #[test]
    fn names_round_trip() {
        for m in Modifier::ALL {
            assert_eq!(Modifier::from_name(m.name()), Some(m));
        }
        for k in Kind::ALL {
            assert_eq!(Kind::from_name(k.name()), Some(k));
        }
    }

    #[test]
    fn sets_deduplicate_and_keep_order() {
        let set = ModifierSet::of(&[Modifier::Area, Modifier::Much, Modifier::Area]);
        assert_eq!(set.as_slice(), &[Modifier::Area, Modifier::Much]);
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = KindSet::of(&[Kind::Fire, Kind::Water]);
        let b = KindSet::of(&[Kind::Water, Kind::Fire]);
        assert_eq!(a, b);
        assert_ne!(a, KindSet::of(&[Kind::Fire]));
    }
}
