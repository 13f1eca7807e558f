// registry.rs — Static node-kind registry
//
// The fixed vocabulary of material node kinds: name → value arity →
// category. The table is read-only configuration consumed by the resolver
// and the pin binder; extending the supported vocabulary means adding rows
// here, never branching elsewhere.
//
// Preconditions: none.
// Postconditions: lookups are case-sensitive exact matches.
// Failure modes: none — absent names simply return `None`.
// Side effects: none.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// ── Data types ──────────────────────────────────────────────────────────────

/// Behavioural category of a node kind. Drives pin selection and whether a
/// kind produces a created node at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KindCategory {
    /// Ordinary node: default output pin, default input pin.
    Standard,
    /// Sampled-texture-like kind whose primary output is a multi-channel
    /// pin (`RGB`).
    MultiChannelOutput,
    /// Two-input arithmetic kind with `A`/`B` input slots.
    BinaryInput,
    /// A root-channel sink (material output slot). Never instantiated as a
    /// node; edges targeting it become root connections.
    RootSink,
}

/// One row of the kind registry.
///
/// `value_arity` is the exact number of payload values the kind accepts:
/// 0 (no values), 1 (scalar), 3 (vector), or 4 (color). Arity-4 kinds also
/// accept three values with the alpha channel defaulting to 1.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeKind {
    pub name: &'static str,
    pub value_arity: u8,
    pub category: KindCategory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ── Builtin table ───────────────────────────────────────────────────────────

use KindCategory::*;

/// The builtin kind vocabulary. Row order is stable — `canonical_json` and
/// the registry fingerprint depend on it.
static BUILTIN_KINDS: &[NodeKind] = &[
    NodeKind { name: "TextureSample", value_arity: 0, category: MultiChannelOutput },
    NodeKind { name: "Add", value_arity: 0, category: BinaryInput },
    NodeKind { name: "Multiply", value_arity: 0, category: BinaryInput },
    NodeKind { name: "Constant", value_arity: 1, category: Standard },
    NodeKind { name: "Constant3Vector", value_arity: 3, category: Standard },
    NodeKind { name: "Constant4Vector", value_arity: 4, category: Standard },
    NodeKind { name: "ScalarParameter", value_arity: 1, category: Standard },
    NodeKind { name: "VectorParameter", value_arity: 4, category: Standard },
    NodeKind { name: "Sine", value_arity: 0, category: Standard },
    NodeKind { name: "Time", value_arity: 0, category: Standard },
    NodeKind { name: "Panner", value_arity: 0, category: Standard },
    NodeKind { name: "TexCoord", value_arity: 0, category: Standard },
    NodeKind { name: "BaseColor", value_arity: 0, category: RootSink },
    NodeKind { name: "Metallic", value_arity: 0, category: RootSink },
    NodeKind { name: "Specular", value_arity: 0, category: RootSink },
    NodeKind { name: "Roughness", value_arity: 0, category: RootSink },
    NodeKind { name: "EmissiveColor", value_arity: 0, category: RootSink },
    NodeKind { name: "Opacity", value_arity: 0, category: RootSink },
    NodeKind { name: "OpacityMask", value_arity: 0, category: RootSink },
    NodeKind { name: "Normal", value_arity: 0, category: RootSink },
    NodeKind { name: "WorldPositionOffset", value_arity: 0, category: RootSink },
];

// ── Root channels ───────────────────────────────────────────────────────────

/// The material output slots a source node can connect to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RootChannel {
    BaseColor,
    Metallic,
    Specular,
    Roughness,
    EmissiveColor,
    Opacity,
    OpacityMask,
    Normal,
    WorldPositionOffset,
}

impl RootChannel {
    /// Look up a channel by its registry name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<RootChannel> {
        Some(match name {
            "BaseColor" => RootChannel::BaseColor,
            "Metallic" => RootChannel::Metallic,
            "Specular" => RootChannel::Specular,
            "Roughness" => RootChannel::Roughness,
            "EmissiveColor" => RootChannel::EmissiveColor,
            "Opacity" => RootChannel::Opacity,
            "OpacityMask" => RootChannel::OpacityMask,
            "Normal" => RootChannel::Normal,
            "WorldPositionOffset" => RootChannel::WorldPositionOffset,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            RootChannel::BaseColor => "BaseColor",
            RootChannel::Metallic => "Metallic",
            RootChannel::Specular => "Specular",
            RootChannel::Roughness => "Roughness",
            RootChannel::EmissiveColor => "EmissiveColor",
            RootChannel::Opacity => "Opacity",
            RootChannel::OpacityMask => "OpacityMask",
            RootChannel::Normal => "Normal",
            RootChannel::WorldPositionOffset => "WorldPositionOffset",
        }
    }
}

impl fmt::Display for RootChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ── Registry ────────────────────────────────────────────────────────────────

/// The kind registry: a read-only name→row table.
///
/// Initialised once per process (or per test) and never mutated afterwards,
/// so independent compiles may share one instance across threads.
#[derive(Debug)]
pub struct Registry {
    rows: &'static [NodeKind],
    by_name: HashMap<&'static str, &'static NodeKind>,
}

impl Registry {
    /// Registry over the builtin kind vocabulary.
    pub fn builtin() -> Self {
        Self::from_rows(BUILTIN_KINDS)
    }

    /// Registry over an explicit row table. Later rows shadow earlier rows
    /// with the same name.
    pub fn from_rows(rows: &'static [NodeKind]) -> Self {
        let mut by_name = HashMap::with_capacity(rows.len());
        for row in rows {
            by_name.insert(row.name, row);
        }
        Registry { rows, by_name }
    }

    /// Exact, case-sensitive kind lookup.
    pub fn get(&self, name: &str) -> Option<&'static NodeKind> {
        self.by_name.get(name).copied()
    }

    /// Rows in table order.
    pub fn kinds(&self) -> &'static [NodeKind] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Compact JSON of the row table in table order. Used as the input to
    /// the provenance fingerprint, so formatting here must stay stable.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self.rows).unwrap_or_default()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
