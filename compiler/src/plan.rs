// plan.rs — Construction plan emission
//
// Assembles the ordered, host-agnostic instruction sequence: every create
// before any connect, layout coordinates derived purely from creation
// order. Emission is a pure function of its inputs — identical input text
// always yields a byte-identical plan.
//
// Preconditions: `resolved` and `edges` come from the same compile pass.
// Postconditions: all CreateNode instructions precede all connections;
//                 instruction order is deterministic.
// Failure modes: none.
// Side effects: none.

use std::fmt;

use serde::Serialize;

use crate::bind::BoundEdge;
use crate::registry::{KindCategory, RootChannel};
use crate::resolve::{ResolvedGraph, ResolvedNode};

// ── Layout ──────────────────────────────────────────────────────────────────

/// Editor-canvas placement grid. Four columns, left of the root node,
/// row-major in creation order.
const COLUMN_COUNT: usize = 4;
const START_X: i32 = -600;
const START_Y: i32 = 0;
const X_STEP: i32 = 250;
const Y_STEP: i32 = 100;

/// Canvas position of a created node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub x: i32,
    pub y: i32,
}

impl Layout {
    /// Placement for the `index`-th created node.
    fn for_index(index: usize) -> Layout {
        let col = (index % COLUMN_COUNT) as i32;
        let row = (index / COLUMN_COUNT) as i32;
        Layout {
            x: START_X + col * X_STEP,
            y: START_Y + row * Y_STEP,
        }
    }
}

// ── Instructions ────────────────────────────────────────────────────────────

/// Node default value, coerced by the kind's arity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NodeValue {
    /// No values supplied (or discarded after a payload warning).
    Default,
    /// Arity-1 kinds: a single scalar.
    Scalar(f64),
    /// Arity-3/4 kinds: a color; alpha is 1.0 when only three values were
    /// supplied.
    Color { r: f64, g: f64, b: f64, a: f64 },
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Default => write!(f, "default"),
            NodeValue::Scalar(v) => write!(f, "scalar({v})"),
            NodeValue::Color { r, g, b, a } => write!(f, "color({r}, {g}, {b}, {a})"),
        }
    }
}

/// One step of the construction plan, in the order the host executor must
/// apply them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op")]
pub enum Instruction {
    CreateNode {
        id: String,
        kind: &'static str,
        value: NodeValue,
        layout: Layout,
    },
    Connect {
        source: String,
        source_pin: &'static str,
        target: String,
        target_pin: &'static str,
    },
    ConnectToRoot {
        source: String,
        source_pin: &'static str,
        channel: RootChannel,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::CreateNode {
                id,
                kind,
                value,
                layout,
            } => {
                write!(f, "create {id} {kind} {value} at ({}, {})", layout.x, layout.y)
            }
            Instruction::Connect {
                source,
                source_pin,
                target,
                target_pin,
            } => write!(f, "connect {source}[{source_pin}] -> {target}[{target_pin}]"),
            Instruction::ConnectToRoot {
                source,
                source_pin,
                channel,
            } => write!(f, "connect {source}[{source_pin}] -> root.{channel}"),
        }
    }
}

/// The full construction plan handed to the host executor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConstructionPlan {
    pub instructions: Vec<Instruction>,
}

impl ConstructionPlan {
    pub fn create_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::CreateNode { .. }))
            .count()
    }

    pub fn connect_count(&self) -> usize {
        self.instructions.len() - self.create_count()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for ConstructionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

// ── Emission ────────────────────────────────────────────────────────────────

/// Coerce a resolved value list into the plan-level value by arity.
fn node_value(node: &ResolvedNode) -> NodeValue {
    match node.values.as_slice() {
        [] => NodeValue::Default,
        [v] => NodeValue::Scalar(*v),
        [r, g, b] => NodeValue::Color {
            r: *r,
            g: *g,
            b: *b,
            a: 1.0,
        },
        [r, g, b, a] => NodeValue::Color {
            r: *r,
            g: *g,
            b: *b,
            a: *a,
        },
        // Resolution guarantees 0/1/3/4, so longer lists cannot occur.
        _ => NodeValue::Default,
    }
}

/// Emit the construction plan: creates in declaration order (root sinks are
/// channels, not nodes), then connections in edge order.
pub fn emit(resolved: &ResolvedGraph, edges: &[BoundEdge]) -> ConstructionPlan {
    let mut instructions = Vec::with_capacity(resolved.len() + edges.len());

    let mut index = 0usize;
    for node in resolved.nodes() {
        if node.kind.category == KindCategory::RootSink {
            continue;
        }
        instructions.push(Instruction::CreateNode {
            id: node.id.clone(),
            kind: node.kind.name,
            value: node_value(node),
            layout: Layout::for_index(index),
        });
        index += 1;
    }

    for edge in edges {
        instructions.push(match edge {
            BoundEdge::Node {
                source,
                source_pin,
                target,
                target_pin,
            } => Instruction::Connect {
                source: source.clone(),
                source_pin: *source_pin,
                target: target.clone(),
                target_pin: *target_pin,
            },
            BoundEdge::Root {
                source,
                source_pin,
                channel,
            } => Instruction::ConnectToRoot {
                source: source.clone(),
                source_pin: *source_pin,
                channel: *channel,
            },
        });
    }

    ConstructionPlan { instructions }
}
