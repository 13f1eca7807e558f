// bind.rs — Pin resolution
//
// Assigns concrete output/input pins to every raw edge, deciding per edge
// whether the destination is a root-channel sink or an ordinary node. Slot
// usage per destination is tracked in a counter map that lives for exactly
// one compile pass.
//
// Preconditions: `raw` and `resolved` come from the same compile invocation.
// Postconditions: bound edges preserve raw edge order; every endpoint of a
//                 bound edge is a creatable node or a root channel.
// Failure modes: unresolvable endpoints drop the edge with W0400.
//                Binding never aborts.
// Side effects: none.

use std::collections::HashMap;

use crate::ast::RawGraph;
use crate::diag::{codes, Diagnostic};
use crate::registry::{KindCategory, RootChannel};
use crate::resolve::{ResolvedGraph, ResolvedNode};

// ── Public types ────────────────────────────────────────────────────────────

/// An edge with concrete pins assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundEdge {
    /// Node-to-node connection. Empty pin names mean the primary pin.
    Node {
        source: String,
        source_pin: &'static str,
        target: String,
        target_pin: &'static str,
    },
    /// Connection into a material root channel.
    Root {
        source: String,
        source_pin: &'static str,
        channel: RootChannel,
    },
}

/// Result of pin binding.
#[derive(Debug)]
pub struct BindResult {
    pub edges: Vec<BoundEdge>,
    pub diagnostics: Vec<Diagnostic>,
}

// ── Pin selection ───────────────────────────────────────────────────────────

/// Default output pin for a source node. Sampled-texture-like kinds expose
/// their multi-channel output; everything else uses the primary pin.
fn source_pin(node: &ResolvedNode) -> &'static str {
    match node.kind.category {
        KindCategory::MultiChannelOutput => "RGB",
        _ => "",
    }
}

/// Input slot for a destination node, given how many edges already bound to
/// it. Binary-input kinds fill `A` then `B`; any further edge overwrites
/// `B` (a documented limitation of the two-input model, kept verbatim).
fn target_pin(node: &ResolvedNode, prior_edges: usize) -> &'static str {
    match node.kind.category {
        KindCategory::BinaryInput => match prior_edges {
            0 => "A",
            _ => "B",
        },
        _ => "",
    }
}

// ── Binding ─────────────────────────────────────────────────────────────────

/// Bind every raw edge whose endpoints are known, in edge order.
pub fn bind(raw: &RawGraph, resolved: &ResolvedGraph) -> BindResult {
    let mut edges = Vec::new();
    let mut diagnostics = Vec::new();
    // Destination id → count of edges already bound to it. Reset per compile
    // by construction: the map lives only inside this call.
    let mut pin_usage: HashMap<&str, usize> = HashMap::new();

    for edge in raw.edges() {
        // The source must be a creatable node: resolved, and not itself a
        // root sink (root channels have no outputs).
        let source = match resolved.get(&edge.source) {
            Some(node) if node.kind.category != KindCategory::RootSink => node,
            _ => {
                diagnostics.push(dangling(edge, &edge.source));
                continue;
            }
        };
        let src_pin = source_pin(source);

        // Root-sink detection: the bare target id, or the target node's
        // descriptor, names a material channel.
        if let Some(channel) = root_channel_for(&edge.target, resolved) {
            edges.push(BoundEdge::Root {
                source: source.id.clone(),
                source_pin: src_pin,
                channel,
            });
            continue;
        }

        let Some(target) = resolved.get(&edge.target) else {
            diagnostics.push(dangling(edge, &edge.target));
            continue;
        };

        let prior = pin_usage.get(target.id.as_str()).copied().unwrap_or(0);
        let dst_pin = target_pin(target, prior);
        pin_usage.insert(target.id.as_str(), prior + 1);

        edges.push(BoundEdge::Node {
            source: source.id.clone(),
            source_pin: src_pin,
            target: target.id.clone(),
            target_pin: dst_pin,
        });
    }

    BindResult { edges, diagnostics }
}

/// Channel for an edge target, if the target is a root sink.
fn root_channel_for(target: &str, resolved: &ResolvedGraph) -> Option<RootChannel> {
    RootChannel::from_name(target).or_else(|| {
        resolved.get(target).and_then(|node| {
            if node.kind.category == KindCategory::RootSink {
                RootChannel::from_name(node.kind.name)
            } else {
                None
            }
        })
    })
}

fn dangling(edge: &crate::ast::RawEdge, endpoint: &str) -> Diagnostic {
    Diagnostic::warning(
        codes::DANGLING_EDGE,
        edge.span,
        format!(
            "edge `{} --> {}` dropped: `{}` did not resolve",
            edge.source, edge.target, endpoint
        ),
    )
}
