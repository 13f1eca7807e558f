// resolve.rs — Descriptor resolution
//
// Turns each raw descriptor into a registry kind plus coerced values. The
// descriptor shape `<name> ( <payload> )` is matched with a chumsky parser;
// anything that does not match the shape is treated as a bare kind name.
//
// Preconditions: `graph` comes from the parser; `registry` is populated.
// Postconditions: returns one ResolvedNode per known kind, in declaration
//                 order, plus all accumulated diagnostics. Value lists are
//                 always empty or exactly the kind's arity — never partial.
// Failure modes: unknown kinds drop the node (W0200); bad payloads keep the
//                node with default values (W0300). Resolution never aborts.
// Side effects: none.

use std::collections::HashMap;

use chumsky::prelude::*;

use crate::ast::RawGraph;
use crate::diag::{codes, Diagnostic};
use crate::lexer::Span;
use crate::registry::{NodeKind, Registry};

// ── Public types ────────────────────────────────────────────────────────────

/// Result of descriptor resolution.
#[derive(Debug)]
pub struct ResolveResult {
    pub resolved: ResolvedGraph,
    pub diagnostics: Vec<Diagnostic>,
}

/// A node whose descriptor matched a registry kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub id: String,
    pub kind: &'static NodeKind,
    /// Coerced values: empty, or exactly `kind.value_arity` long (arity-4
    /// kinds pad a missing alpha with 1.0 at coercion time).
    pub values: Vec<f64>,
    pub span: Span,
}

/// Resolved nodes in declaration order, with id lookup.
#[derive(Debug, Default)]
pub struct ResolvedGraph {
    nodes: Vec<ResolvedNode>,
    index: HashMap<String, usize>,
}

impl ResolvedGraph {
    pub fn get(&self, id: &str) -> Option<&ResolvedNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn nodes(&self) -> &[ResolvedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ── Descriptor shape grammar ────────────────────────────────────────────────

/// Matches `<name> ( <payload> )` with optional surrounding whitespace and a
/// non-empty payload, anchored to the whole descriptor. The payload is kept
/// raw; numeric interpretation happens in `coerce_values` so that a partial
/// failure can discard the list without rejecting the kind.
fn shape_parser<'a>() -> impl Parser<'a, &'a str, (String, String), extra::Err<Rich<'a, char>>> {
    let name = none_of("(")
        .repeated()
        .at_least(1)
        .collect::<String>();
    let payload = none_of(")")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .delimited_by(just('('), just(')'));

    name.then(payload)
        .then_ignore(text::whitespace())
        .then_ignore(end())
        .map(|(name, payload)| (name.trim().to_string(), payload))
}

/// Split a descriptor into kind name and optional raw payload.
fn split_descriptor(descriptor: &str) -> (String, Option<String>) {
    match shape_parser().parse(descriptor).into_result() {
        Ok((name, payload)) => (name, Some(payload)),
        Err(_) => (descriptor.trim().to_string(), None),
    }
}

// ── Value coercion ──────────────────────────────────────────────────────────

/// Outcome of coercing a payload against a kind's arity.
enum Coercion {
    Values(Vec<f64>),
    Mismatch(String),
}

fn coerce_values(kind: &NodeKind, payload: &str) -> Coercion {
    let mut values = Vec::new();
    for token in payload.split(',') {
        match token.trim().parse::<f64>() {
            Ok(v) => values.push(v),
            Err(_) => {
                return Coercion::Mismatch(format!(
                    "value `{}` is not a number",
                    token.trim()
                ));
            }
        }
    }

    let arity = usize::from(kind.value_arity);
    match values.len() {
        n if n == arity => Coercion::Values(values),
        // Arity-4 kinds take an RGB triple; alpha defaults to 1.0.
        3 if arity == 4 => {
            values.push(1.0);
            Coercion::Values(values)
        }
        n => Coercion::Mismatch(format!(
            "kind `{}` takes {} value(s), got {}",
            kind.name, arity, n
        )),
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve every declared node against the registry.
pub fn resolve(graph: &RawGraph, registry: &Registry) -> ResolveResult {
    let mut resolved = ResolvedGraph::default();
    let mut diagnostics = Vec::new();

    for raw in graph.nodes() {
        let (kind_name, payload) = split_descriptor(&raw.descriptor);

        let Some(kind) = registry.get(&kind_name) else {
            diagnostics.push(
                Diagnostic::warning(
                    codes::UNKNOWN_KIND,
                    raw.span,
                    format!("unknown node kind `{}` for `{}`; node dropped", kind_name, raw.id),
                )
                .with_hint("kind names are case-sensitive registry entries"),
            );
            continue;
        };

        let values = match payload.as_deref() {
            None => Vec::new(),
            Some(payload) => match coerce_values(kind, payload) {
                Coercion::Values(values) => values,
                Coercion::Mismatch(reason) => {
                    diagnostics.push(Diagnostic::warning(
                        codes::VALUE_ARITY,
                        raw.span,
                        format!("`{}`: {}; using default values", raw.id, reason),
                    ));
                    Vec::new()
                }
            },
        };

        resolved.index.insert(raw.id.clone(), resolved.nodes.len());
        resolved.nodes.push(ResolvedNode {
            id: raw.id.clone(),
            kind,
            values,
            span: raw.span,
        });
    }

    ResolveResult {
        resolved,
        diagnostics,
    }
}
