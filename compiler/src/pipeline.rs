// pipeline.rs — Compile driver
//
// Runs the straight-line compile pass: parse → resolve → bind → emit. Each
// invocation owns all transient state (raw graph, pin counters, diagnostic
// list); only the read-only registry is shared, so independent compiles can
// run concurrently without coordination.
//
// Preconditions: `registry` is initialised (typically `Registry::builtin()`).
// Postconditions: returns a plan, all diagnostics in phase order, and
//                 provenance for the invocation. Never fails on text input.
// Failure modes: none — empty input yields a valid empty plan.
// Side effects: none.

use crate::bind;
use crate::diag::Diagnostic;
use crate::parser;
use crate::plan::{self, ConstructionPlan};
use crate::registry::Registry;
use crate::resolve;

// ── Provenance ──────────────────────────────────────────────────────────────

/// Provenance metadata for reproducible compiles and cache-key use.
///
/// `source_hash`: SHA-256 of the raw graph text.
/// `registry_fingerprint`: SHA-256 of `Registry::canonical_json()`.
/// `compiler_version`: crate version from `Cargo.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source_hash: [u8; 32],
    pub registry_fingerprint: [u8; 32],
    pub compiler_version: &'static str,
}

impl Provenance {
    /// Hex string of the source hash (64 characters).
    pub fn source_hash_hex(&self) -> String {
        bytes_to_hex(&self.source_hash)
    }

    /// Hex string of the registry fingerprint (64 characters).
    pub fn registry_fingerprint_hex(&self) -> String {
        bytes_to_hex(&self.registry_fingerprint)
    }

    /// Serialize provenance as a JSON string for `--emit build-info`.
    pub fn to_json(&self) -> String {
        format!(
            "{{\n  \"source_hash\": \"{}\",\n  \"registry_fingerprint\": \"{}\",\n  \"plan_schema_version\": 1,\n  \"compiler_version\": \"{}\"\n}}\n",
            self.source_hash_hex(),
            self.registry_fingerprint_hex(),
            self.compiler_version,
        )
    }
}

fn bytes_to_hex(bytes: &[u8; 32]) -> String {
    let mut s = String::with_capacity(64);
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
    }
    s
}

/// Compute provenance from source text and registry.
///
/// The registry fingerprint is computed from `Registry::canonical_json()`
/// (compact JSON, table order) so it is independent of display formatting.
pub fn compute_provenance(source: &str, registry: &Registry) -> Provenance {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let source_hash = hasher.finalize().into();

    let mut hasher = Sha256::new();
    hasher.update(registry.canonical_json().as_bytes());
    let registry_fingerprint = hasher.finalize().into();

    Provenance {
        source_hash,
        registry_fingerprint,
        compiler_version: env!("CARGO_PKG_VERSION"),
    }
}

// ── Compile ─────────────────────────────────────────────────────────────────

/// Everything one compile invocation produces.
#[derive(Debug)]
pub struct CompileResult {
    pub plan: ConstructionPlan,
    /// All diagnostics, in phase order: parse, resolve, bind.
    pub diagnostics: Vec<Diagnostic>,
    pub provenance: Provenance,
}

impl CompileResult {
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Compile Mermaid graph text into a construction plan.
pub fn compile(source: &str, registry: &Registry) -> CompileResult {
    let parsed = parser::parse(source);
    let mut diagnostics = parsed.diagnostics;

    let resolve_result = resolve::resolve(&parsed.graph, registry);
    diagnostics.extend(resolve_result.diagnostics);

    let bind_result = bind::bind(&parsed.graph, &resolve_result.resolved);
    diagnostics.extend(bind_result.diagnostics);

    let plan = plan::emit(&resolve_result.resolved, &bind_result.edges);

    CompileResult {
        plan,
        diagnostics,
        provenance: compute_provenance(source, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_is_deterministic() {
        let registry = Registry::builtin();
        let source = "graph LR\nA[TextureSample] --> M[Multiply]\nB[Constant(0.5)] --> M\nM --> BaseColor\n";
        let first = compile(source, &registry);
        let second = compile(source, &registry);
        assert_eq!(first.plan, second.plan);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.provenance, second.provenance);
    }

    #[test]
    fn empty_input_is_a_valid_empty_plan() {
        let result = compile("", &Registry::builtin());
        assert!(result.plan.is_empty());
        assert!(!result.has_warnings());
    }

    #[test]
    fn diagnostics_come_in_phase_order() {
        // Line 1 parse-warns, line 2 resolve-warns, line 3 bind-warns.
        let source = "x -->\nB[Foo]\nC[Constant] --> D\n";
        let result = compile(source, &Registry::builtin());
        let codes: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| d.code.unwrap().0)
            .collect();
        assert_eq!(codes, vec!["W0100", "W0200", "W0400"]);
    }

    #[test]
    fn provenance_tracks_source_text() {
        let registry = Registry::builtin();
        let a = compute_provenance("A --> B", &registry);
        let b = compute_provenance("A --> C", &registry);
        assert_ne!(a.source_hash, b.source_hash);
        assert_eq!(a.registry_fingerprint, b.registry_fingerprint);
        assert_eq!(a.source_hash_hex().len(), 64);
    }
}
