// Conformance tests for the compile pipeline.
//
// Each test exercises one documented behaviour of the compiler at the
// library boundary (`pipeline::compile`): scenario plans, warning taxonomy,
// pin assignment, and the determinism guarantees.

use mmc::diag::codes;
use mmc::pipeline::{compile, CompileResult};
use mmc::plan::{Instruction, Layout, NodeValue};
use mmc::registry::{Registry, RootChannel};

fn run(source: &str) -> CompileResult {
    compile(source, &Registry::builtin())
}

fn create(id: &str, kind: &'static str, value: NodeValue, x: i32, y: i32) -> Instruction {
    Instruction::CreateNode {
        id: id.to_string(),
        kind,
        value,
        layout: Layout { x, y },
    }
}

fn connect(
    source: &str,
    source_pin: &'static str,
    target: &str,
    target_pin: &'static str,
) -> Instruction {
    Instruction::Connect {
        source: source.to_string(),
        source_pin,
        target: target.to_string(),
        target_pin,
    }
}

fn connect_root(source: &str, source_pin: &'static str, channel: RootChannel) -> Instruction {
    Instruction::ConnectToRoot {
        source: source.to_string(),
        source_pin,
        channel,
    }
}

// ── Scenario plans ──────────────────────────────────────────────────────────

#[test]
fn texture_sample_to_base_color() {
    let result = run("graph LR\nA[TextureSample] --> BaseColor");
    assert_eq!(
        result.plan.instructions,
        vec![
            create("A", "TextureSample", NodeValue::Default, -600, 0),
            connect_root("A", "RGB", RootChannel::BaseColor),
        ]
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn constants_into_multiply() {
    let result = run("A[Constant](0.5) --> B[Multiply]\nC[Constant](2.0) --> B[Multiply]");
    assert_eq!(
        result.plan.instructions,
        vec![
            create("A", "Constant", NodeValue::Scalar(0.5), -600, 0),
            create("C", "Constant", NodeValue::Scalar(2.0), -350, 0),
            create("B", "Multiply", NodeValue::Default, -100, 0),
            connect("A", "", "B", "A"),
            connect("C", "", "B", "B"),
        ]
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn scalar_payload_in_brackets() {
    let result = run("A[Constant(5)]");
    assert_eq!(
        result.plan.instructions,
        vec![create("A", "Constant", NodeValue::Scalar(5.0), -600, 0)]
    );
}

#[test]
fn full_material_compiles_clean() {
    let source = "graph LR\n\
                  %% layered surface\n\
                  T[TextureSample] --> M[Multiply]\n\
                  Tint[VectorParameter(1,0.5,0.25)] --> M\n\
                  M --> BaseColor\n\
                  R[ScalarParameter(0.8)] --> Roughness\n";
    let result = run(source);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.plan.create_count(), 4);
    assert_eq!(result.plan.connect_count(), 4);
}

// ── Warning taxonomy ────────────────────────────────────────────────────────

#[test]
fn missing_edge_target_is_one_parse_warning() {
    let result = run("A -->");
    assert!(result.plan.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, Some(codes::PARSE_LINE));
}

#[test]
fn unknown_kind_drops_node_and_its_edges() {
    let result = run("A[Foo]\nB[Constant]\nA --> B");
    assert_eq!(
        result.plan.instructions,
        vec![create("B", "Constant", NodeValue::Default, -600, 0)]
    );
    let codes_seen: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| d.code.unwrap())
        .collect();
    assert_eq!(codes_seen, vec![codes::UNKNOWN_KIND, codes::DANGLING_EDGE]);
}

#[test]
fn bad_payload_keeps_node_with_defaults() {
    let result = run("A[Constant3Vector(1,oops,0)] --> BaseColor");
    assert_eq!(
        result.plan.instructions,
        vec![
            create("A", "Constant3Vector", NodeValue::Default, -600, 0),
            connect_root("A", "", RootChannel::BaseColor),
        ]
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, Some(codes::VALUE_ARITY));
}

#[test]
fn empty_input_is_valid_and_silent() {
    let result = run("");
    assert!(result.plan.is_empty());
    assert!(result.diagnostics.is_empty());
}

// ── Pin assignment ──────────────────────────────────────────────────────────

#[test]
fn binary_input_slot_sequence_is_a_b_b() {
    let result = run("X[Constant] --> M[Multiply]\nY[Constant] --> M\nZ[Constant] --> M");
    let pins: Vec<&str> = result
        .plan
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Connect { target_pin, .. } => Some(*target_pin),
            _ => None,
        })
        .collect();
    assert_eq!(pins, vec!["A", "B", "B"]);
}

#[test]
fn root_sink_via_declared_descriptor() {
    let result = run("N[TextureSample] --> Out[Normal]");
    assert_eq!(
        result.plan.instructions,
        vec![
            create("N", "TextureSample", NodeValue::Default, -600, 0),
            connect_root("N", "RGB", RootChannel::Normal),
        ]
    );
}

// ── Structural properties ───────────────────────────────────────────────────

#[test]
fn redeclaring_an_id_overwrites_the_earlier_resolution() {
    let result = run("A[Constant(1)]\nA[ScalarParameter(2)]");
    assert_eq!(
        result.plan.instructions,
        vec![create("A", "ScalarParameter", NodeValue::Scalar(2.0), -600, 0)]
    );
}

#[test]
fn create_and_connect_counts_are_bounded() {
    let source = "A[Constant] --> M[Add]\nB[Foo] --> M\nC[Constant] --> M\nM --> BaseColor";
    let result = run(source);
    // 3 of the 4 declared ids resolve; one of the 4 edges dangles.
    assert_eq!(result.plan.create_count(), 3);
    assert!(result.plan.connect_count() <= 4);
    assert_eq!(result.plan.connect_count(), 3);
}

#[test]
fn identical_text_yields_identical_plans() {
    let source = "graph TD\nT[TextureSample] --> M[Multiply]\nC[Constant(0.3)] --> M\nM --> EmissiveColor";
    let first = run(source);
    let second = run(source);
    assert_eq!(first.plan, second.plan);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.provenance, second.provenance);
}

#[test]
fn layout_grid_wraps_rows() {
    // Nine creatable nodes: two full rows of four plus one.
    let source = "a[Time]\nb[Time]\nc[Time]\nd[Time]\ne[Time]\nf[Time]\ng[Time]\nh[Time]\ni[Time]";
    let result = run(source);
    let layouts: Vec<Layout> = result
        .plan
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::CreateNode { layout, .. } => Some(*layout),
            _ => None,
        })
        .collect();
    assert_eq!(layouts[0], Layout { x: -600, y: 0 });
    assert_eq!(layouts[4], Layout { x: -600, y: 100 });
    assert_eq!(layouts[8], Layout { x: -600, y: 200 });
}
