// Snapshot tests: lock the plan listing and diagnostic rendering to detect
// unintended output changes.
//
// Uses the library API and snapshots the Display output via `insta` inline
// snapshots. Run `cargo insta review` after intentional output changes.

use mmc::pipeline::compile;
use mmc::registry::Registry;

/// Compile and render the plan listing followed by rendered diagnostics.
fn render(source: &str) -> String {
    let result = compile(source, &Registry::builtin());
    let mut out = result.plan.to_string();
    if !result.diagnostics.is_empty() {
        out.push_str("---\n");
        for diag in &result.diagnostics {
            out.push_str(&format!("{diag}\n"));
        }
    }
    out
}

#[test]
fn layered_material_plan() {
    let source = "graph LR\n\
                  T[TextureSample] --> M[Multiply]\n\
                  C[Constant3Vector(1,0,0)] --> M\n\
                  M --> BaseColor\n\
                  P[ScalarParameter(0.5)] --> Roughness\n";
    insta::assert_snapshot!(render(source), @r"
create T TextureSample default at (-600, 0)
create M Multiply default at (-350, 0)
create C Constant3Vector color(1, 0, 0, 1) at (-100, 0)
create P ScalarParameter scalar(0.5) at (150, 0)
connect T[RGB] -> M[A]
connect C[] -> M[B]
connect M[] -> root.BaseColor
connect P[] -> root.Roughness
");
}

#[test]
fn warnings_render_with_codes() {
    let source = "A[Foo] --> B\nB[Constant(x)]\nC -->\n";
    insta::assert_snapshot!(render(source), @r"
create B Constant default at (-600, 0)
---
warning[W0100]: line `C -->` yielded no node or edge
  hint: expected `id[Kind]` declarations or a `src --> dst` edge
warning[W0200]: unknown node kind `Foo` for `A`; node dropped
  hint: kind names are case-sensitive registry entries
warning[W0300]: `B`: value `x` is not a number; using default values
warning[W0400]: edge `A --> B` dropped: `A` did not resolve
");
}

#[test]
fn empty_source_renders_empty() {
    insta::assert_snapshot!(render(""), @"");
}
