// mmc — Mermaid Material Compiler
//
// Compiles a line-based, flow-chart style description of a material node
// graph into an ordered, host-agnostic construction plan. The pipeline is
// parse → resolve → bind → emit; see `pipeline::compile` for the one-shot
// entry point and `exec` for the host executor boundary.

pub mod ast;
pub mod bind;
pub mod diag;
pub mod exec;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod resolve;
