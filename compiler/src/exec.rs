// exec.rs — Host executor boundary
//
// The compiler core never touches a live graph-editing host. A
// `PlanExecutor` implementation turns instructions into real host objects;
// `execute` drives it over a plan, reporting failures per instruction so a
// bad node never aborts the batch.
//
// Preconditions: `plan` comes from `plan::emit` (creates before connects).
// Postconditions: every instruction was attempted exactly once.
// Failure modes: executor errors and unknown ids are recorded in the
//                report, never propagated.
// Side effects: whatever the executor performs.

use std::collections::HashMap;
use std::fmt;

use crate::plan::{ConstructionPlan, Instruction, Layout, NodeValue};
use crate::registry::RootChannel;

// ── Executor interface ──────────────────────────────────────────────────────

/// Host-side graph construction. Implementations allocate one host node per
/// `instantiate` call and wire pins/channels on the connect calls.
///
/// For parameter kinds (`ScalarParameter`, `VectorParameter`) the node `id`
/// doubles as the host-side parameter name.
pub trait PlanExecutor {
    type Handle;
    type Error: fmt::Display;

    fn instantiate(
        &mut self,
        id: &str,
        kind: &str,
        value: NodeValue,
        layout: Layout,
    ) -> Result<Self::Handle, Self::Error>;

    fn connect(
        &mut self,
        source: &Self::Handle,
        source_pin: &str,
        target: &Self::Handle,
        target_pin: &str,
    ) -> Result<(), Self::Error>;

    fn connect_to_root(
        &mut self,
        source: &Self::Handle,
        source_pin: &str,
        channel: RootChannel,
    ) -> Result<(), Self::Error>;
}

// ── Execution report ────────────────────────────────────────────────────────

/// One failed instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecFailure {
    pub instruction_index: usize,
    pub message: String,
}

/// Outcome of driving an executor over a plan.
#[derive(Debug, Default)]
pub struct ExecReport {
    pub created: usize,
    pub connected: usize,
    pub failures: Vec<ExecFailure>,
}

impl ExecReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

// ── Driver ──────────────────────────────────────────────────────────────────

/// Apply every instruction of `plan` to `executor`.
///
/// Tolerant by contract: a failed create leaves its id unallocated, and
/// later connections referencing that id (or any unknown id) are recorded
/// as failures and skipped.
pub fn execute<E: PlanExecutor>(plan: &ConstructionPlan, executor: &mut E) -> ExecReport {
    let mut report = ExecReport::default();
    let mut handles: HashMap<&str, E::Handle> = HashMap::new();

    for (index, instruction) in plan.instructions.iter().enumerate() {
        match instruction {
            Instruction::CreateNode {
                id,
                kind,
                value,
                layout,
            } => match executor.instantiate(id, kind, *value, *layout) {
                Ok(handle) => {
                    handles.insert(id.as_str(), handle);
                    report.created += 1;
                }
                Err(e) => report.failures.push(ExecFailure {
                    instruction_index: index,
                    message: format!("create `{}` failed: {}", id, e),
                }),
            },
            Instruction::Connect {
                source,
                source_pin,
                target,
                target_pin,
            } => {
                let (Some(src), Some(dst)) =
                    (handles.get(source.as_str()), handles.get(target.as_str()))
                else {
                    report.failures.push(unknown_id(index, source, target, &handles));
                    continue;
                };
                match executor.connect(src, source_pin, dst, target_pin) {
                    Ok(()) => report.connected += 1,
                    Err(e) => report.failures.push(ExecFailure {
                        instruction_index: index,
                        message: format!("connect `{}` -> `{}` failed: {}", source, target, e),
                    }),
                }
            }
            Instruction::ConnectToRoot {
                source,
                source_pin,
                channel,
            } => {
                let Some(src) = handles.get(source.as_str()) else {
                    report.failures.push(ExecFailure {
                        instruction_index: index,
                        message: format!("unknown id `{}`", source),
                    });
                    continue;
                };
                match executor.connect_to_root(src, source_pin, *channel) {
                    Ok(()) => report.connected += 1,
                    Err(e) => report.failures.push(ExecFailure {
                        instruction_index: index,
                        message: format!("connect `{}` -> root failed: {}", source, e),
                    }),
                }
            }
        }
    }

    report
}

fn unknown_id<H>(
    index: usize,
    source: &str,
    target: &str,
    handles: &HashMap<&str, H>,
) -> ExecFailure {
    let missing = if handles.contains_key(source) {
        target
    } else {
        source
    };
    ExecFailure {
        instruction_index: index,
        message: format!("unknown id `{}`", missing),
    }
}

// ── Recording fake ──────────────────────────────────────────────────────────

/// In-memory executor that records every operation as a line of text.
/// Used to test the compiler core without a live host.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub ops: Vec<String>,
    /// Kinds whose `instantiate` should fail, for failure-path tests.
    pub fail_kinds: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanExecutor for RecordingExecutor {
    type Handle = String;
    type Error = String;

    fn instantiate(
        &mut self,
        id: &str,
        kind: &str,
        value: NodeValue,
        layout: Layout,
    ) -> Result<String, String> {
        if self.fail_kinds.iter().any(|k| k == kind) {
            return Err(format!("kind `{kind}` unavailable"));
        }
        self.ops
            .push(format!("create {id} {kind} {value} at ({}, {})", layout.x, layout.y));
        Ok(id.to_string())
    }

    fn connect(
        &mut self,
        source: &String,
        source_pin: &str,
        target: &String,
        target_pin: &str,
    ) -> Result<(), String> {
        self.ops
            .push(format!("connect {source}[{source_pin}] -> {target}[{target_pin}]"));
        Ok(())
    }

    fn connect_to_root(
        &mut self,
        source: &String,
        source_pin: &str,
        channel: RootChannel,
    ) -> Result<(), String> {
        self.ops
            .push(format!("connect {source}[{source_pin}] -> root.{channel}"));
        Ok(())
    }
}
