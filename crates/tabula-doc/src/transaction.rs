#![forbid(unsafe_code)]

//! Transactions: ordered step lists applied atomically.
//!
//! A transaction is built against one [`EditorState`] and accumulates steps,
//! each applied immediately to the transaction's working document. The host
//! accepts the whole transaction or none of it; downstream observers see the
//! bundle as a single edit.
//!
//! # Invariants
//!
//! - `doc()` always equals the result of applying `steps()` in order to
//!   `before()`.
//! - `mapping()` holds exactly one step map per step.
//! - A transaction built for version `n` is only accepted by a state at
//!   version `n`.

use std::sync::Arc;

use crate::error::DocError;
use crate::mapping::Mapping;
use crate::node::{CellAttrs, Node};
use crate::state::EditorState;
use crate::step::Step;

/// Free-form metadata the host and plugins attach to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMeta {
    /// Whether the edit should be recorded in undo history.
    pub add_to_history: bool,
    /// Short label of the component that produced the edit.
    pub origin: &'static str,
}

impl Default for TransactionMeta {
    fn default() -> Self {
        Self {
            add_to_history: true,
            origin: "user",
        }
    }
}

/// An in-progress or finished document edit.
#[derive(Debug, Clone)]
pub struct Transaction {
    before: Arc<Node>,
    base_version: u64,
    doc: Node,
    steps: Vec<Step>,
    mapping: Mapping,
    meta: TransactionMeta,
}

impl Transaction {
    /// Start a transaction against the given state.
    #[must_use]
    pub fn new(state: &EditorState) -> Self {
        let before = state.doc_arc();
        Self {
            doc: before.as_ref().clone(),
            before,
            base_version: state.version(),
            steps: Vec::new(),
            mapping: Mapping::new(),
            meta: TransactionMeta::default(),
        }
    }

    /// Apply a step to the working document and record it.
    pub fn step(&mut self, step: Step) -> Result<&mut Self, DocError> {
        let (next, map) = step.apply(&self.doc)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(step = ?step, "transaction step applied");
        self.doc = next;
        self.mapping.push(map);
        self.steps.push(step);
        Ok(self)
    }

    /// Replace the attributes of the cell at `pos`.
    pub fn set_cell_attrs(&mut self, pos: usize, attrs: CellAttrs) -> Result<&mut Self, DocError> {
        self.step(Step::SetCellAttrs { pos, attrs })
    }

    /// Replace the siblings between `from` and `to` with `nodes`.
    pub fn replace(
        &mut self,
        from: usize,
        to: usize,
        nodes: Vec<Node>,
    ) -> Result<&mut Self, DocError> {
        self.step(Step::Replace { from, to, nodes })
    }

    /// Insert `nodes` at a child boundary.
    pub fn insert(&mut self, pos: usize, nodes: Vec<Node>) -> Result<&mut Self, DocError> {
        self.replace(pos, pos, nodes)
    }

    /// Delete the siblings between `from` and `to`.
    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, DocError> {
        self.replace(from, to, Vec::new())
    }

    /// Set metadata for this transaction.
    #[must_use]
    pub fn with_meta(mut self, meta: TransactionMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Document the transaction started from.
    #[must_use]
    pub fn before(&self) -> &Node {
        &self.before
    }

    /// Working document after all steps.
    #[must_use]
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    /// Version of the state this transaction was built for.
    #[must_use]
    pub const fn base_version(&self) -> u64 {
        self.base_version
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    #[must_use]
    pub fn meta(&self) -> &TransactionMeta {
        &self.meta
    }

    /// Whether any step was recorded.
    #[must_use]
    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    pub(crate) fn into_doc(self) -> Node {
        self.doc
    }
}
