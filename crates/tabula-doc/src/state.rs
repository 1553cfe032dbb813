#![forbid(unsafe_code)]

//! Editor state: the current document value plus a monotonically increasing
//! version used to reject transactions built against stale snapshots.

use std::sync::Arc;

use crate::error::DocError;
use crate::node::Node;
use crate::transaction::Transaction;

#[derive(Debug, Clone)]
pub struct EditorState {
    doc: Arc<Node>,
    version: u64,
}

impl EditorState {
    #[must_use]
    pub fn new(doc: Node) -> Self {
        Self {
            doc: Arc::new(doc),
            version: 0,
        }
    }

    #[must_use]
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub(crate) fn doc_arc(&self) -> Arc<Node> {
        Arc::clone(&self.doc)
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Produce the state after `tr`.
    ///
    /// Transactions without steps leave the version unchanged.
    pub fn apply(&self, tr: Transaction) -> Result<EditorState, DocError> {
        if tr.base_version() != self.version {
            return Err(DocError::StaleTransaction {
                expected_version: tr.base_version(),
                actual_version: self.version,
            });
        }
        if !tr.doc_changed() {
            return Ok(self.clone());
        }
        Ok(Self {
            doc: Arc::new(tr.into_doc()),
            version: self.version + 1,
        })
    }
}
