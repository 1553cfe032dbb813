#![forbid(unsafe_code)]

//! Document model for Tabula hosts.
//!
//! # Role in Tabula
//! `tabula-doc` is the minimal structured-document layer the resize engine
//! needs from a host editor: an immutable node tree addressed by integer
//! offsets, resolved positions, steps with position maps, and transactions
//! that bundle steps into one atomic edit.
//!
//! # This crate provides
//! - [`Node`] trees with table roles and [`CellAttrs`] (spans and widths).
//! - [`ResolvedPos`] for ancestor/sibling navigation.
//! - [`Step`], [`StepMap`], and [`Mapping`] for edits and position rebasing.
//! - [`Transaction`] and [`EditorState`] for atomic, strictly ordered edits.
//! - DOM attribute round-trip for cells ([`CellAttrs::from_dom`]).

pub mod cell_dom;
pub mod error;
pub mod mapping;
pub mod node;
pub mod resolve;
pub mod state;
pub mod step;
pub mod transaction;

pub use cell_dom::DomAttrs;
pub use error::DocError;
pub use mapping::{Assoc, MapRange, MapResult, Mapping, StepMap};
pub use node::{CellAttrs, ColWidths, Node, NodeKind, TableRole};
pub use resolve::ResolvedPos;
pub use state::EditorState;
pub use step::Step;
pub use transaction::{Transaction, TransactionMeta};
