#![forbid(unsafe_code)]

//! Cell attribute round-trip through DOM attributes.
//!
//! Cells serialize their spans as `colspan`/`rowspan` and their widths as a
//! comma-separated `data-colwidth` list. A width of `0` stands for "unset".

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::node::{CellAttrs, ColWidths};

/// DOM attribute name → value.
pub type DomAttrs = BTreeMap<String, String>;

pub const COLSPAN_ATTR: &str = "colspan";
pub const ROWSPAN_ATTR: &str = "rowspan";
pub const COLWIDTH_ATTR: &str = "data-colwidth";

static COLWIDTH_LIST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+(,\d+)*$").ok());

fn parse_span(value: Option<&String>) -> u32 {
    value
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn parse_colwidth(raw: &str, colspan: u32) -> Option<ColWidths> {
    let pattern = COLWIDTH_LIST.as_ref()?;
    if !pattern.is_match(raw) {
        return None;
    }
    let widths = raw
        .split(',')
        .map(|part| part.parse::<u32>().ok().filter(|w| *w > 0))
        .collect::<ColWidths>();
    (widths.len() == colspan as usize).then_some(widths)
}

impl CellAttrs {
    /// Read cell attributes from DOM attributes.
    ///
    /// Malformed spans fall back to `1`; a `data-colwidth` list is dropped
    /// unless it is well formed and has exactly `colspan` entries.
    #[must_use]
    pub fn from_dom(dom: &DomAttrs) -> Self {
        let colspan = parse_span(dom.get(COLSPAN_ATTR));
        let rowspan = parse_span(dom.get(ROWSPAN_ATTR));
        let colwidth = dom
            .get(COLWIDTH_ATTR)
            .and_then(|raw| parse_colwidth(raw, colspan));
        Self {
            colspan,
            rowspan,
            colwidth,
        }
    }

    /// Write cell attributes as DOM attributes, omitting defaults.
    #[must_use]
    pub fn to_dom(&self) -> DomAttrs {
        let mut dom = DomAttrs::new();
        if self.colspan != 1 {
            dom.insert(COLSPAN_ATTR.to_owned(), self.colspan.to_string());
        }
        if self.rowspan != 1 {
            dom.insert(ROWSPAN_ATTR.to_owned(), self.rowspan.to_string());
        }
        if let Some(widths) = &self.colwidth {
            let joined = widths
                .iter()
                .map(|w| w.unwrap_or(0).to_string())
                .collect::<Vec<_>>()
                .join(",");
            dom.insert(COLWIDTH_ATTR.to_owned(), joined);
        }
        dom
    }
}
