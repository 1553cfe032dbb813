#![forbid(unsafe_code)]

//! Position mapping across document edits.
//!
//! Every step reports a [`StepMap`]: the list of ranges it replaced, each as
//! `(start, old_size, new_size)` in the coordinates of the document the step
//! was applied to. A [`Mapping`] chains step maps so a position taken before
//! a transaction can be rebased onto the transaction's result.

/// Which side a position sticks to when content is inserted exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assoc {
    /// Stay before inserted content.
    Before,
    /// Move after inserted content.
    #[default]
    After,
}

/// One replaced range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRange {
    pub start: usize,
    pub old_size: usize,
    pub new_size: usize,
}

/// Result of mapping a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    /// The content on the `assoc` side of the position was removed.
    pub deleted: bool,
}

/// Ranges replaced by a single step, sorted by start.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepMap {
    ranges: Vec<MapRange>,
}

impl StepMap {
    /// A map for a step that did not move any positions.
    #[must_use]
    pub const fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// A map replacing `old_size` positions at `start` with `new_size`.
    #[must_use]
    pub fn replaced(start: usize, old_size: usize, new_size: usize) -> Self {
        if old_size == 0 && new_size == 0 {
            return Self::empty();
        }
        Self {
            ranges: vec![MapRange {
                start,
                old_size,
                new_size,
            }],
        }
    }

    #[must_use]
    pub fn ranges(&self) -> &[MapRange] {
        &self.ranges
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Map a position through this step.
    #[must_use]
    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let mut shifted: isize = 0;
        for range in &self.ranges {
            if range.start > pos {
                break;
            }
            let end = range.start + range.old_size;
            if pos <= end {
                let before = if range.old_size == 0 {
                    assoc == Assoc::Before
                } else if pos == range.start {
                    true
                } else if pos == end {
                    false
                } else {
                    assoc == Assoc::Before
                };
                let base = range.start.saturating_add_signed(shifted);
                let mapped = if before { base } else { base + range.new_size };
                let deleted = match assoc {
                    Assoc::Before => pos != range.start,
                    Assoc::After => pos != end,
                };
                return MapResult {
                    pos: mapped,
                    deleted,
                };
            }
            shifted += range.new_size as isize - range.old_size as isize;
        }
        MapResult {
            pos: pos.saturating_add_signed(shifted),
            deleted: false,
        }
    }
}

/// A chain of step maps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    #[must_use]
    pub const fn new() -> Self {
        Self { maps: Vec::new() }
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    #[must_use]
    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    /// Map a position through every step, noting whether it was deleted by
    /// any of them.
    #[must_use]
    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        self.maps.iter().fold(
            MapResult {
                pos,
                deleted: false,
            },
            |acc, map| {
                let next = map.map_result(acc.pos, assoc);
                MapResult {
                    pos: next.pos,
                    deleted: acc.deleted || next.deleted,
                }
            },
        )
    }

    /// Map a position, returning `None` when the content it referred to was
    /// deleted.
    #[must_use]
    pub fn map(&self, pos: usize, assoc: Assoc) -> Option<usize> {
        let result = self.map_result(pos, assoc);
        (!result.deleted).then_some(result.pos)
    }
}
