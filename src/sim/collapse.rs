//! Line collapse: the slide + merge rule applied to one line
//!
//! Input is the present values of a line, already compacted and ordered so
//! the slide target is the front. Equal neighbours merge pairwise from the
//! front; a merged tile is never examined again in the same move. Two tiles
//! of the largest representable value (`1 << 31`) do not merge.

/// Result of collapsing one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collapsed {
    /// Resulting values, front first. Never longer than the input.
    pub values: Vec<u32>,
    /// Sum of all merged tile values
    pub score: u64,
    /// Whether the output holds the winning value
    pub reached_target: bool,
}

/// Value of merging two tiles, `None` if they are unequal or the sum would
/// not fit in a tile
#[inline]
pub(crate) fn merge(a: u32, b: u32) -> Option<u32> {
    if a == b { a.checked_mul(2) } else { None }
}

/// Collapse a compacted line toward its front
pub fn collapse_line(line: &[u32], winning_value: u32) -> Collapsed {
    let mut values = Vec::with_capacity(line.len());
    let mut score = 0u64;
    let mut i = 0;

    while i < line.len() {
        let current = line[i];
        let merged = line.get(i + 1).and_then(|&next| merge(current, next));
        if let Some(merged) = merged {
            values.push(merged);
            score += u64::from(merged);
            i += 2;
        } else {
            values.push(current);
            i += 1;
        }
    }

    let reached_target = values.contains(&winning_value);
    Collapsed {
        values,
        score,
        reached_target,
    }
}
