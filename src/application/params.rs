//! Shape parameters of a generated tree.

/// Requested shape of a generated tree.
///
/// `node_count` is passed through as given. Negative `min_depth` and `min_width`
/// count as 0, see [`TreeParams::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    pub node_count: i64,
    pub min_depth: i64,
    pub min_width: i64,
}

impl TreeParams {
    pub fn new(node_count: i64, min_depth: i64, min_width: i64) -> Self {
        Self {
            node_count,
            min_depth,
            min_width,
        }
    }

    pub fn clamped(&self) -> Self {
        Self {
            node_count: self.node_count,
            min_depth: self.min_depth.max(0),
            min_width: self.min_width.max(0),
        }
    }

    /// Length of the deep branch.
    pub fn depth(&self) -> usize {
        to_count(self.min_depth)
    }

    /// Fan-out of the wide branch.
    pub fn width(&self) -> usize {
        to_count(self.min_width)
    }

    /// Number of randomly attached nodes before the deep and wide branches.
    ///
    /// `max(0, node_count - min_depth - min_width - 1)` on the clamped values.
    pub fn fill_count(&self) -> usize {
        let clamped = self.clamped();
        to_count(
            clamped
                .node_count
                .saturating_sub(clamped.min_depth)
                .saturating_sub(clamped.min_width)
                .saturating_sub(1),
        )
    }

    /// Node count of the generated tree, root included.
    ///
    /// Exceeds `node_count` when the depth and width guarantees alone need more nodes.
    pub fn expected_size(&self) -> usize {
        1 + self.fill_count() + self.depth() + self.width()
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
