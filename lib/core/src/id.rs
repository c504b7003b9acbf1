// Hierarchical path ids: "<root>-<i>-<j>-..." and the partition keys derived from them

use rand::Rng;

/// Separator between path segments of an id.
pub const SEGMENT_SEPARATOR: char = '-';

/// Id of the `index`-th child of `parent_id`.
#[inline]
#[must_use]
pub fn child_id(parent_id: &str, index: u32) -> String {
    format!("{}{}{}", parent_id, SEGMENT_SEPARATOR, index)
}

/// Partition key of an id: its first two path segments, or the id itself
/// when it has only one segment.
#[must_use]
pub fn partition_key(id: &str) -> String {
    let mut segments = id.splitn(3, SEGMENT_SEPARATOR);
    match (segments.next(), segments.next()) {
        (Some(root), Some(first)) => format!("{}{}{}", root, SEGMENT_SEPARATOR, first),
        _ => id.to_string(),
    }
}

/// Number of path segments below the root (0 for the root itself).
#[inline]
#[must_use]
pub fn depth_of(id: &str) -> usize {
    id.matches(SEGMENT_SEPARATOR).count()
}

/// Level of the vertex with this id; the root is level 1.
#[inline]
#[must_use]
pub fn level_of(id: &str) -> u32 {
    depth_of(id) as u32 + 1
}

/// Appends `depth` random child indices in `[0, branching_factor)` to `root`.
///
/// The id is not checked against what the tree generator actually produced.
pub fn random_descendant_id<R: Rng + ?Sized>(
    root: &str,
    depth: u32,
    branching_factor: u32,
    rng: &mut R,
) -> String {
    random_path(root, std::iter::repeat(branching_factor).take(depth as usize), rng)
}

/// Like [`random_descendant_id`] but with one bound per level. A zero bound
/// stops the descent since that level has no children to pick from.
pub fn random_path<R, I>(root: &str, bounds: I, rng: &mut R) -> String
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let mut id = String::from(root);
    for bound in bounds {
        if bound == 0 {
            break;
        }
        id = child_id(&id, rng.random_range(0..bound));
    }
    id
}

/// How vertices are spread over storage partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionStrategy {
    /// Root plus first child index, so each top-level subtree gets its own partition.
    #[default]
    PathPrefix,
    /// Everything lives in the root's partition.
    Root,
}

impl PartitionStrategy {
    #[must_use]
    pub fn key_for(&self, id: &str) -> String {
        match self {
            PartitionStrategy::PathPrefix => partition_key(id),
            PartitionStrategy::Root => id
                .split(SEGMENT_SEPARATOR)
                .next()
                .unwrap_or(id)
                .to_string(),
        }
    }
}
