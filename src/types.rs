/// Seed for a deterministic generator.
///
/// Identical seed + identical parameters always reproduce byte-identical
/// geometry. Fresh seeds for new objects come from
/// [`crate::rng::SeedAllocator`], never from inside a generator.
pub type Seed = u32;

/// Identifier for a node in a [`crate::tree::BranchTree`].
///
/// This is an index into `BranchTree::nodes`, and is only meaningful within
/// the lifetime of a given tree instance.
pub type NodeId = usize;
