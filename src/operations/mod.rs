pub mod feather_collapse;

pub use feather_collapse::{BucketGrid, CollapseInnerLoops};
