//! Bipartite graph matching algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augmenting;
pub mod bipartite;
pub mod matching;

pub use self::augmenting::{
    find_augmenting_path, maximum_cardinality_matching, AugmentingPathMatcher,
    MatchingStatistics, SelectionStrategy,
};
pub use self::bipartite::{partition, Partition};
pub use self::matching::Matching;
