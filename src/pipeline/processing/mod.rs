pub mod bias;
pub mod cleaner;
pub mod merge;
pub mod normalize;
pub mod reconcile;
