mod filters;
mod group;
mod ids;
mod task;

pub use filters::*;
pub use group::*;
pub use ids::*;
pub use task::*;
