pub mod graph;
pub mod inheritance;
pub mod state;

pub use graph::ModelGraph;
pub use inheritance::link_inheritance;
pub use state::InheritanceState;
