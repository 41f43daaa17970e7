//! Identity graph: shared phone numbers and emails as connected vertices

mod identity;
mod vertex;


pub use identity::IdentityGraph;
pub use vertex::{ComponentLabel, IdentityVertex, VertexId, VertexKey, VertexKind};
