pub mod element;
pub mod ifc_model;
pub mod store;

pub use element::Element;
pub use ifc_model::{IfcModel, Storey};
pub use store::{ModelId, ModelStore};
