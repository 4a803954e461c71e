pub mod ifc;
pub mod step;

pub use crate::error::ParseError;
pub use ifc::{parse_ifc_model, parse_ifc_source};
pub use step::{StepEntity, StepFile, StepValue};
