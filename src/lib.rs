//! # IFC Finder
//!
//! A terminal-based IFC finder: load building models, run category and
//! property queries against them, and isolate the matching elements.
//!
//! ## Features
//!
//! - Parse IFC files (IFC2x3 and IFC4 schemas) from disk or HTTP
//! - Regex rules over element categories and property sets
//! - Queries with AND/OR rule semantics, unioned into query groups
//! - Isolate matches in the terminal UI, export them to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use ifc_finder::model::ModelStore;
//! use ifc_finder::parser::parse_ifc_model;
//! use ifc_finder::queries::{Query, QueryGroup, Rule};
//!
//! let mut store = ModelStore::new();
//! store.insert(parse_ifc_model("model.ifc")?);
//!
//! let group = QueryGroup::new()
//!     .with_query(Query::new("walls", true).with_rule(Rule::category("wall")?));
//! let matches = group.update(&store);
//! println!("{} models with matches", matches.len());
//! # Ok::<(), color_eyre::Report>(())
//! ```

pub mod error;
pub mod export;
pub mod fetch;
pub mod model;
pub mod parser;
pub mod queries;
pub mod ui;
pub mod view;
