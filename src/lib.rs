//! A small street map of roads and the junctions between them, and the turn
//! instructions for getting from one road to the next.

pub mod config;
pub mod data;
pub mod errors;
pub mod instruction;
pub mod legacy;
pub mod logging;
pub mod store;

pub use data::object::{MapObject, ObjectKind};
pub use data::road::{RoadType, RoadView};
pub use data::{MapData, ObjectId};
pub use errors::{Error, ErrorKind, Result};
pub use instruction::Instruction;
pub use store::{NavMap, SavePolicy};
