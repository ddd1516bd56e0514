//! Signal domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Signal` aggregate and its small value objects
//! - `location`: borough, address and geometry

mod location;
mod model;

pub use location::{Address, Location, Point, Stadsdeel};
pub use model::{CategoryAssignment, NewNote, Note, Priority, Reporter, Signal};
