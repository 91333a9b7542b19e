#[macro_use]
pub mod error;

pub mod ir;
pub mod lowering;
pub mod target;
pub mod type_store;
