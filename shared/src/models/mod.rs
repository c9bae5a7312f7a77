//! Domain models for the café ordering platform

mod deduction;
mod inventory;
mod menu;
mod order;

pub use deduction::*;
pub use inventory::*;
pub use menu::*;
pub use order::*;
