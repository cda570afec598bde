//! farmtrack-domain
//!
//! Pure domain models (Farm, Crop, Expense, Budget, CropYield, etc.).
//! No I/O, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod crop;
pub mod expense;
pub mod farm;
pub mod harvest;

pub use budget::*;
pub use common::*;
pub use crop::*;
pub use expense::*;
pub use farm::*;
pub use harvest::*;
