pub mod error;
pub mod math;
pub mod operations;
pub mod system;

mod proptests;

pub use error::{GaussJordanError, Result};
pub use operations::{gj_solve, Solution};
pub use system::{AugmentedMatrix, Hyperplane, LinearSystem, Rows};
