mod elimination;
mod solution;
mod solver;

pub use elimination::{back_substitute, forward_eliminate};
pub use solution::{classify, Parametrization, Solution};
pub use solver::{gj_solve, gj_solve_rounded, GjSolve, MAX_DECIMALS};
