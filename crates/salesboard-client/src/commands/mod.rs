pub mod check;
pub mod monthly;
