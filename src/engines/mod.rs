pub mod genetics;
pub mod operators;
pub mod process;
