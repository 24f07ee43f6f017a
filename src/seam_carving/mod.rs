pub mod accumulate;
pub mod carve;
pub mod energy;
pub mod remove;
pub mod seam;
pub mod segment;
pub mod transpose;
