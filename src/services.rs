pub mod seed;
pub mod todos;
