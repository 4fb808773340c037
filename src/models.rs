pub mod memento;
pub mod status;
pub mod store;
pub mod todo;
