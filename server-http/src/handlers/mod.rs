pub mod health;
pub mod todo_ops;

pub use health::health_check;
pub use todo_ops::{get_todo, list_todos};
