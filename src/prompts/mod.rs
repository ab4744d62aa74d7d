pub mod task;

pub use task::{Task, build_prompt};
