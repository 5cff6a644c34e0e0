pub mod note;
pub mod task;

pub use note::{Note, SUBJECTS};
pub use task::Task;
