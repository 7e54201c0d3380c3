pub mod completion;
pub mod habit;
pub mod progress;

pub use completion::Completion;
pub use habit::{Cadence, Habit, ParseFieldError, Strategy};
pub use progress::{Progress, WindowMark};
