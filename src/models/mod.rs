pub mod alert;
pub mod announcement;
pub mod feature;

pub use alert::*;
pub use announcement::*;
pub use feature::*;
