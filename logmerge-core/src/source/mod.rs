//! Where merged entries come from and what they are called in the output.


mod input;
mod naming;

pub use input::SourceInput;
pub use naming::SourceName;
