pub mod chart;
pub mod evaluation;
pub mod pattern;
pub mod signals;
pub mod trend;

pub use chart::*;
pub use evaluation::*;
pub use pattern::*;
pub use signals::*;
pub use trend::*;
