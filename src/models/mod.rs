pub mod document;
pub mod score;
pub mod analysis;

pub use document::*;
pub use score::*;
pub use analysis::*;
