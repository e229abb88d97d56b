pub mod error;
pub mod options;
pub mod session;

pub use error::{ColorWarning, TurtleError};
pub use options::InitOptions;
pub use session::Session;
