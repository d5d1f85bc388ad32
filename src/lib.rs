pub mod loader;
pub mod logging;
pub mod parse;
pub mod probe;
pub mod record;
pub mod source;
pub mod state;
