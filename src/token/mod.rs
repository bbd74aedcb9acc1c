// Internal modules
mod compact;
mod header;
mod parsed;

// Public API exports
pub use header::TokenHeader;
pub use parsed::ParsedToken;

pub(crate) use compact::{finish, signing_input, CompactToken};
