mod decode;
mod errors;
mod modrm;
mod window;

pub use decode::decode;
pub use errors::{DecodeError, Result};
