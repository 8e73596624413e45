/*!
# Core Module

Error taxonomy and file-system helpers shared by the generator and the
verifier.
*/

pub mod errors;
pub mod fs_utils;

pub use errors::{FixtureError, FixtureResult};
pub use fs_utils::{decode_utf8, read_utf8_file, write_prefixed_file};
