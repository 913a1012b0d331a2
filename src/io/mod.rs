//! I/O module
//!
//! Handles the flat-file persistence format.
//!
//! # Components
//!
//! - `codec` - Pure byte-level translation between account records and the
//!   on-disk text format
//! - `storage` - Scoped reads and writes of the backing file

pub mod codec;
pub mod storage;

pub use codec::{decode, encode, RECORD_SEPARATOR, TIMESTAMP_FORMAT};
pub use storage::Storage;
