pub mod json_writer;
pub mod table_writer;

pub use json_writer::{JsonWriter, SnapshotFileInfo};
pub use table_writer::{Table, ToTable};
