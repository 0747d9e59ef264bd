pub mod artifact_writer;
pub mod save_dialog;

pub use artifact_writer::ArtifactWriter;
pub use save_dialog::{suggested_file_name, FixedPathDialog, NullDialog, SaveDialog};
