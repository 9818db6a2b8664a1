pub mod scanner;
pub mod size;
pub mod hash;
pub mod drives;

pub use scanner::{file_metadata, list_files, list_folders, validate_root};
pub use size::aggregate_size;
pub use hash::{prefix_fingerprint, HASH_SAMPLE_BYTES};
pub use drives::list_drives;
