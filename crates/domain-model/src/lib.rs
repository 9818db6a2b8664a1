pub mod drive;
pub mod folder_entry;
pub mod file_entry;
pub mod decision;
pub mod operation;
pub mod units;

pub use drive::*;
pub use folder_entry::*;
pub use file_entry::*;
pub use decision::*;
pub use operation::*;
