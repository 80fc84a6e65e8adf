//! Stateless operations over whole files and directories: modularized.

mod backup;
mod content;
mod cwd;
mod dirs;
mod durability;
mod exists;
mod sparse;
mod transfer;

pub use backup::rename_bak;
pub use content::{load_file_into_buffer, save_buffer_into_file};
pub use cwd::{current_directory, exe_file_name, set_current_directory};
pub use dirs::{
    create_directory, delete_directory_with_content, force_directories,
    remove_directory,
};
pub use durability::{flush_dir_buffers, flush_file_buffers};
pub use exists::{
    dir_empty, directory_exists, file_exists, file_exists_in, file_size, free_disk_size,
};
pub use sparse::{create_sparse_file, truncate_file};
pub use transfer::{copy_file, delete_file, move_file};

#[cfg(unix)]
pub use crate::platform::fix_exec_permission;
