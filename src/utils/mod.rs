pub mod environment;
pub mod paths;
pub mod timestamps;

pub use environment::get_data_dir;
pub use paths::{format_path_with_tilde, validate_file_size};
pub use timestamps::format_timestamp;
