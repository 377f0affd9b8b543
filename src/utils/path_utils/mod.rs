mod dir_checks;
mod expansion;
mod file_checks;

pub use dir_checks::check_readable_dir;
pub use file_checks::check_valid_json_file;
