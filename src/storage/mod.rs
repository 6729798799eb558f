pub mod json_file;

pub use json_file::{read_result_set, write_result_set};
