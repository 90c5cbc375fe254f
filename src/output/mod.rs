mod response;

pub use response::{map_cmd_result, print_json_result};
