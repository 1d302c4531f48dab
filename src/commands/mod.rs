pub mod base_commands;
pub mod report_cmd;
pub mod result_format;
pub mod simulate_cmd;
