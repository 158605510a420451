pub mod json_lines_violation_sink;
pub mod log_violation_sink;
