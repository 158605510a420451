pub mod json_lines_detection_source;
