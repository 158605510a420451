pub mod violation_sink;
