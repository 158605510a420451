pub mod frame_evaluator;
pub mod infrastructure;
pub mod monitor_zones_use_case;
pub mod pipeline_executor;
pub mod pipeline_logger;
