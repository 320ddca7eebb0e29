pub mod formatter;

pub use formatter::{
    format_job_failure, format_job_success, format_run_summary, should_use_colors,
};
