//! Run orchestration and report rendering.
mod export;
mod progress;
mod runner;
mod summary;


pub use export::{render_report, report_json, write_report};
pub use progress::progress_line;
pub use runner::run_load_test;
pub use summary::{render_text, summary_lines};
