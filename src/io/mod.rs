//! 输入输出 - 文本记录加载与表格输出

pub mod dump;
pub mod loader;

pub use dump::{dump_to_path, render_table, write_table};
pub use loader::{load_file, load_records, parse_line, LoadReport};
