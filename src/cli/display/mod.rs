//! Terminal rendering: tables for lists, human text for operation results.

pub mod result;
pub mod table;

pub use result::render_operation_result;
pub use table::{list_table, render_list};
