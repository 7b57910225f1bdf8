//! gpv-ingest: announcement page flattening, date-block segmentation and document assembly.

pub mod compile;
pub mod html;
pub mod parsers;
pub mod types;

pub use compile::compile_document;
pub use html::html_to_text;
pub use parsers::zoe::{find_date_blocks, parse_schedule_block, time_to_hour};
pub use types::{DateBlock, GroupLine, HeaderKind};
