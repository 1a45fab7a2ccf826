pub mod environment;
pub mod terminal;
pub mod timestamps;

pub use environment::{default_store_path, get_store_path};
pub use terminal::{preview, sanitize};
pub use timestamps::{format_timestamp, format_timestamp_at};
