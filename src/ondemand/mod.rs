mod buffer;
mod scan;
mod stream;

pub use buffer::{PADDING, pad_buffer, read_padded_file};
pub use stream::{Document, DocumentStream, FieldLookup};
