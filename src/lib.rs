//! Single-pass, streaming HTML tokenizer.
//!
//! One byte goes in per [`HtmlParser::feed`] call; no lookahead, no document
//! buffering, no token objects. The classification of the current byte is
//! queryable through [`HtmlParser::is_in`], and up to four caller-bound
//! buffers capture the tag name, attribute name, attribute value, and inner
//! text as they stream past.

mod buffer;
mod flags;
mod parser;
mod script;
pub mod stream;
pub mod text;

pub use flags::Flag;
pub use parser::{HtmlParser, Slot};
pub use stream::{Event, Events, StreamError};
