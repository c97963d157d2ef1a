//! Local handling of uploaded delimited files.
//!
//! The heavy parsing lives behind the preview endpoint; this crate
//! covers what must happen on the operator's side of the wire: the
//! extension gate, a fail-fast header-row check, and sample template
//! generation.

pub mod error;
pub mod header;
pub mod template;

pub use error::{IngestError, Result};
pub use header::{check_extension, parse_delimited_line, read_header_row};
pub use template::sample_template;
