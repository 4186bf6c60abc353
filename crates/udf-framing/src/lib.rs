//! Wire-format parsing for warehouse UDF record payloads: a bounded byte
//! cursor, the embedded header frame carried ahead of record bodies, and
//! the producer-side aggregation envelope that multiplexes sub-records.

pub mod cursor;
pub mod envelope;
pub mod error;
pub mod headers;

pub use cursor::ByteCursor;
pub use envelope::{deaggregate, AggregatedRecord, SubRecord, Tag};
pub use error::FramingError;
pub use headers::{encode_headers, parse_headers, HeaderBlock, HEADER_MAGIC};
