//! Generic managed-object record decoding and diffing primitives used by
//! higher-level tools.

pub mod decode;
pub mod diff;
pub mod dn;
pub mod format;
pub mod record;

pub use decode::{decode_bytes, decode_file, decode_value, DecodeError};
pub use diff::{counter_delta, map_delta, set_delta, transition, MapDelta, ScalarChange, SetDelta};
pub use dn::{node_id, port_location, PortLocation, UNKNOWN};
pub use format::{format_counters, format_json, format_map, format_set};
pub use record::RawRecord;
