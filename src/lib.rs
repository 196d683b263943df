//! Parse UFW kernel log lines into `Record`s and filter them.
//!
//! ```
//! use ufwlog::{parse_line, FilterConfig, RecordFilter};
//!
//! let line = "Aug  6 06:25:20 myhost kernel: [105600.181847] [UFW ALLOW] IN= OUT=eno1 \
//!             SRC=123.45.67.89 DST=123.45.67.88 LEN=60 TOS=0x00 PREC=0x00 TTL=64 ID=24678 \
//!             DF PROTO=TCP SPT=37314 DPT=11211 WINDOW=29200 RES=0x00 SYN URGP=0";
//! let records = vec![parse_line(line).unwrap()];
//!
//! let config = FilterConfig::default().source_port(37314);
//! let filter = RecordFilter::new(&records, &config).unwrap();
//! assert_eq!(filter.iter().count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod parser;

pub use config::FilterConfig;
pub use error::{ConfigError, ParseError};
pub use filter::{filter_records, Criterion, RecordFilter};
pub use model::{Action, Flag, Record};
pub use parser::{parse_line, LineParser};
