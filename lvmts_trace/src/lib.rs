#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lvmts_trace - Block trace records
//! 块设备跟踪记录
//!
//! Parses blkparse text output and exposes it as a pull-based record
//! stream, either from a spawned `btrace` or from any reader.
//! 解析 blkparse 文本输出，提供来自 `btrace` 子进程或任意读取器的拉取式记录流。

mod btrace;
pub mod error;
mod record;
mod source;

pub use btrace::{BTRACE, Btrace};
pub use error::{Error, Result};
pub use record::{Action, Record};
pub use source::{LineSource, MAX_LINE, RecordSource};
