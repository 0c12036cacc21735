#![cfg_attr(docsrs, feature(doc_cfg))]

//! Shared constants and types for extent heat tracking
//! 区段热度跟踪的公共常量与类型

mod consts;
mod types;

pub use consts::{
  BASE, DEFAULT_TOP, EMPTY_PENALTY, GRANULARITY, HISTORY_LEN, INIT_EXTENTS, PER_LINE,
  REPORT_EVERY, SLACK,
};
pub use types::{Lane, Le, Sec, now_sec};
