#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lvmtsd - Hot extent tracking for LVM
//! LVM 热点区段跟踪
//!
//! Consumes block trace completion events for one logical volume, keeps a
//! bounded access history per logical extent and periodically prints the
//! physical extents with the highest recency weighted activity.
//! 消费逻辑卷的块跟踪完成事件，为每个逻辑区段保存有界访问历史，
//! 并定期输出按时间加权活跃度最高的物理区段。

mod conf;
mod dev;
pub mod error;
mod ingest;
pub mod report;

pub use conf::Conf;
pub use dev::DevPath;
pub use error::{Error, Result};
pub use ingest::{Ingest, State, Stats, extent_index};
pub use report::Report;
