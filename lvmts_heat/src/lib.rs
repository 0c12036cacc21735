#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lvmts_heat - Extent heat tracking
//! 区段热度跟踪
//!
//! Bounded per-extent access history coalesced into 5 minute buckets,
//! a decay score computed fresh at report time, and top-k ranking.
//! 每个区段保存有界的访问历史（按 5 分钟分桶），报告时实时计算衰减分数并排名。
//!
//! | Lane slots | Bucket | Window     |
//! |------------|--------|------------|
//! | 20         | 300 s  | ~100 min   |

pub mod error;
mod history;
mod rank;
mod score;
mod table;

pub use error::{Error, Result};
pub use history::{ExtentHistory, Slots};
pub use rank::{Key, Ranking, rank, top};
pub use score::{ExtentScore, score};
pub use table::{ExtentTable, Recorded};
