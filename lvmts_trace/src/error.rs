//! Trace errors / 跟踪错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("IO: {0}")]
  Io(#[from] std::io::Error),

  #[error("can't invoke {cmd}: {source} / 无法启动跟踪工具")]
  Spawn {
    cmd: String,
    source: std::io::Error,
  },
}

pub type Result<T> = std::result::Result<T, Error>;
