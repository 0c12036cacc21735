//! Heat errors / 热度错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("out of memory growing extent table to {want} entries / 扩容区段表内存不足")]
  Oom { want: usize },

  #[error("extent index {0} out of addressable range")]
  Index(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
