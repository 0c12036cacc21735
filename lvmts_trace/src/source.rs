//! Record sources
//! 记录源

use std::io::{BufRead, Read};

use log::trace;

use crate::{Record, Result};

/// Pull-based stream of trace records
/// 拉取式跟踪记录流
pub trait RecordSource {
  /// Next record, Ok(None) at end of input
  /// 下一条记录，输入结束时返回 Ok(None)
  fn next_record(&mut self) -> Result<Option<Record>>;

  /// Lines dropped as malformed so far
  /// 至今因格式错误丢弃的行数
  fn skipped(&self) -> u64 {
    0
  }
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
  #[inline]
  fn next_record(&mut self) -> Result<Option<Record>> {
    (**self).next_record()
  }

  #[inline]
  fn skipped(&self) -> u64 {
    (**self).skipped()
  }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
  #[inline]
  fn next_record(&mut self) -> Result<Option<Record>> {
    (**self).next_record()
  }

  #[inline]
  fn skipped(&self) -> u64 {
    (**self).skipped()
  }
}

/// Longest accepted line in bytes, excluding the newline
/// 可接受的最长行字节数（不含换行符）
pub const MAX_LINE: usize = 8191;

/// Records parsed from any line-oriented reader
/// 从任意按行读取器解析记录
pub struct LineSource<R> {
  reader: R,
  buf: Vec<u8>,
  skipped: u64,
}

impl<R: BufRead> LineSource<R> {
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      buf: Vec::with_capacity(256),
      skipped: 0,
    }
  }
}

impl<R: BufRead> RecordSource for LineSource<R> {
  fn next_record(&mut self) -> Result<Option<Record>> {
    loop {
      self.buf.clear();
      let n = (&mut self.reader)
        .take(MAX_LINE as u64 + 1)
        .read_until(b'\n', &mut self.buf)?;
      if n == 0 {
        return Ok(None);
      }
      if n > MAX_LINE && self.buf.last() != Some(&b'\n') {
        // Drop the rest of an oversized line
        // 丢弃超长行的剩余部分
        let rest = self.reader.skip_until(b'\n')?;
        self.skipped += 1;
        trace!("skip: line over {MAX_LINE} bytes (+{rest})");
        continue;
      }
      let parsed = std::str::from_utf8(&self.buf).ok().and_then(Record::parse);
      match parsed {
        Some(r) => return Ok(Some(r)),
        None => {
          self.skipped += 1;
          trace!("skip: {}", String::from_utf8_lossy(&self.buf).trim_end());
        }
      }
    }
  }

  #[inline]
  fn skipped(&self) -> u64 {
    self.skipped
  }
}
