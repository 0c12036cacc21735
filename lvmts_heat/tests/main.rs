use aok::{OK, Void};
use log::info;
use lvmts_base::{BASE, EMPTY_PENALTY, GRANULARITY, HISTORY_LEN, Lane};
use lvmts_heat::{
  Error, ExtentHistory, ExtentScore, ExtentTable, Key, Ranking, Recorded, rank, score, top,
};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

// 进程启动时间附近的绝对时间戳
const T0: u64 = 1_700_000_000;

fn es(le: u64, read: u32, write: u32) -> ExtentScore {
  ExtentScore { le, read, write }
}

#[test]
fn test_first_record_takes_front() {
  let mut h = ExtentHistory::default();
  assert!(h.is_empty());
  assert!(h.record(Lane::Read, T0));
  assert_eq!(h.reads[0], T0);
  assert!(h.reads[1..].iter().all(|&t| t == 0));
  // 写通道独立
  assert!(h.writes.iter().all(|&t| t == 0));
  assert!(!h.is_empty());
}

#[test]
fn test_bucket_coalescing() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Write, T0);
  // 桶内的访问被吸收，头部不更新
  assert!(!h.record(Lane::Write, T0 + 1));
  assert!(!h.record(Lane::Write, T0 + GRANULARITY));
  assert_eq!(h.writes[0], T0);
  assert_eq!(h.writes[1], 0);
}

#[test]
fn test_shift() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Read, T0);
  assert!(h.record(Lane::Read, T0 + GRANULARITY + 1));
  assert_eq!(h.reads[0], T0 + GRANULARITY + 1);
  assert_eq!(h.reads[1], T0);
  assert!(h.reads[2..].iter().all(|&t| t == 0));
}

#[test]
fn test_out_of_order_ignored() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Read, T0 + 10_000);
  assert!(!h.record(Lane::Read, T0));
  assert_eq!(h.reads[0], T0 + 10_000);
  assert_eq!(h.reads[1], 0);
}

#[test]
fn test_too_early_on_empty_lane() {
  // 空通道上时间戳不超过 GRANULARITY 不会记录
  let mut h = ExtentHistory::default();
  assert!(!h.record(Lane::Read, GRANULARITY));
  assert!(h.is_empty());
  assert!(h.record(Lane::Read, GRANULARITY + 1));
}

#[test]
fn test_ring_drops_oldest() {
  let mut h = ExtentHistory::default();
  let step = GRANULARITY + 1;
  for i in 0..(HISTORY_LEN as u64 + 5) {
    h.record(Lane::Read, T0 + i * step);
  }
  let last = T0 + (HISTORY_LEN as u64 + 4) * step;
  assert_eq!(h.reads[0], last);
  assert_eq!(h.reads[HISTORY_LEN - 1], last - (HISTORY_LEN as u64 - 1) * step);
  assert!(h.reads.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_display() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Read, 1000);
  h.record(Lane::Write, 2000);
  h.record(Lane::Read, 1400);
  assert_eq!(h.to_string(), "r: 1400, w: 2000, r: 1000, ");
}

#[test]
fn test_score_zero_history() {
  let h = ExtentHistory::default();
  assert_eq!(score(&h.reads, T0), 0);
  let s = h.scores(7, T0);
  assert_eq!(s, es(7, 0, 0));
  assert_eq!(s.combined(), 0);
}

#[test]
fn test_score_single_fresh_entry() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Read, T0);
  let expect = BASE - EMPTY_PENALTY * (HISTORY_LEN as u32 - 1);
  assert_eq!(score(&h.reads, T0), expect);
  // 每过一个桶扣 1 分
  assert_eq!(score(&h.reads, T0 + GRANULARITY), expect - 1);
  assert_eq!(score(&h.reads, T0 + 10 * GRANULARITY + 5), expect - 10);
  // 未来时间戳不扣分
  assert_eq!(score(&h.reads, T0 - 1000), expect);
}

#[test]
fn test_score_denser_is_higher() {
  let mut thin = ExtentHistory::default();
  let mut dense = ExtentHistory::default();
  thin.record(Lane::Write, T0 + 5000);
  for i in 0..5 {
    dense.record(Lane::Write, T0 + i * 1000);
  }
  let now = T0 + 6000;
  assert!(score(&dense.writes, now) > score(&thin.writes, now));
}

#[test]
fn test_score_saturates() {
  let mut h = ExtentHistory::default();
  h.record(Lane::Read, 301);
  // 足够旧的条目扣分超过上限，结果饱和为 0 而不是回绕
  let now = 301 + GRANULARITY * (u64::from(BASE) * 2);
  assert_eq!(score(&h.reads, now), 0);
  assert_eq!(score(&h.reads, u64::MAX), 0);
}

#[test]
fn test_table_growth() -> Void {
  let mut t = ExtentTable::new(4, 100)?;
  assert_eq!(t.len(), 4);
  t.record(2, Lane::Read, T0)?;
  let before = *t.get(2).unwrap();

  assert!(!t.ensure_capacity(3)?);
  assert!(t.ensure_capacity(4)?);
  assert_eq!(t.len(), 104);
  assert_eq!(
    t.record(500, Lane::Write, T0)?,
    Recorded {
      grew: true,
      opened: true
    }
  );
  assert_eq!(t.len(), 600);
  // 同一桶内再次访问：不扩容也不开新桶
  assert_eq!(t.record(500, Lane::Write, T0 + 1)?, Recorded::default());
  let r = t.record(550, Lane::Read, T0)?;
  assert!(!r.grew && r.opened);

  // 扩容不改变已有数据
  assert_eq!(*t.get(2).unwrap(), before);
  assert!(t.get(599).unwrap().is_empty());
  assert!(t.get(600).is_none());
  assert_eq!(t.get(500).unwrap().writes[0], T0);
  info!("table len {}", t.len());
  OK
}

#[test]
fn test_table_index_overflow() -> Void {
  let mut t = ExtentTable::new(0, 100)?;
  assert!(t.is_empty());
  let r = t.ensure_capacity(u64::MAX);
  assert!(matches!(r, Err(Error::Index(_)) | Err(Error::Oom { .. })));
  assert!(t.is_empty());
  OK
}

#[test]
fn test_table_scores() -> Void {
  let mut t = ExtentTable::new(8, 10)?;
  t.record(1, Lane::Read, T0)?;
  t.record(3, Lane::Write, T0)?;
  let scores = t.scores(T0);
  assert_eq!(scores.len(), 8);
  assert!(scores[1].read > 0 && scores[1].write == 0);
  assert!(scores[3].write > 0 && scores[3].read == 0);
  assert!(scores.iter().enumerate().all(|(i, s)| s.le == i as u64));
  assert_eq!(t.iter().filter(|(_, h)| !h.is_empty()).count(), 2);
  OK
}

#[test]
fn test_rank_orders() {
  let mut v = vec![es(0, 5, 0), es(1, 1, 9), es(2, 0, 3), es(3, 0, 0)];
  rank(&mut v, Key::Combined);
  assert_eq!(v.iter().map(|s| s.le).collect::<Vec<_>>(), [1, 0, 2, 3]);
  rank(&mut v, Key::Read);
  assert_eq!(v[0].le, 0);
  assert_eq!(v[1].le, 1);
  rank(&mut v, Key::Write);
  assert_eq!(v[0].le, 1);
  assert_eq!(v[1].le, 2);
}

#[test]
fn test_top_truncation() {
  let mut v = vec![es(0, 5, 0), es(1, 1, 9), es(2, 0, 3), es(3, 0, 0), es(4, 0, 0)];
  rank(&mut v, Key::Combined);
  // 少于 k 个非零项时只返回非零项
  assert_eq!(top(&v, Key::Combined, 200).len(), 3);
  assert_eq!(top(&v, Key::Combined, 2).len(), 2);
  assert_eq!(top(&v, Key::Combined, 0).len(), 0);
  rank(&mut v, Key::Read);
  assert_eq!(top(&v, Key::Read, 200).len(), 2);
  assert!(top(&[], Key::Write, 10).is_empty());
}

#[test]
fn test_ranking() {
  let scores = vec![es(0, 0, 0), es(1, 10, 0), es(2, 0, 20), es(3, 7, 7)];
  let r = Ranking::new(scores);
  let les = |k| r.get(k).iter().map(|s| s.le).collect::<Vec<_>>();
  assert_eq!(les(Key::Combined), [2, 3, 1]);
  assert_eq!(les(Key::Read), [1, 3]);
  assert_eq!(les(Key::Write), [2, 3]);
  assert!(r.combined.iter().all(|s| s.combined() > 0));
}

#[test]
fn test_ranking_keeps_tail_past_k() {
  // 排名不按 K 截断，只去掉 0 分
  let scores: Vec<_> = (0..300).map(|i| es(i, (i % 7) as u32, 0)).collect();
  let r = Ranking::new(scores);
  assert_eq!(r.read.len(), 300 - 300 / 7 - 1);
  assert!(r.read.windows(2).all(|w| w[0].read >= w[1].read));
  assert!(r.write.is_empty());
}
