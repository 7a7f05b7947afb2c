//! IdGenerator port - キー用トークン生成の抽象化
//!
//! `KeyStrategy::Unique` のとき、同一秒・同一商品の書き込みが
//! 上書きし合わないようにキーへ ULID を挟みます。

use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はキーに埋め込むトークンを生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数リクエストから同時に使われる）
pub trait IdGenerator: Send + Sync {
    fn generate_token(&self) -> Ulid;
}

/// UlidGenerator は Clock を使って時刻ベースの ULID を生成します。
///
/// テスト時に FixedClock を渡すと timestamp 部分が固定されます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_token(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}
