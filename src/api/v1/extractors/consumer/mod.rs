/*!
 * Gateway consumer extractor
 *
 * Responsibility:
 * - APISIX が注入した trusted header から呼び出し元 (Consumer) を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Consumer
 */

mod core;
mod types;

pub use types::Consumer;
