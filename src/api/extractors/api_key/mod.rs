/*!
 * API key extractor
 *
 * Responsibility:
 * - middleware が検証済みの ApiKey を handler に提供する
 * - axum 依存は core に閉じ込める
 *
 * Public API:
 * - ApiKeyExtractor
 */

mod core;

pub use self::core::ApiKeyExtractor;
