/*
 * Responsibility
 * - handler から使う extractor の公開
 */
pub mod extractors;
