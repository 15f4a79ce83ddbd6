/*
 * Responsibility
 * - HTTP に依存しないドメインロジック (header parsing など)
 */
pub mod auth;
