//! Rate limiting middleware using token bucket algorithm.
//!
//! Both limiters are generic over the client key so the router can pick
//! [`PeerIpKeyExtractor`] for direct exposure or [`SmartIpKeyExtractor`]
//! behind a trusted reverse proxy.
//!
//! [`PeerIpKeyExtractor`]: tower_governor::key_extractor::PeerIpKeyExtractor
//! [`SmartIpKeyExtractor`]: tower_governor::key_extractor::SmartIpKeyExtractor

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor};

/// Creates the rate limiter shared by all pages.
///
/// # Limits
///
/// - **Replenish**: one request every 2 seconds
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer<K: KeyExtractor>(
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(2)
            .burst_size(100)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates the stricter limiter for `POST /login`.
///
/// # Limits
///
/// - **Replenish**: one request every 2 seconds
/// - **Burst**: 20 requests
///
/// Bounds password guessing from a single client without throttling page views.
///
/// # Example
///
/// ```rust,ignore
/// let submit = post(login_submit).layer(rate_limit::login_layer(PeerIpKeyExtractor));
/// ```
pub fn login_layer<K: KeyExtractor>(
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(2)
            .burst_size(20)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
