// lidly-api: Async Rust client for the Lidl Plus loyalty API (coupons v2 + promotions v1)

pub mod auth;
pub mod client;
pub mod coupons;
pub mod error;
pub mod promotions;
pub mod transport;
pub mod types;

pub use client::{ApiClient, Credentials, Endpoints};
pub use coupons::{Coupon, CouponBatch, CouponSection};
pub use error::Error;
pub use promotions::{Promotion, PromotionBatch, PromotionSection};
pub use transport::TransportConfig;
pub use types::{AccessToken, Validity};
