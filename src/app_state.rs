//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::{AuthService, JwtKeys};
use crate::config::AppConfig;
use crate::gateway::{PaymentGateway, RazorpayClient};
use crate::services::admin::AdminService;
use crate::services::capability::CapabilityService;
use crate::services::payment::PaymentService;
use crate::services::profile::ProfileService;
use crate::services::property::PropertyService;
use crate::services::subscription::SubscriptionService;
use crate::storage::MediaStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub capability_service: Arc<CapabilityService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub payment_service: Arc<PaymentService>,
    pub property_service: Arc<PropertyService>,
    pub profile_service: Arc<ProfileService>,
    pub admin_service: Arc<AdminService>,
    pub media_store: Arc<MediaStore>,
}

impl AppState {
    pub fn build(pool: PgPool, config: &AppConfig) -> Result<Self> {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayClient::new(
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        ));
        Self::with_gateway(pool, config, gateway)
    }

    /// Assemble state with an explicit gateway, so tests can substitute one
    pub fn with_gateway(
        pool: PgPool,
        config: &AppConfig,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self> {
        let subscription_service = Arc::new(SubscriptionService::new(pool.clone()));

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                pool.clone(),
                JwtKeys::new(&config.jwt_secret),
            )),
            capability_service: Arc::new(CapabilityService::new(pool.clone())),
            payment_service: Arc::new(PaymentService::new(
                pool.clone(),
                gateway,
                subscription_service.clone(),
            )),
            subscription_service,
            property_service: Arc::new(PropertyService::new(pool.clone())),
            profile_service: Arc::new(ProfileService::new(pool.clone())),
            admin_service: Arc::new(AdminService::new(pool)),
            media_store: Arc::new(MediaStore::new(&config.media_root)?),
        })
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}
