use std::sync::Arc;

use crate::gateway::PaymentGateway;
use crate::services::token_service::TokenService;
use crate::store::Stores;

/// Everything a handler needs, injected once through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub tokens: Arc<TokenService>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub currency: String,
}
