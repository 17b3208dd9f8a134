//! Shared fixtures for unit and HTTP tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::gateway::{GatewayError, PaymentGateway, PaymentIntent};
use crate::services::token_service::{IdentityRequest, TokenService};
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::Stores;

pub const TEST_SECRET: &str = "test-access-token-secret";

type IntentCall = (i64, String, Vec<String>);

/// Gateway double that records every intent request.
#[derive(Default)]
pub struct StubGateway {
    calls: Mutex<Vec<IntentCall>>,
}

impl StubGateway {
    pub fn requests(&self) -> Vec<IntentCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_payment_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        method_types: &[&str],
    ) -> Result<PaymentIntent, GatewayError> {
        self.calls.lock().unwrap().push((
            amount_minor_units,
            currency.to_string(),
            method_types.iter().map(|m| m.to_string()).collect(),
        ));
        Ok(PaymentIntent {
            id: format!("pi_test_{}", amount_minor_units),
            client_secret: format!("pi_test_secret_{}", amount_minor_units),
        })
    }
}

/// App state over a fresh in-memory store and a stub gateway.
pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        stores: Stores::memory(store.clone()),
        tokens: Arc::new(TokenService::new(Some(TEST_SECRET))),
        gateway: Arc::new(StubGateway::default()),
        currency: "usd".to_string(),
    };
    (state, store)
}

/// `Authorization` header value for a token issued to `email`.
pub fn bearer(state: &AppState, email: &str) -> String {
    let identity = IdentityRequest {
        email: email.to_string(),
        name: None,
    };
    let token = state.tokens.issue(&identity).unwrap();
    format!("Bearer {}", token)
}
