use std::sync::Arc;

use async_trait::async_trait;

use super::errors::GatewayError;
use super::order::{OrderDraft, OrderReceipt, OrderSnapshot};

/// The remote order-creation interface the checkout flow depends on.
///
/// Any non-success outcome is reported through [`GatewayError`]; the flow
/// does not distinguish transports beyond that taxonomy.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError>;

    async fn fetch_order(&self, id: &str) -> Result<Option<OrderSnapshot>, GatewayError>;
}

#[async_trait]
impl<G: OrderGateway> OrderGateway for Arc<G> {
    async fn create_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError> {
        self.as_ref().create_order(draft).await
    }

    async fn fetch_order(&self, id: &str) -> Result<Option<OrderSnapshot>, GatewayError> {
        self.as_ref().fetch_order(id).await
    }
}
