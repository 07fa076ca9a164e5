use std::{collections::BTreeMap, fmt::Debug};

use checkout_common::Rupees;
use log::*;

use crate::{
    checkout_api::OrderFlowError,
    db_types::{FulfillmentStatus, LineItem, NewOrder, Order, OrderId, PaymentClaim, PaymentType},
    helpers::split_cart_key,
    traits::{CheckoutDatabase, GatewayIntent, PaymentGateway},
};

/// The fixed surcharge applied to every order subtotal, floored to whole rupees.
pub const SURCHARGE_PERCENT: i64 = 2;

/// `OrderFlowApi` is the primary API for turning a buyer's cart into a priced, stock-validated
/// order and for verifying payment confirmations against the gateway.
///
/// The flow for every placement is: cart snapshot → pricing & stock validation → ledger insert.
/// Online orders additionally get a gateway intent before the insert, and only become paid via
/// [`Self::verify_payment`].
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: CheckoutDatabase,
    G: PaymentGateway,
{
    /// Place a cash-on-delivery order from the buyer's current cart.
    ///
    /// On success the order is persisted as `Placed`/unpaid and the cart is cleared immediately,
    /// since no further confirmation step exists for COD.
    pub async fn place_cod_order(&self, buyer_id: &str, address_id: &str) -> Result<Order, OrderFlowError> {
        let new_order = self.build_order(buyer_id, address_id, PaymentType::Cod).await?;
        let order = self.db.insert_order(new_order).await?;
        self.db.clear_cart(buyer_id).await?;
        info!("🛒️ COD order {} placed for buyer {buyer_id}. Total: {}", order.id, order.amount);
        Ok(order)
    }

    /// Create an online-payment order and its gateway intent.
    ///
    /// The gateway intent is created first, sized to the computed total; the local order is then
    /// persisted unpaid, carrying the gateway's order reference. The buyer's cart is *not*
    /// cleared here; that happens only when [`Self::verify_payment`] commits the paid state.
    pub async fn create_online_order(
        &self,
        buyer_id: &str,
        address_id: &str,
    ) -> Result<(Order, GatewayIntent), OrderFlowError> {
        let draft = self.build_order(buyer_id, address_id, PaymentType::Online).await?;
        let intent = self.gateway.create_intent(&draft.order_id, draft.amount).await?;
        let draft = draft.with_gateway_order_id(intent.gateway_order_id.clone());
        let order = self.db.insert_order(draft).await?;
        info!(
            "🛒️ Online order {} created for buyer {buyer_id}. Total: {}. Gateway ref: {}",
            order.id, order.amount, intent.gateway_order_id
        );
        Ok((order, intent))
    }

    /// Run the payment verifier over a claimed confirmation.
    ///
    /// Five gates, in strict order, each a hard failure with no state change:
    /// 1. the local order must exist,
    /// 2. it must not already be paid,
    /// 3. its stored gateway order reference must match the claim,
    /// 4. the claim's signature must verify against the shared secret,
    /// 5. the independently re-fetched gateway order and payment must carry the right amount and
    ///    a captured/authorized status.
    ///
    /// Gates 4 and 5 live in the gateway implementation. Only after all gates pass is `paid`
    /// flipped (a conditional update keyed on `paid = false`, so a racing duplicate
    /// confirmation loses) and the buyer's cart cleared.
    pub async fn verify_payment(&self, claim: &PaymentClaim) -> Result<Order, OrderFlowError> {
        let order = self
            .db
            .fetch_order_by_id(&claim.order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(claim.order_id.clone()))?;
        if order.paid {
            debug!("💰️ Rejecting repeat confirmation for order {}", order.id);
            return Err(OrderFlowError::AlreadyPaid(order.id));
        }
        if let Some(stored) = &order.gateway_order_id {
            if stored != &claim.gateway_order_id {
                warn!(
                    "💰️ Gateway order mismatch for order {}: stored {stored}, claimed {}",
                    order.id, claim.gateway_order_id
                );
                return Err(OrderFlowError::GatewayOrderMismatch);
            }
        }
        let record = self.gateway.verify_callback(&order, claim).await?;
        let paid_order = self.db.mark_order_paid(&order.id, record).await?;
        self.db.clear_cart(&order.buyer_id).await?;
        info!("💰️ Payment verified for order {}. {} marked as paid.", paid_order.id, paid_order.amount);
        Ok(paid_order)
    }

    /// The buyer's own orders: COD and paid-online only.
    pub async fn orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, OrderFlowError> {
        Ok(self.db.fetch_orders_for_buyer(buyer_id).await?)
    }

    /// All orders, for seller views: COD and paid-online only.
    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        Ok(self.db.fetch_all_orders().await?)
    }

    /// Apply a seller-driven fulfillment transition.
    ///
    /// The transition must be allowed by [`FulfillmentStatus::can_transition_to`]; anything else
    /// fails with [`OrderFlowError::InvalidStatusTransition`] and leaves the order untouched.
    pub async fn update_status(&self, id: &OrderId, status: FulfillmentStatus) -> Result<Order, OrderFlowError> {
        let order =
            self.db.fetch_order_by_id(id).await?.ok_or_else(|| OrderFlowError::OrderNotFound(id.clone()))?;
        if !order.status.can_transition_to(status) {
            return Err(OrderFlowError::InvalidStatusTransition { from: order.status, to: status });
        }
        let order = self.db.update_order_status(id, status).await?;
        info!("📦️ Order {} moved to {status}", order.id);
        Ok(order)
    }

    /// Cart snapshot resolution plus pricing & stock validation.
    ///
    /// Quantities are re-read from the authoritative cart map for every line; any client-declared
    /// line list never reaches this function. Validation fails fast on the first invalid line and
    /// nothing is persisted here.
    async fn build_order(
        &self,
        buyer_id: &str,
        address_id: &str,
        payment_type: PaymentType,
    ) -> Result<NewOrder, OrderFlowError> {
        let cart = self.db.fetch_cart(buyer_id).await?;
        if cart.is_empty() {
            return Err(OrderFlowError::EmptyCart);
        }
        if !self.db.address_belongs_to(address_id, buyer_id).await? {
            return Err(OrderFlowError::InvalidAddress);
        }
        let cart_map: BTreeMap<&str, i64> = cart.iter().map(|e| (e.key.as_str(), e.quantity)).collect();
        let mut items = Vec::with_capacity(cart.len());
        let mut subtotal = Rupees::default();
        for entry in &cart {
            let (product_id, variant) = split_cart_key(&entry.key);
            // Quantities always come from the cart map, never from a caller-supplied line. The
            // lookup is a deliberate guard even though the map is built from this same cart read.
            let quantity =
                *cart_map.get(entry.key.as_str()).ok_or_else(|| OrderFlowError::ItemNotInCart(entry.key.clone()))?;
            if quantity <= 0 {
                return Err(OrderFlowError::InvalidQuantity(entry.key.clone()));
            }
            let product = self
                .db
                .fetch_product(product_id)
                .await?
                .ok_or_else(|| OrderFlowError::ProductNotFound(product_id.to_string()))?;
            let unit_price = match variant {
                Some(weight) if !product.variants.is_empty() => {
                    let v = product.variant(weight).ok_or_else(|| OrderFlowError::VariantNotFound {
                        product: product.name.clone(),
                        variant: weight.to_string(),
                    })?;
                    if v.stock < quantity {
                        return Err(OrderFlowError::InsufficientStock {
                            product: product.name.clone(),
                            variant: weight.to_string(),
                        });
                    }
                    v.offer_price
                },
                _ => {
                    if !product.in_stock {
                        return Err(OrderFlowError::OutOfStock { product: product.name.clone() });
                    }
                    product.offer_price
                },
            };
            subtotal += unit_price * quantity;
            items.push(LineItem {
                product_id: product_id.to_string(),
                quantity,
                variant: variant.map(String::from),
                unit_price,
            });
        }
        let amount = subtotal + subtotal.percent(SURCHARGE_PERCENT);
        trace!("🛒️ Priced {} lines for buyer {buyer_id}: subtotal {subtotal}, total {amount}", items.len());
        Ok(NewOrder::new(buyer_id.to_string(), items, amount, address_id.to_string(), payment_type))
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
