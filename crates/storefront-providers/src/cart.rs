use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_types::{
    AddToCartRequest, Cart, CartLine, CartLineInput, Money, ProductAnalytics, MAX_LINE_QUANTITY,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::CartError;

/// Carts kept before the least recently modified one is evicted.
pub const DEFAULT_MAX_CARTS: usize = 10_000;
/// Carts untouched for this long are removed by [`CartStore::prune_idle`].
pub const DEFAULT_CART_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone)]
struct StoredCart {
    cart: Cart,
    touched: Instant,
}

/// In-memory carts keyed by cart session id.
#[derive(Clone)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<String, StoredCart>>>,
    max_carts: usize,
    max_idle: Duration,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_CARTS, DEFAULT_CART_IDLE)
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(maxCarts: usize, maxIdle: Duration) -> Self {
        Self {
            carts: Arc::new(RwLock::new(HashMap::new())),
            max_carts: maxCarts.max(1),
            max_idle: maxIdle,
        }
    }

    pub async fn get(&self, cartId: &str) -> Cart {
        self.carts
            .read()
            .await
            .get(cartId)
            .map(|stored| stored.cart.clone())
            .unwrap_or_else(|| Cart::new(cartId))
    }

    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }

    /// Drops carts not modified within the idle window. Returns how many went.
    pub async fn prune_idle(&self) -> usize {
        self.prune_idle_at(Instant::now()).await
    }

    async fn prune_idle_at(&self, now: Instant) -> usize {
        let mut carts = self.carts.write().await;
        let before = carts.len();
        carts.retain(|_, stored| now.saturating_duration_since(stored.touched) < self.max_idle);
        let removed = before - carts.len();
        if removed > 0 {
            debug!(removed, remaining = carts.len(), "pruned idle carts");
        }
        removed
    }

    /// Adds every line of `request` or none of them.
    pub async fn add_lines(
        &self,
        cartId: &str,
        request: &AddToCartRequest,
        catalog: &Catalog,
    ) -> Result<Cart, CartError> {
        if request.lines.is_empty() {
            return Err(CartError::EmptyRequest);
        }

        let updated = {
            let mut carts = self.carts.write().await;
            let mut cart = carts
                .get(cartId)
                .map(|stored| stored.cart.clone())
                .unwrap_or_else(|| Cart::new(cartId));
            for input in &request.lines {
                apply_line(&mut cart, input, catalog)?;
            }
            if !carts.contains_key(cartId) && carts.len() >= self.max_carts {
                evict_oldest(&mut carts);
            }
            let stored = StoredCart {
                cart: cart.clone(),
                touched: Instant::now(),
            };
            carts.insert(cartId.to_string(), stored);
            cart
        };

        for (product, catalogPrice) in verified_analytics(request, catalog) {
            info!(
                target: "storefront::analytics",
                event = "add_to_cart",
                product_gid = %product.product_gid,
                variant_gid = %product.variant_gid,
                name = %product.name,
                variant_name = %product.variant_name,
                brand = %product.brand,
                price = %product.price,
                catalog_price = %catalogPrice.amount,
                price_matches = product.price == catalogPrice.amount,
                quantity = product.quantity,
            );
        }

        info!(
            cart_id = %cartId,
            lines = request.lines.len(),
            total_quantity = updated.total_quantity(),
            "added lines to cart"
        );
        Ok(updated)
    }
}

fn evict_oldest(carts: &mut HashMap<String, StoredCart>) {
    let oldest = carts
        .iter()
        .min_by_key(|(_, stored)| stored.touched)
        .map(|(id, _)| id.clone());
    if let Some(id) = oldest {
        debug!(cart_id = %id, "evicted least recently modified cart");
        carts.remove(&id);
    }
}

/// Client-sent analytics entries that name a requested line, paired with the
/// catalog price of that variant. Entries for anything else are dropped.
fn verified_analytics<'a>(
    request: &'a AddToCartRequest,
    catalog: &'a Catalog,
) -> Vec<(&'a ProductAnalytics, &'a Money)> {
    let Some(analytics) = &request.analytics else {
        return Vec::new();
    };
    analytics
        .products
        .iter()
        .filter(|p| request.lines.iter().any(|l| l.merchandise_id == p.variant_gid))
        .filter_map(|p| catalog.merchandise(&p.variant_gid).map(|(_, v)| (p, &v.price)))
        .collect()
}

fn apply_line(cart: &mut Cart, input: &CartLineInput, catalog: &Catalog) -> Result<(), CartError> {
    let invalidQuantity = |quantity: u32| CartError::InvalidQuantity {
        merchandise_id: input.merchandise_id.clone(),
        quantity,
        max: MAX_LINE_QUANTITY,
    };

    if input.quantity == 0 || input.quantity > MAX_LINE_QUANTITY {
        return Err(invalidQuantity(input.quantity));
    }

    let (product, variant) = catalog
        .merchandise(&input.merchandise_id)
        .ok_or_else(|| CartError::UnknownMerchandise(input.merchandise_id.clone()))?;

    if let Some(cartCurrency) = cart.currency_code() {
        if cartCurrency != variant.price.currency_code {
            return Err(CartError::CurrencyMismatch {
                merchandise_id: input.merchandise_id.clone(),
                cart_currency: cartCurrency.to_string(),
                line_currency: variant.price.currency_code.clone(),
            });
        }
    }

    match cart.line_mut(&input.merchandise_id) {
        Some(line) => {
            let total = line.quantity.saturating_add(input.quantity);
            if total > MAX_LINE_QUANTITY {
                return Err(invalidQuantity(total));
            }
            line.quantity = total;
        }
        None => cart.lines.push(CartLine {
            merchandise_id: variant.id.clone(),
            product_handle: product.handle.clone(),
            product_title: product.title.clone(),
            variant_title: variant.title.clone(),
            quantity: input.quantity,
            price: variant.price.clone(),
        }),
    }

    Ok(())
}
