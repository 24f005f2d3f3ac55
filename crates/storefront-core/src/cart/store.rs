//! Cart store with write-through persistence.

use std::collections::HashSet;

use storefront_cache::{Cache, KeyValueStore};

use crate::cart::{CartLine, CartTotals};
use crate::catalog::Product;
use crate::error::StorefrontError;
use crate::ids::ProductId;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// What a cart mutation did, for user-facing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A unit was added; `quantity` is the line's new quantity.
    Added { name: String, quantity: u32 },
    /// A line's quantity was set to a new positive value.
    QuantityChanged { name: String, quantity: u32 },
    /// A line was removed.
    Removed { name: String },
    /// Nothing matched; the cart is unchanged.
    Unchanged,
}

impl CartEvent {
    /// Notification text, for the events that raise one.
    pub fn notification(&self) -> Option<String> {
        match self {
            CartEvent::Added { name, .. } => Some(format!("{} added to cart!", name)),
            CartEvent::Removed { name } => Some(format!("{} removed from cart!", name)),
            CartEvent::QuantityChanged { .. } | CartEvent::Unchanged => None,
        }
    }
}

/// Holds cart lines and writes them through to durable storage.
///
/// Invariants: at most one line per product id, and every line's quantity
/// is at least 1. Every mutation persists the full cart before returning.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create an empty cart persisted under [`CART_STORAGE_KEY`].
    ///
    /// Does not read storage; call [`load_persisted`](Self::load_persisted)
    /// at startup.
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Create an empty cart persisted under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Absent or malformed data leaves the cart empty. Never fails.
    pub fn load_persisted(&mut self) {
        self.lines = match self.read_persisted() {
            Ok(Some(lines)) => {
                tracing::debug!(lines = lines.len(), "loaded persisted cart");
                lines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "ignoring unreadable persisted cart");
                Vec::new()
            }
        };
    }

    /// Add one unit of `product`, creating the line if needed.
    pub fn add_item(&mut self, product: &Product) -> CartEvent {
        let event = match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                CartEvent::Added {
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                }
            }
            None => {
                self.lines.push(CartLine::new(product.clone()));
                CartEvent::Added {
                    name: product.name.clone(),
                    quantity: 1,
                }
            }
        };
        self.persist();
        event
    }

    /// Remove the line for `id`. Removing a missing line is a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> CartEvent {
        let event = match self.position(id) {
            Some(index) => {
                let line = self.lines.remove(index);
                CartEvent::Removed {
                    name: line.product.name,
                }
            }
            None => CartEvent::Unchanged,
        };
        self.persist();
        event
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. A missing line is not
    /// created.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> CartEvent {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let event = match self.lines.iter_mut().find(|l| &l.product.id == id) {
            Some(line) => {
                line.quantity = quantity;
                CartEvent::QuantityChanged {
                    name: line.product.name.clone(),
                    quantity,
                }
            }
            None => CartEvent::Unchanged,
        };
        self.persist();
        event
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for `id`.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Item count and total price, recomputed on every call.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_lines(&self.lines)
    }

    /// Borrow the backing store.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product.id == id)
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.lines) {
            tracing::warn!(error = %e, key = %self.key, "failed to persist cart");
        }
    }

    fn read_persisted(&self) -> Result<Option<Vec<CartLine>>, StorefrontError> {
        let Some(lines) = self.cache.get::<Vec<CartLine>>(&self.key)? else {
            return Ok(None);
        };

        let mut seen = HashSet::new();
        for line in &lines {
            if line.quantity == 0 {
                return Err(StorefrontError::InvalidPersistedCart(format!(
                    "zero quantity for {}",
                    line.product.id
                )));
            }
            if !seen.insert(&line.product.id) {
                return Err(StorefrontError::InvalidPersistedCart(format!(
                    "duplicate line for {}",
                    line.product.id
                )));
            }
        }
        Ok(Some(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use storefront_cache::{CacheError, MemoryStore};

    fn stored_json(cart: &CartStore<MemoryStore>) -> serde_json::Value {
        let bytes = cart.storage().get(CART_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_add_same_product_accumulates() {
        let mut cart = CartStore::new(MemoryStore::new());
        let p1 = product("1", "Apple iPhone13", "100", 1);

        for _ in 0..5 {
            cart.add_item(&p1);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&p1.id).map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_add_reports_notification() {
        let mut cart = CartStore::new(MemoryStore::new());
        let p1 = product("1", "Apple iPhone13", "100", 1);

        let event = cart.add_item(&p1);
        assert_eq!(
            event,
            CartEvent::Added {
                name: "Apple iPhone13".to_string(),
                quantity: 1
            }
        );
        assert_eq!(
            event.notification().as_deref(),
            Some("Apple iPhone13 added to cart!")
        );
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(&product("2", "B two", "1", 1));
        cart.add_item(&product("1", "A one", "1", 1));
        cart.add_item(&product("2", "B two", "1", 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let p1 = product("1", "Apple iPhone13", "100", 1);
        let p2 = product("2", "Samsung Galaxy", "50", 2);

        let mut via_set = CartStore::new(MemoryStore::new());
        let mut via_remove = CartStore::new(MemoryStore::new());
        for cart in [&mut via_set, &mut via_remove] {
            cart.add_item(&p1);
            cart.add_item(&p2);
            cart.add_item(&p1);
        }

        let set_event = via_set.set_quantity(&p1.id, 0);
        let remove_event = via_remove.remove_item(&p1.id);

        assert_eq!(set_event, remove_event);
        assert_eq!(via_set.lines(), via_remove.lines());
        assert_eq!(stored_json(&via_set), stored_json(&via_remove));
        assert_eq!(
            set_event.notification().as_deref(),
            Some("Apple iPhone13 removed from cart!")
        );
    }

    #[test]
    fn test_set_negative_quantity_removes() {
        let p1 = product("1", "Apple iPhone13", "100", 1);
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(&p1);

        cart.set_quantity(&p1.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_existing_only() {
        let p1 = product("1", "Apple iPhone13", "100", 1);
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(&p1);

        let event = cart.set_quantity(&p1.id, 4);
        assert_eq!(
            event,
            CartEvent::QuantityChanged {
                name: "Apple iPhone13".to_string(),
                quantity: 4
            }
        );
        assert!(event.notification().is_none());

        let missing = cart.set_quantity(&ProductId::new("nope"), 2);
        assert_eq!(missing, CartEvent::Unchanged);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.totals().item_count, 4);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add_item(&product("1", "Apple iPhone13", "100", 1));

        assert_eq!(cart.remove_item(&ProductId::new("2")), CartEvent::Unchanged);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_add_add_zero_leaves_empty_persisted_array() {
        let p1 = product("1", "Apple iPhone13", "100", 1);
        let mut cart = CartStore::new(MemoryStore::new());

        cart.add_item(&p1);
        cart.add_item(&p1);
        cart.set_quantity(&p1.id, 0);

        assert!(cart.is_empty());
        assert_eq!(stored_json(&cart), serde_json::json!([]));
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let p1 = product("1", "Apple iPhone13", "100", 1);
        let mut cart = CartStore::new(MemoryStore::new());

        cart.add_item(&p1);
        assert_eq!(stored_json(&cart)[0]["quantity"], 1);

        cart.add_item(&p1);
        assert_eq!(stored_json(&cart)[0]["quantity"], 2);

        cart.set_quantity(&p1.id, 7);
        assert_eq!(stored_json(&cart)[0]["quantity"], 7);
        assert_eq!(stored_json(&cart)[0]["name"], "Apple iPhone13");
    }

    #[test]
    fn test_totals_track_mutations() {
        let p1 = product("1", "Apple iPhone13", "19.99", 1);
        let p2 = product("2", "Samsung Galaxy", "5.005", 2);
        let mut cart = CartStore::new(MemoryStore::new());

        cart.add_item(&p1);
        cart.add_item(&p2);
        cart.set_quantity(&p1.id, 3);
        assert_eq!(cart.totals().item_count, 4);
        assert_eq!(cart.totals().total_price.amount().to_string(), "64.975");

        cart.remove_item(&p1.id);
        assert_eq!(cart.totals().item_count, 1);
        assert_eq!(cart.totals().total_price.amount().to_string(), "5.005");
    }

    #[test]
    fn test_load_persisted_restores_cart() {
        let store = MemoryStore::new();
        let p1 = product("1", "Apple iPhone13", "100", 1);
        {
            let mut cart = CartStore::new(&store);
            cart.add_item(&p1);
            cart.add_item(&p1);
        }

        let mut reloaded = CartStore::new(&store);
        assert!(reloaded.is_empty());
        reloaded.load_persisted();

        assert_eq!(reloaded.line(&p1.id).map(|l| l.quantity), Some(2));
        assert_eq!(reloaded.line(&p1.id).map(|l| &l.product), Some(&p1));
    }

    #[test]
    fn test_load_persisted_absent_is_empty() {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.load_persisted();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_persisted_malformed_is_empty() {
        let payloads: [&[u8]; 5] = [
            b"{not json",
            br#"{"id":"1"}"#,
            br#"[{"id":"1","name":"A","price":"1","createdAt":"2024-01-01T00:00:00Z","quantity":0}]"#,
            br#"[{"id":"1","name":"A","price":"1","createdAt":"2024-01-01T00:00:00Z","quantity":1},
                 {"id":"1","name":"A","price":"1","createdAt":"2024-01-01T00:00:00Z","quantity":2}]"#,
            br#"[{"id":"1","name":"A","price":"-1","createdAt":"2024-01-01T00:00:00Z","quantity":1}]"#,
        ];
        for payload in payloads {
            let store = MemoryStore::new();
            store.set(CART_STORAGE_KEY, payload).unwrap();

            let mut cart = CartStore::new(&store);
            cart.add_item(&product("9", "Stale line", "1", 1));
            store.set(CART_STORAGE_KEY, payload).unwrap();

            cart.load_persisted();
            assert!(cart.is_empty(), "payload {:?}", String::from_utf8_lossy(payload));
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::StoreError("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk on fire".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_storage_failures_do_not_fail_mutations() {
        let mut cart = CartStore::new(BrokenStore);
        cart.load_persisted();
        assert!(cart.is_empty());

        let p1 = product("1", "Apple iPhone13", "100", 1);
        cart.add_item(&p1);
        cart.add_item(&p1);
        assert_eq!(cart.totals().item_count, 2);
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let mut cart = CartStore::with_key(&store, "cart:guest");
        cart.add_item(&product("1", "Apple iPhone13", "100", 1));

        assert!(store.exists("cart:guest").unwrap());
        assert!(!store.exists(CART_STORAGE_KEY).unwrap());
    }
}
