//! Page controller state.
//!
//! [`ShopState`] owns everything the storefront page renders from: the
//! catalog, the search text and filter criteria, the derived list of visible
//! products, the cart and the session. It is constructed explicitly and owns
//! its key-value store; there are no globals.
//!
//! Front ends call the mutation methods in response to user actions and
//! re-render from the accessors. Subscribers registered with
//! [`ShopState::subscribe`] are told about every change as it happens.
//!
//! Cart and session changes are written through to the store immediately.
//! Those writes are fire-and-forget: a failed write is logged and the
//! in-memory state stays authoritative.

use secrecy::SecretString;
use shophub_core::{CartLine, FilterCriteria, Price, Product, ProductId, User};
use tracing::instrument;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::error;
use crate::search::{FilterSummary, filter_positions};
use crate::session::SessionStore;
use crate::storage::{KeyValueStore, StorageKeys, load_json, save_json};

/// A change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// The visible product list was recomputed.
    ProductsFiltered(FilterSummary),
    /// A unit of a product was added to the cart.
    ItemAdded {
        product_id: ProductId,
        name: String,
        quantity: u32,
    },
    /// A cart line was deleted.
    ItemRemoved { product_id: ProductId },
    /// The cart contents changed in any way.
    CartUpdated { item_count: u32, total: Price },
    /// A shopper signed in or signed up.
    SignedIn(User),
    /// The shopper signed out.
    SignedOut,
}

impl ShopEvent {
    /// Title and description of the toast shown for this event, if any.
    #[must_use]
    pub fn toast(&self) -> Option<(&'static str, String)> {
        match self {
            Self::ItemAdded { name, .. } => Some((
                "Added to cart",
                format!("{name} has been added to your cart."),
            )),
            Self::ItemRemoved { .. } => Some((
                "Removed from cart",
                "Item has been removed from your cart.".to_string(),
            )),
            Self::SignedOut => Some((
                "Logged out",
                "You have been logged out successfully.".to_string(),
            )),
            Self::ProductsFiltered(_) | Self::CartUpdated { .. } | Self::SignedIn(_) => None,
        }
    }
}

/// Handle returned by [`ShopState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ShopEvent)>;

/// The storefront page state.
pub struct ShopState<S> {
    catalog: Catalog,
    storage: S,
    keys: StorageKeys,
    query: String,
    criteria: FilterCriteria,
    /// Catalog positions of the products passing the current filter.
    visible: Vec<usize>,
    cart: CartStore,
    session: SessionStore,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: std::fmt::Debug> std::fmt::Debug for ShopState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopState")
            .field("catalog", &self.catalog)
            .field("storage", &self.storage)
            .field("keys", &self.keys)
            .field("query", &self.query)
            .field("criteria", &self.criteria)
            .field("visible", &self.visible)
            .field("cart", &self.cart)
            .field("session", &self.session)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S: KeyValueStore> ShopState<S> {
    /// Build the page state, restoring cart and session from `storage`.
    ///
    /// Missing or unreadable stored values start as an empty cart and a
    /// signed-out session.
    pub fn load(catalog: Catalog, storage: S, keys: StorageKeys) -> Self {
        let lines: Vec<CartLine> = load_json(&storage, &keys.cart).unwrap_or_default();
        let cart = CartStore::from_lines(lines);
        let user: Option<User> = load_json(&storage, &keys.user);
        let session = SessionStore::from_user(user);

        let criteria = FilterCriteria::default();
        let visible = filter_positions(catalog.products(), "", &criteria);

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.lines().len(),
            logged_in = session.is_logged_in(),
            "Storefront state loaded"
        );

        Self {
            catalog,
            storage,
            keys,
            query: String::new(),
            criteria,
            visible,
            cart,
            session,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback for every [`ShopEvent`].
    pub fn subscribe(&mut self, subscriber: impl FnMut(&ShopEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: &ShopEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    // =========================================================================
    // Catalog and filtering
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the search text.
    #[instrument(skip(self, query))]
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    /// Replace the filter criteria wholesale.
    #[instrument(skip(self))]
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        if criteria == self.criteria {
            return;
        }
        self.criteria = criteria;
        self.refilter();
    }

    /// Restore the permissive default criteria. The search text is kept.
    pub fn clear_filters(&mut self) {
        self.set_filters(FilterCriteria::default());
    }

    fn refilter(&mut self) {
        self.visible = filter_positions(self.catalog.products(), &self.query, &self.criteria);
        let summary = self.summary();
        tracing::debug!(shown = summary.shown, total = summary.total, "Products filtered");
        self.emit(&ShopEvent::ProductsFiltered(summary));
    }

    /// Products passing the current search and filters, in catalog order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        let products = self.catalog.products();
        self.visible.iter().filter_map(|&i| products.get(i)).collect()
    }

    /// "Showing N of M products".
    #[must_use]
    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            shown: self.visible.len(),
            total: self.catalog.len(),
        }
    }

    /// Badges for the active search text and filters.
    #[must_use]
    pub fn active_labels(&self) -> Vec<String> {
        self.criteria.active_labels(&self.query)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Add one unit of `product` to the cart. Returns the new line quantity.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add_to_cart(product);
        error::add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product.id.as_str())]));
        self.emit(&ShopEvent::ItemAdded {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
        });
        self.cart_changed();
        quantity
    }

    /// Add one unit of the catalog product with `id`.
    ///
    /// Returns `None` if the catalog has no such product.
    pub fn add_product(&mut self, id: &ProductId) -> Option<u32> {
        let product = self.catalog.find(id)?.clone();
        Some(self.add_to_cart(&product))
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// Returns `false` if the cart has no line for `id`.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }
        let updated = self.cart.update_quantity(id, quantity);
        if updated {
            self.cart_changed();
        }
        updated
    }

    /// Raise a line's quantity by one.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.cart.get(id) {
            Some(line) => {
                let quantity = line.quantity.saturating_add(1);
                self.update_quantity(id, quantity)
            }
            None => false,
        }
    }

    /// Lower a line's quantity by one, removing the line at zero.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.cart.get(id) {
            Some(line) => {
                let quantity = line.quantity.saturating_sub(1);
                self.update_quantity(id, quantity)
            }
            None => false,
        }
    }

    /// Delete the cart line for `id`. Returns `false` if there was none.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        if self.cart.remove_item(id).is_none() {
            return false;
        }
        error::add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        self.emit(&ShopEvent::ItemRemoved {
            product_id: id.clone(),
        });
        self.cart_changed();
        true
    }

    fn cart_changed(&mut self) {
        if let Err(e) = save_json(&mut self.storage, &self.keys.cart, self.cart.lines()) {
            tracing::warn!(key = %self.keys.cart, error = %e, "Failed to persist cart");
        }
        self.emit(&ShopEvent::CartUpdated {
            item_count: self.cart.item_count(),
            total: self.cart.total(),
        });
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sign in. Always succeeds; the password is not checked.
    #[instrument(skip(self, email, password))]
    pub fn login(&mut self, email: &str, password: &SecretString) -> User {
        let user = self.session.login(email, password).clone();
        self.signed_in(&user);
        user
    }

    /// Sign up with a display name. Always succeeds.
    #[instrument(skip(self, email, password))]
    pub fn signup(&mut self, email: &str, password: &SecretString, name: &str) -> User {
        let user = self.session.signup(email, password, name).clone();
        self.signed_in(&user);
        user
    }

    fn signed_in(&mut self, user: &User) {
        if let Err(e) = save_json(&mut self.storage, &self.keys.user, user) {
            tracing::warn!(key = %self.keys.user, error = %e, "Failed to persist user");
        }
        error::set_sentry_user(&user.email, &user.name);
        tracing::info!(name = %user.name, "Signed in");
        self.emit(&ShopEvent::SignedIn(user.clone()));
    }

    /// Sign out and delete the persisted user record.
    ///
    /// Returns `false` if nobody was signed in; the stored record is
    /// deleted either way.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> bool {
        let previous = self.session.logout();
        if let Err(e) = self.storage.remove(&self.keys.user) {
            tracing::warn!(key = %self.keys.user, error = %e, "Failed to delete stored user");
        }
        error::clear_sentry_user();

        if previous.is_none() {
            return false;
        }
        tracing::info!("Signed out");
        self.emit(&ShopEvent::SignedOut);
        true
    }

    // =========================================================================
    // Storage
    // =========================================================================

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Give back the key-value store, e.g. to reload from it.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use shophub_core::Price;

    use super::*;
    use crate::storage::MemoryStore;

    fn state() -> ShopState<MemoryStore> {
        ShopState::load(Catalog::builtin(), MemoryStore::new(), StorageKeys::default())
    }

    fn recorder(state: &mut ShopState<MemoryStore>) -> Rc<RefCell<Vec<ShopEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_fresh_state() {
        let state = state();
        assert_eq!(state.visible_products().len(), 6);
        assert_eq!(state.summary().to_string(), "Showing 6 of 6 products");
        assert!(state.cart().is_empty());
        assert!(!state.session().is_logged_in());
        assert!(state.active_labels().is_empty());
    }

    #[test]
    fn test_filters_recompute_visible_products() {
        let mut state = state();
        let events = recorder(&mut state);

        state.set_filters(FilterCriteria::default().with_category("Laptops", true));
        let names: Vec<&str> = state.visible_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Professional Laptop", "Gaming Laptop Ultimate"]);

        state.set_search("gaming");
        assert_eq!(state.summary(), FilterSummary { shown: 1, total: 6 });
        assert_eq!(state.active_labels(), vec!["Search: gaming", "Laptops"]);

        state.clear_filters();
        assert_eq!(state.summary().shown, 1);
        assert_eq!(state.query(), "gaming");

        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn test_unchanged_inputs_do_not_refilter() {
        let mut state = state();
        let events = recorder(&mut state);

        state.set_search("");
        state.set_filters(FilterCriteria::default());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_cart_mutations_are_persisted() {
        let mut state = state();
        state.add_product(&id("1")).unwrap();
        state.add_product(&id("2")).unwrap();
        state.add_product(&id("2")).unwrap();

        let stored = state.storage().get("shophub-cart").unwrap().unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&stored).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].quantity, 2);
        assert_eq!(state.cart().total(), Price::from_whole(797));

        state.update_quantity(&id("2"), 0);
        let stored = state.storage().get("shophub-cart").unwrap().unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&stored).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(state.cart().item_count(), 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut state = state();
        assert_eq!(state.add_product(&id("404")), None);
        assert!(state.storage().get("shophub-cart").unwrap().is_none());
    }

    #[test]
    fn test_cart_events() {
        let mut state = state();
        let events = recorder(&mut state);

        state.add_product(&id("3")).unwrap();
        state.increment(&id("3"));
        state.decrement(&id("3"));
        state.remove_item(&id("3"));
        assert!(!state.remove_item(&id("3")));

        let events = events.borrow();
        let toasts: Vec<&str> = events.iter().filter_map(|e| e.toast()).map(|(t, _)| t).collect();
        assert_eq!(toasts, vec!["Added to cart", "Removed from cart"]);
        assert_eq!(
            events.last(),
            Some(&ShopEvent::CartUpdated {
                item_count: 0,
                total: Price::ZERO,
            })
        );
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut state = state();
        let events = recorder(&mut state);
        state.add_product(&id("5")).unwrap();

        assert!(state.decrement(&id("5")));
        assert!(state.cart().is_empty());
        assert!(
            events
                .borrow()
                .iter()
                .any(|e| matches!(e, ShopEvent::ItemRemoved { product_id } if product_id.as_str() == "5"))
        );
    }

    #[test]
    fn test_added_toast_names_product() {
        let event = ShopEvent::ItemAdded {
            product_id: id("1"),
            name: "Premium Wireless Headphones".to_string(),
            quantity: 1,
        };
        let (title, description) = event.toast().unwrap();
        assert_eq!(title, "Added to cart");
        assert_eq!(
            description,
            "Premium Wireless Headphones has been added to your cart."
        );
    }

    #[test]
    fn test_login_and_logout_persist() {
        let mut state = state();
        let events = recorder(&mut state);

        let user = state.login("sam@example.com", &SecretString::from("pw"));
        assert_eq!(user.name, "sam");
        let stored = state.storage().get("shophub-user").unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<User>(&stored).unwrap(),
            User::from_email("sam@example.com")
        );
        assert!(!stored.contains("pw"));

        assert!(state.logout());
        assert!(state.storage().get("shophub-user").unwrap().is_none());
        assert!(!state.logout());

        let events = events.borrow();
        assert!(matches!(events[0], ShopEvent::SignedIn(_)));
        assert_eq!(events[1], ShopEvent::SignedOut);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_reload_restores_cart_and_session() {
        let mut state = state();
        state.add_product(&id("1")).unwrap();
        state.add_product(&id("6")).unwrap();
        state.update_quantity(&id("6"), 3);
        state.signup("sam@example.com", &SecretString::from("pw"), "Sam");

        let storage = state.into_storage();
        let reloaded = ShopState::load(Catalog::builtin(), storage, StorageKeys::default());

        let lines: Vec<(&str, u32)> = reloaded
            .cart()
            .lines()
            .iter()
            .map(|l| (l.product.id.as_str(), l.quantity))
            .collect();
        assert_eq!(lines, vec![("1", 1), ("6", 3)]);
        assert_eq!(reloaded.session().display_name(), "Sam");
    }

    #[test]
    fn test_corrupt_storage_falls_back() {
        let mut storage = MemoryStore::new();
        storage.set("shophub-cart", "[{\"product\":").unwrap();
        storage.set("shophub-user", "42").unwrap();

        let state = ShopState::load(Catalog::builtin(), storage, StorageKeys::default());
        assert!(state.cart().is_empty());
        assert!(!state.session().is_logged_in());
    }

    #[test]
    fn test_unsubscribe() {
        let mut state = state();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = state.subscribe(move |_| *sink.borrow_mut() += 1);

        state.add_product(&id("1")).unwrap();
        let after_first = *count.borrow();
        assert!(after_first > 0);

        assert!(state.unsubscribe(sub));
        assert!(!state.unsubscribe(sub));
        state.add_product(&id("1")).unwrap();
        assert_eq!(*count.borrow(), after_first);
    }

    #[test]
    fn test_stored_cart_with_huge_price_does_not_panic() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                "shophub-cart",
                r#"[{"product":{"id":"9","name":"Vault","price":50000000000000000000000000000,
                    "image":"/assets/vault.jpg","category":"Accessories","rating":4.0,
                    "reviews":1,"inStock":true},"quantity":2}]"#,
            )
            .unwrap();

        let mut state = ShopState::load(Catalog::builtin(), storage, StorageKeys::default());
        assert_eq!(state.cart().lines().len(), 1);
        assert_eq!(state.cart().total(), Price::MAX);

        state.add_product(&id("1")).unwrap();
        assert!(state.increment(&id("9")));
        assert_eq!(state.cart().total(), Price::MAX);
        assert_eq!(state.cart().item_count(), 4);
    }
}
