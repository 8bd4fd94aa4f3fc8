use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use storefront_core::{ProductId, RemoteError};

use crate::entry::CartEntry;
use crate::remote::CartService;

/// A call received by [`InMemoryCartService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCall {
    Fetch,
    Add(ProductId, u32),
    Update(ProductId, u32),
    Remove(ProductId),
}

impl CartCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, CartCall::Fetch)
    }
}

/// In-memory remote cart.
///
/// Intended for tests/dev. Behaves like the remote upsert endpoint (adding a
/// product that is already present overwrites its quantity), records every call,
/// and can inject failures or hold mutations until released.
#[derive(Debug, Default)]
pub struct InMemoryCartService {
    entries: Mutex<Vec<CartEntry>>,
    calls: Mutex<Vec<CartCall>>,
    next_failure: Mutex<Option<RemoteError>>,
    hold: Mutex<Option<Arc<Notify>>>,
    guest: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryCartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<CartEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// A cart without a credential: every call fails with `Unauthenticated`.
    pub fn guest() -> Self {
        Self {
            guest: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<CartEntry> {
        lock(&self.entries).clone()
    }

    pub fn calls(&self) -> Vec<CartCall> {
        lock(&self.calls).clone()
    }

    pub fn mutation_calls(&self) -> Vec<CartCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: RemoteError) {
        *lock(&self.next_failure) = Some(error);
    }

    /// Simulate a change made elsewhere (another tab, a concurrent add).
    pub fn put_entry(&self, product_id: ProductId, quantity: u32) {
        self.upsert(&product_id, quantity);
    }

    /// Hold every subsequent mutation until the returned handle is notified.
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock(&self.hold) = Some(notify.clone());
        notify
    }

    fn record(&self, call: CartCall) {
        lock(&self.calls).push(call);
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.guest {
            return Err(RemoteError::Unauthenticated);
        }
        match lock(&self.next_failure).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn before_mutation(&self) -> Result<(), RemoteError> {
        let hold = lock(&self.hold).clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        self.check()
    }

    fn upsert(&self, product_id: &ProductId, quantity: u32) -> Vec<CartEntry> {
        let mut entries = lock(&self.entries);
        match entries.iter_mut().find(|e| &e.product_id == product_id) {
            Some(entry) => entry.quantity = i64::from(quantity),
            None => entries.push(CartEntry::new(product_id.clone(), i64::from(quantity))),
        }
        entries.clone()
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>, RemoteError> {
        self.record(CartCall::Fetch);
        self.check()?;
        Ok(self.entries())
    }

    async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartEntry>, RemoteError> {
        self.record(CartCall::Add(product_id.clone(), quantity));
        self.before_mutation().await?;
        Ok(self.upsert(product_id, quantity))
    }

    async fn update_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartEntry>, RemoteError> {
        self.record(CartCall::Update(product_id.clone(), quantity));
        self.before_mutation().await?;
        Ok(self.upsert(product_id, quantity))
    }

    async fn remove_item(&self, product_id: &ProductId) -> Result<Vec<CartEntry>, RemoteError> {
        self.record(CartCall::Remove(product_id.clone()));
        self.before_mutation().await?;
        let mut entries = lock(&self.entries);
        entries.retain(|e| &e.product_id != product_id);
        Ok(entries.clone())
    }
}
