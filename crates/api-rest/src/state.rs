use crate::error::{internal, map_access, ApiError};
use api_shared::require_admin;
use herbal_core::auth::Accounts;
use herbal_core::cart::Cart;
use herbal_core::distribution::DistributionMap;
use herbal_core::favorites::Favorites;
use herbal_core::ingredients::BlendDraft;
use herbal_core::local_store::LocalStore;
use herbal_core::newsletter::Newsletter;
use herbal_core::{Catalog, HerbalResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mutable per-process session: what a single shopper and admin would see in one browser.
pub struct Session {
    pub store: Box<dyn LocalStore>,
    pub cart: Cart,
    pub favorites: Favorites,
    pub draft: BlendDraft,
    pub accounts: Accounts,
    pub newsletter: Newsletter,
    pub distribution: DistributionMap,
    pub rng: StdRng,
}

impl Session {
    /// Write `cart` to the local store, then make it the session cart.
    ///
    /// When the write fails the session keeps its previous cart.
    pub fn commit_cart(&mut self, cart: Cart) -> HerbalResult<()> {
        cart.save(self.store.as_mut())?;
        self.cart = cart;
        Ok(())
    }

    /// Refuse the request unless an admin is signed in.
    ///
    /// # Errors
    /// `401 Unauthorized` when nobody is signed in, `403 Forbidden` for a non-admin.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        require_admin(self.accounts.current())
            .map(|_| ())
            .map_err(map_access)
    }
}

/// Application state for the REST API server
///
/// The catalog is immutable and shared; everything that changes lives in the [`Session`]
/// behind one mutex. Handlers never hold the lock across an `.await`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    /// Build the state, restoring the cart and signed-in user from `store`.
    ///
    /// # Arguments
    /// * `catalog` - Validated reference data.
    /// * `store` - Local key/value mirror.
    /// * `rng_seed` - Fixed seed for the mixer; entropy when `None`.
    pub fn new(catalog: Catalog, mut store: Box<dyn LocalStore>, rng_seed: Option<u64>) -> Self {
        let cart = Cart::load(store.as_mut());
        let accounts = Accounts::restore(store.as_mut());
        let distribution = DistributionMap::new(catalog.distribution().to_vec());
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog: Arc::new(catalog),
            session: Arc::new(Mutex::new(Session {
                store,
                cart,
                favorites: Favorites::new(),
                draft: BlendDraft::default(),
                accounts,
                newsletter: Newsletter::seeded(),
                distribution,
                rng,
            })),
        }
    }

    /// Lock the session.
    ///
    /// # Errors
    /// Returns `500 Internal Server Error` if a previous handler panicked while holding the lock.
    pub fn session(&self) -> Result<MutexGuard<'_, Session>, ApiError> {
        self.session.lock().map_err(|_| {
            tracing::error!("session lock poisoned");
            internal()
        })
    }
}
