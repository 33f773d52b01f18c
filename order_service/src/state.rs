// order_service/src/state.rs
use crate::db::OrderStore;
use crate::errors::AppError;
use crate::services::{ProductCatalog, UserDirectory};
use orka::Orka;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn OrderStore>,
  pub users: Arc<dyn UserDirectory>,
  pub catalog: Arc<dyn ProductCatalog>,
  pub orka_instance: Arc<Orka<AppError>>,
}

#[cfg(test)]
impl AppState {
  /// State over mock collaborators with the order pipelines registered.
  pub(crate) fn with_mocks(
    users: crate::services::user_service::MockUserDirectory,
    catalog: crate::services::product_service::MockProductCatalog,
    store: crate::db::MockOrderStore,
  ) -> Self {
    let state = AppState {
      store: Arc::new(store),
      users: Arc::new(users),
      catalog: Arc::new(catalog),
      orka_instance: Arc::new(Orka::new()),
    };
    crate::pipelines::register_all_pipelines(&state.orka_instance).unwrap();
    state
  }
}
