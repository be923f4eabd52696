use crate::{
    config::RuntimeConfiguration,
    error::RosterResult,
    store::{RecordStore, postgres::PostgresStore},
};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct RosterState {
    store: Arc<dyn RecordStore>,
}

impl RosterState {
    pub async fn new(options: PgPoolOptions, config: &RuntimeConfiguration) -> RosterResult<Self> {
        let store = PostgresStore::connect(options, &config.db_config()).await?;
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn sensible_shutdown(&self) {
        info!("Closing record store");
        self.store.close().await;
    }
}

impl Deref for RosterState {
    type Target = dyn RecordStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
