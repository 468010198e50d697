use std::sync::Arc;

use crate::{config::Credentials, db::Db};

pub struct AppState {
    db: Arc<Db>,
    credentials: Credentials,
}

impl AppState {
    pub fn new(db: Db, credentials: Credentials) -> AppState {
        AppState {
            db: Arc::new(db),
            credentials,
        }
    }

    pub fn get_db(&self) -> Arc<Db> {
        return self.db.clone();
    }

    pub fn get_credentials(&self) -> &Credentials {
        return &self.credentials;
    }
}
