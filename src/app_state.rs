//! Implements a struct that holds the state of the REST server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{Error, persistence, transaction::Ledger};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The path the ledger is written back to after every change.
    pub data_path: PathBuf,

    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState], loading the ledger from `data_path`.
    ///
    /// A missing data file seeds the ledger with sample transactions and
    /// creates the file. `local_timezone` should be a valid, canonical
    /// timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the data file exists but cannot be read or parsed.
    pub fn new(data_path: PathBuf, local_timezone: &str) -> Result<Self, Error> {
        let ledger = persistence::load_ledger(&data_path)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            data_path,
            ledger: Arc::new(Mutex::new(ledger)),
        })
    }
}
