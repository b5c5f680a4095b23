//! The ledger store: the four record collections, cached in memory behind
//! one read/write lock and rewritten in full on every mutation.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Holding, Loan, ResultEngine, Sale, Stake,
    persist::{read_json_file, write_json_file},
};

/// Common view over the four record kinds.
pub trait Record {
    fn id(&self) -> &str;
    /// Normalized (upper-case) coin symbol.
    fn coin(&self) -> &str;
    fn amount(&self) -> f64;
}

/// On-disk and in-memory shape of the ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerData {
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub stakes: Vec<Stake>,
}

#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    data: RwLock<LedgerData>,
}

impl LedgerStore {
    /// Load the ledger at `path`, creating an empty one if the file does not
    /// exist. A file that exists but does not parse is an error.
    pub fn open(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref().to_path_buf();
        let existing: Option<LedgerData> =
            read_json_file(&path).map_err(|err| EngineError::storage("loading ledger", err))?;

        let store = match existing {
            Some(data) => Self {
                path,
                data: RwLock::new(data),
            },
            None => {
                tracing::info!("creating empty ledger at {}", path.display());
                let store = Self {
                    path,
                    data: RwLock::new(LedgerData::default()),
                };
                write_json_file(&store.path, &*store.data.read())
                    .map_err(|err| EngineError::storage("creating ledger", err))?;
                store
            }
        };
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the ledger under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&LedgerData) -> R) -> R {
        f(&*self.data.read())
    }

    /// Run `f` against the ledger under the exclusive lock and persist the
    /// whole ledger before the lock is released.
    ///
    /// `f` must finish its checks before touching the ledger: when it fails
    /// nothing is written. When the write fails the in-memory
    /// change stays applied and the storage error is returned, so the caller
    /// knows the change may not be durable.
    ///
    /// Sales and stakes are appended only through here, after their balance
    /// check.
    pub(crate) fn mutate<R>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut LedgerData) -> ResultEngine<R>,
    ) -> ResultEngine<R> {
        let mut guard = self.data.write();
        let value = f(&mut *guard)?;
        if let Err(err) = write_json_file(&self.path, &*guard) {
            tracing::error!("{operation}: failed to persist ledger: {err}");
            return Err(EngineError::storage(operation, err));
        }
        Ok(value)
    }

    /// Copy of the whole ledger.
    pub fn data(&self) -> LedgerData {
        self.read(LedgerData::clone)
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.read(|data| data.holdings.clone())
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.read(|data| data.sales.clone())
    }

    pub fn loans(&self) -> Vec<Loan> {
        self.read(|data| data.loans.clone())
    }

    pub fn stakes(&self) -> Vec<Stake> {
        self.read(|data| data.stakes.clone())
    }

    pub fn add_holding(&self, holding: Holding) -> ResultEngine<()> {
        self.mutate("saving holding", |data| {
            data.holdings.push(holding);
            Ok(())
        })
    }

    pub fn add_loan(&self, loan: Loan) -> ResultEngine<()> {
        self.mutate("saving loan", |data| {
            data.loans.push(loan);
            Ok(())
        })
    }

    pub fn remove_holding(&self, id: &str) -> ResultEngine<bool> {
        self.remove("removing holding", id, |data| &mut data.holdings)
    }

    pub fn remove_sale(&self, id: &str) -> ResultEngine<bool> {
        self.remove("removing sale", id, |data| &mut data.sales)
    }

    pub fn remove_loan(&self, id: &str) -> ResultEngine<bool> {
        self.remove("removing loan", id, |data| &mut data.loans)
    }

    pub fn remove_stake(&self, id: &str) -> ResultEngine<bool> {
        self.remove("removing stake", id, |data| &mut data.stakes)
    }

    /// Remove every record of one collection whose ID is `id`. The file is
    /// only rewritten when something was removed.
    fn remove<T: Record>(
        &self,
        operation: &str,
        id: &str,
        collection: impl Fn(&mut LedgerData) -> &mut Vec<T>,
    ) -> ResultEngine<bool> {
        let mut guard = self.data.write();
        let records = collection(&mut *guard);
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        write_json_file(&self.path, &*guard).map_err(|err| {
            tracing::error!("{operation}: failed to persist ledger: {err}");
            EngineError::storage(operation, err)
        })?;
        Ok(true)
    }
}
