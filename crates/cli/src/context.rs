//! Application context - wires wallet, executor and journal together

use std::path::{Path, PathBuf};
use std::sync::Arc;

use multisig_core::{Amount, Identity, ProposalId};
use multisig_journal::{replay, verify_chain, Journal, JournalError, JournalReader};
use multisig_wallet::{
    ApprovalOutcome, LedgerExecutor, TransferRequest, Wallet, WalletConfig, WalletError,
};

const CONFIG_FILE: &str = "wallet.json";
const JOURNAL_DIR: &str = "journal";

/// Errors while setting up or driving the context
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Wallet already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Wallet not initialized at {0} (run `multisig init`)")]
    NotInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),
}

/// Application context - one wallet backed by one data directory
pub struct AppContext {
    pub wallet: Wallet,
    pub executor: Arc<LedgerExecutor>,
    config: WalletConfig,
    journal: Journal,
    data_path: PathBuf,
}

impl AppContext {
    /// Write a new configuration into an empty data directory
    pub async fn init(
        data_path: impl AsRef<Path>,
        config: WalletConfig,
    ) -> Result<Self, ContextError> {
        let data_path = data_path.as_ref();
        let config_path = data_path.join(CONFIG_FILE);

        if config_path.exists() {
            return Err(ContextError::AlreadyInitialized(data_path.to_path_buf()));
        }

        // Reject bad parameters before anything touches disk
        config.validate().map_err(WalletError::from)?;

        std::fs::create_dir_all(data_path)?;
        config.save(&config_path)?;
        tracing::info!(path = %config_path.display(), "Wallet configuration written");

        Self::open(data_path).await
    }

    /// Load the configuration and rebuild wallet state from the journal
    pub async fn open(data_path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let data_path = data_path.as_ref().to_path_buf();
        let config_path = data_path.join(CONFIG_FILE);

        if !config_path.exists() {
            return Err(ContextError::NotInitialized(data_path));
        }

        let config = WalletConfig::from_file(&config_path)?;
        let executor = Arc::new(LedgerExecutor::new());
        let wallet = Wallet::new(&config, executor.clone())?;

        let journal_path = data_path.join(JOURNAL_DIR);
        let records = JournalReader::from_directory(&journal_path)?.read_all()?;
        verify_chain(&records).map_err(JournalError::from)?;
        for (destination, amount) in replay(&records, &wallet).await? {
            executor
                .restore_payout(&destination, amount)
                .map_err(|e| JournalError::Replay {
                    sequence: records.len() as u64,
                    reason: e.to_string(),
                })?;
        }

        let journal = Journal::open(&journal_path)?;

        Ok(Self {
            wallet,
            executor,
            config,
            journal,
            data_path,
        })
    }

    // Each event is journaled under the wallet's write guard before the
    // change applies; a failed append leaves the wallet untouched.
    pub async fn deposit(&mut self, amount: Amount) -> Result<Amount, ContextError> {
        Ok(self.wallet.deposit_recorded(amount, &mut self.journal).await?)
    }

    pub async fn create_transfer(
        &mut self,
        caller: &Identity,
        amount: Amount,
        destination: Identity,
    ) -> Result<ProposalId, ContextError> {
        let request = TransferRequest::new(amount, destination);
        Ok(self
            .wallet
            .create_transfer_recorded(caller, request, &mut self.journal)
            .await?)
    }

    pub async fn approve_transfer(
        &mut self,
        caller: &Identity,
        id: ProposalId,
    ) -> Result<ApprovalOutcome, ContextError> {
        Ok(self
            .wallet
            .approve_transfer_recorded(caller, id, &mut self.journal)
            .await?)
    }

    /// Re-read the journal from disk and verify its hash chain
    pub fn audit(&self) -> Result<usize, ContextError> {
        let records = JournalReader::from_directory(self.journal.path())?.read_all()?;
        verify_chain(&records).map_err(JournalError::from)?;
        Ok(records.len())
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn journal_path(&self) -> &Path {
        self.journal.path()
    }

    /// Number of journaled operations
    pub fn last_sequence(&self) -> u64 {
        self.journal.last_sequence()
    }
}
