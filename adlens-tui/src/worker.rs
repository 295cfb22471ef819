//! Background fetch worker.
//!
//! The main thread sends one `Fetch` per query key. The worker runs each
//! request on its own short-lived thread so a slow keyword page never
//! blocks a selector list. Results come back over the response channel and
//! are drained once per frame.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use adlens_core::api::{fetch, ApiError, DashboardApi, Payload};
use adlens_core::query::QueryKey;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch(QueryKey),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Fetched {
        key: QueryKey,
        result: Result<Payload, ApiError>,
    },
}

/// Spawn the dispatcher thread.
pub fn spawn_worker(
    api: Arc<dyn DashboardApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("adlens-worker".into())
        .spawn(move || worker_loop(api, rx, tx))
}

fn worker_loop(api: Arc<dyn DashboardApi>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Fetch(key)) => dispatch(Arc::clone(&api), key, tx.clone()),
        }
    }
    debug!("worker stopped");
}

fn dispatch(api: Arc<dyn DashboardApi>, key: QueryKey, tx: Sender<WorkerResponse>) {
    let name = format!("adlens-fetch-{}", key.resource().replace(' ', "-"));
    let fallback_key = key.clone();
    let fallback_tx = tx.clone();

    let spawned = thread::Builder::new().name(name).spawn(move || {
        let result = fetch(api.as_ref(), &key);
        // The receiver is gone only during shutdown.
        let _ = tx.send(WorkerResponse::Fetched { key, result });
    });

    if let Err(e) = spawned {
        warn!(error = %e, key = %fallback_key, "could not spawn fetch thread");
        let _ = fallback_tx.send(WorkerResponse::Fetched {
            key: fallback_key,
            result: Err(ApiError::Network(format!("could not start request: {e}"))),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_core::domain::{Account, AccountId, AdGroup, Campaign, CampaignId, KeywordPage};
    use adlens_core::query::KeywordQuery;
    use std::sync::mpsc;
    use std::time::Duration;

    struct OneAccount;

    impl DashboardApi for OneAccount {
        fn accounts(&self) -> Result<Vec<Account>, ApiError> {
            Ok(vec![Account {
                id: AccountId(1),
                name: "Acme".into(),
                status: Default::default(),
            }])
        }
        fn campaigns(&self, _: Option<AccountId>) -> Result<Vec<Campaign>, ApiError> {
            Err(ApiError::Status { code: 500, path: "/campaign".into() })
        }
        fn ad_groups(&self, _: CampaignId) -> Result<Vec<AdGroup>, ApiError> {
            Ok(vec![])
        }
        fn keywords(&self, _: &KeywordQuery) -> Result<KeywordPage, ApiError> {
            Err(ApiError::Decode("unused".into()))
        }
    }

    #[test]
    fn fetches_come_back_tagged_with_their_key() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::new(OneAccount), cmd_rx, resp_tx).unwrap();

        cmd_tx.send(WorkerCommand::Fetch(QueryKey::Accounts)).unwrap();
        cmd_tx
            .send(WorkerCommand::Fetch(QueryKey::Campaigns { account: Some(AccountId(1)) }))
            .unwrap();

        let mut seen = Vec::new();
        for _ in 0..2 {
            let WorkerResponse::Fetched { key, result } =
                resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            seen.push((key, result.is_ok()));
        }
        assert!(seen.contains(&(QueryKey::Accounts, true)));
        assert!(seen.contains(&(QueryKey::Campaigns { account: Some(AccountId(1)) }, false)));

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
