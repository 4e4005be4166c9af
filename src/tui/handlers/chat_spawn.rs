//! Spawns chat requests in a background thread with a result channel.

use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::api::ChatClient;

use super::PendingChat;

/// Spawn a chat request. Returns PendingChat with the result channel and cancel token.
pub fn spawn_chat(
    rt: &Arc<Runtime>,
    client: ChatClient,
    message: String,
    session_id: String,
) -> PendingChat {
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.send_cancellable(
            &message,
            &session_id,
            &cancel_token_clone,
        ));
        let _ = result_tx.send(result);
    });

    PendingChat {
        result_rx,
        cancel_token,
    }
}
