//! Retrying subscription to one data source.

use futures::StreamExt;
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::currencies::DataStream;
use crate::errors::TokenListError;

use super::latest_values::SourceUpdate;

/// Forwards every value of the source to `events`, converted by `to_event`.
///
/// When the subscription fails, or ends before producing a value, a degraded
/// marker is forwarded instead, and the source is subscribed again after
/// `backoff`. The delay is flat. A subscription that ends after producing
/// values is not restarted; its last value stays current.
///
/// Returns once `events` is closed.
pub(crate) async fn run_source_subscription<T, S, E, V>(
    source_name: &'static str,
    subscribe: S,
    on_empty: TokenListError,
    backoff: Duration,
    events: mpsc::Sender<E>,
    to_event: V,
) where
    S: Fn() -> DataStream<T>,
    V: Fn(SourceUpdate<T>) -> E,
{
    loop {
        let mut stream = subscribe();
        let mut received = false;

        let failure = loop {
            match stream.next().await {
                Some(Ok(value)) => {
                    received = true;
                    if events.send(to_event(Ok(value))).await.is_err() {
                        return;
                    }
                }
                Some(Err(e)) => {
                    warn!("{} source failed: {}", source_name, e);
                    break TokenListError::data(e);
                }
                None if received => {
                    debug!("{} source completed", source_name);
                    return;
                }
                None => {
                    warn!("{} source completed without data", source_name);
                    break on_empty.clone();
                }
            }
        };
        drop(stream);

        if events.send(to_event(Err(failure))).await.is_err() {
            return;
        }

        tokio::time::sleep(backoff).await;
        debug!("Resubscribing to {} source", source_name);
    }
}
