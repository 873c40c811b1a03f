//! Tokio drivers wiring the deterministic cores to real timers and
//! channels.
//!
//! The aggregator loop receives events from many page contexts but handles
//! each one to completion before taking the next, which is the only ordering
//! guarantee the counters need. Page drivers run one logical timeline per
//! page context: timer ticks, mutation notifications, and toggle messages
//! are consumed as discrete tasks that never overlap a scan.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::managers::counter_aggregator::{CounterAggregator, CounterAggregatorTrait, TabId};
use crate::managers::page_context::PageContext;
use crate::services::session_store::SessionStoreTrait;

const AGGREGATOR_QUEUE_DEPTH: usize = 64;

/// Events delivered to the aggregator loop.
pub enum AggregatorEvent {
    Increment {
        sender_tab: Option<TabId>,
    },
    Query {
        respond: oneshot::Sender<u64>,
    },
    Reset {
        respond: Option<oneshot::Sender<()>>,
    },
    TabRemoved(TabId),
    SessionStart,
}

/// Cloneable sender into the aggregator loop. Every send tolerates a closed
/// channel: a torn-down aggregator mid-flight is expected, not an error, and
/// the caller's local state is unaffected.
#[derive(Clone)]
pub struct AggregatorHandle {
    tx: mpsc::Sender<AggregatorEvent>,
}

impl AggregatorHandle {
    /// Fire-and-forget blocking event. A full or closed queue drops the
    /// event silently; a lost acknowledgment is not an error.
    pub fn increment(&self, sender_tab: Option<TabId>) {
        let _ = self.tx.try_send(AggregatorEvent::Increment { sender_tab });
    }

    /// Live total. `None` when the aggregator is gone.
    pub async fn query_count(&self) -> Option<u64> {
        let (respond, rx) = oneshot::channel();
        if self
            .tx
            .send(AggregatorEvent::Query { respond })
            .await
            .is_err()
        {
            return None;
        }
        rx.await.ok()
    }

    /// Clears all counters. Returns true if the acknowledgment arrived.
    pub async fn reset(&self) -> bool {
        let (respond, rx) = oneshot::channel();
        if self
            .tx
            .send(AggregatorEvent::Reset {
                respond: Some(respond),
            })
            .await
            .is_err()
        {
            return false;
        }
        rx.await.is_ok()
    }

    pub fn tab_removed(&self, tab: TabId) {
        let _ = self.tx.try_send(AggregatorEvent::TabRemoved(tab));
    }

    pub fn session_start(&self) {
        let _ = self.tx.try_send(AggregatorEvent::SessionStart);
    }
}

/// Spawns the aggregator loop. Events are serialized by the channel; the
/// loop also wakes itself to flush due throttled persistence writes.
pub fn spawn_aggregator<S>(
    mut aggregator: CounterAggregator<S>,
) -> (AggregatorHandle, JoinHandle<()>)
where
    S: SessionStoreTrait + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<AggregatorEvent>(AGGREGATOR_QUEUE_DEPTH);
    let task = tokio::spawn(async move {
        loop {
            let deadline = aggregator.pending_persist_deadline();
            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Some(event) => apply_event(&mut aggregator, event),
                        None => {
                            // All handles dropped: flush anything pending.
                            if let Some(deadline) = aggregator.pending_persist_deadline() {
                                aggregator.persist_due(deadline);
                            }
                            break;
                        }
                    }
                }
                _ = sleep_until_deadline(deadline) => {
                    aggregator.persist_due(Instant::now());
                }
            }
        }
    });
    (AggregatorHandle { tx }, task)
}

fn apply_event<S: SessionStoreTrait>(
    aggregator: &mut CounterAggregator<S>,
    event: AggregatorEvent,
) {
    match event {
        AggregatorEvent::Increment { sender_tab } => {
            aggregator.on_increment(sender_tab, Instant::now());
        }
        AggregatorEvent::Query { respond } => {
            let _ = respond.send(aggregator.total());
        }
        AggregatorEvent::Reset { respond } => {
            aggregator.on_reset();
            if let Some(respond) = respond {
                let _ = respond.send(());
            }
        }
        AggregatorEvent::TabRemoved(tab) => {
            aggregator.on_tab_removed(tab, Instant::now());
        }
        AggregatorEvent::SessionStart => {
            aggregator.on_session_start();
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}

/// Events delivered to a page driver from the host.
pub enum PageEvent {
    /// The content-container observer saw a mutation batch.
    Mutation { added_nodes: usize },
    /// A `toggleBlocking` message addressed to this page context.
    Toggle { enabled: bool },
}

/// Drives one page context until its event channel closes (navigation).
///
/// Scans run inline on this task; emitted blocking events go to the
/// aggregator as fire-and-forget increments attributed to the context's
/// tab.
pub async fn run_page_context(
    mut context: PageContext,
    mut events: mpsc::Receiver<PageEvent>,
    aggregator: AggregatorHandle,
) {
    context.initialize(Instant::now());
    loop {
        // Drain every due trigger before sleeping again.
        while context.poll(Instant::now()).is_some() {
            let tab = context.tab_id();
            let handle = aggregator.clone();
            let mut sink = move || handle.increment(Some(tab));
            context.run_scan(&mut sink);
        }

        let deadline = context.next_deadline(Instant::now());
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(PageEvent::Mutation { added_nodes }) => {
                        context.on_mutation(added_nodes, Instant::now());
                    }
                    Some(PageEvent::Toggle { enabled }) => {
                        context.handle_toggle(enabled, Instant::now());
                    }
                    // Navigated away: the context and its state die here.
                    None => break,
                }
            }
            _ = sleep_until_deadline(deadline) => {}
        }
    }
}
