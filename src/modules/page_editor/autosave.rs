use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::document::{EditorDocument, PageDraft};
use crate::modules::cms_client::ClientError;
use crate::shared::constants::AUTOSAVE_INTERVAL_SECS;

/// Destination for editor saves. Creates the page when the draft has no id,
/// updates it otherwise, and returns the stored page id.
#[async_trait]
pub trait PageSink: Send + Sync {
    async fn save_page(&self, draft: &PageDraft) -> Result<i64, ClientError>;
}

/// Periodically persists a shared [`EditorDocument`] while it has unsaved
/// edits, and serves explicit saves.
pub struct AutoSaver<S> {
    document: Arc<Mutex<EditorDocument>>,
    sink: Arc<S>,
    interval: Duration,
    // One save at a time, so a new page is never created twice
    in_flight: Mutex<()>,
}

impl<S: PageSink + 'static> AutoSaver<S> {
    pub fn new(document: Arc<Mutex<EditorDocument>>, sink: Arc<S>) -> Self {
        Self {
            document,
            sink,
            interval: Duration::from_secs(AUTOSAVE_INTERVAL_SECS),
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn document(&self) -> &Arc<Mutex<EditorDocument>> {
        &self.document
    }

    /// Save regardless of the dirty flag
    pub async fn save_now(&self) -> Result<i64, ClientError> {
        let _guard = self.in_flight.lock().await;
        self.save_locked().await
    }

    /// Save only when there are unsaved edits; `None` when clean
    pub async fn save_if_dirty(&self) -> Result<Option<i64>, ClientError> {
        let _guard = self.in_flight.lock().await;
        if !self.document.lock().await.is_dirty() {
            return Ok(None);
        }
        self.save_locked().await.map(Some)
    }

    async fn save_locked(&self) -> Result<i64, ClientError> {
        // Snapshot under the lock, save without it so editing continues
        let (draft, revision) = {
            let doc = self.document.lock().await;
            (doc.to_draft(), doc.revision())
        };

        let page_id = self.sink.save_page(&draft).await?;

        self.document.lock().await.mark_saved(revision, page_id);
        Ok(page_id)
    }

    /// Start the background loop. Stops on [`AutoSaveHandle::stop`] or when
    /// the session expires (401).
    pub fn spawn(self: Arc<Self>) -> AutoSaveHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.save_if_dirty().await {
                            Ok(Some(page_id)) => tracing::debug!("Auto-saved page {}", page_id),
                            Ok(None) => {}
                            Err(e) if e.is_unauthorized() => {
                                tracing::warn!("Auto-save stopped: session expired");
                                break;
                            }
                            Err(e) => tracing::warn!("Auto-save failed: {}", e),
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Auto-save task received shutdown signal");
                        break;
                    }
                }
            }
        });

        AutoSaveHandle {
            shutdown_tx,
            task,
        }
    }
}

pub struct AutoSaveHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl AutoSaveHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn stop(self) {
        if let Err(e) = self.shutdown_tx.send(()).await {
            tracing::debug!("Auto-save task already stopped: {}", e);
        }
        if let Err(e) = self.task.await {
            tracing::warn!("Auto-save task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pages::models::Block;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct RecordingSink {
        saves: std::sync::Mutex<Vec<PageDraft>>,
        reject_session: AtomicBool,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.saves.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PageSink for RecordingSink {
        async fn save_page(&self, draft: &PageDraft) -> Result<i64, ClientError> {
            if self.reject_session.load(Ordering::SeqCst) {
                return Err(ClientError::Unauthorized {
                    login_path: "/api/login".into(),
                });
            }
            self.saves.lock().unwrap().push(draft.clone());
            Ok(draft.id.unwrap_or(42))
        }
    }

    fn saver(sink: Arc<RecordingSink>) -> Arc<AutoSaver<RecordingSink>> {
        let document = Arc::new(Mutex::new(EditorDocument::new("About Us", "about-us")));
        Arc::new(AutoSaver::new(document, sink).with_interval(Duration::from_millis(20)))
    }

    #[tokio::test]
    async fn explicit_save_creates_then_updates() {
        let sink = Arc::new(RecordingSink::default());
        let saver = saver(sink.clone());

        assert_eq!(saver.save_now().await.unwrap(), 42);
        assert!(!saver.document().lock().await.is_dirty());

        saver.save_now().await.unwrap();
        let saves = sink.saves.lock().unwrap();
        assert_eq!(saves[0].id, None);
        assert_eq!(saves[1].id, Some(42));
    }

    #[tokio::test]
    async fn clean_document_is_not_saved() {
        let sink = Arc::new(RecordingSink::default());
        let saver = saver(sink.clone());

        saver.save_now().await.unwrap();
        assert_eq!(saver.save_if_dirty().await.unwrap(), None);
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn background_loop_saves_dirty_documents_once() {
        let sink = Arc::new(RecordingSink::default());
        let saver = saver(sink.clone());
        let handle = saver.clone().spawn();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(sink.count(), 1);

        saver
            .document()
            .lock()
            .await
            .add_element(Block::Divider, None, None)
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(sink.count(), 2);
        assert_eq!(sink.saves.lock().unwrap()[1].content.len(), 1);

        handle.stop().await;
    }

    #[tokio::test]
    async fn background_loop_stops_when_session_expires() {
        let sink = Arc::new(RecordingSink::default());
        sink.reject_session.store(true, Ordering::SeqCst);
        let saver = saver(sink.clone());
        let handle = saver.clone().spawn();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(!handle.is_running());
        assert!(saver.document().lock().await.is_dirty());
        handle.stop().await;
    }
}
