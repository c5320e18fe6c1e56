//! Worker identity check: document number plus a captured face image.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use workforce_client::{ApiClient, VerificationRequest, VerificationResult};

use crate::error::ConsoleError;
use crate::notification::{Notification, NotificationCenter};

/// Longest accepted document number.
pub const MAX_DOCUMENT_LEN: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Capture {
    #[default]
    Empty,
    /// JPEG data URI handed over by the camera collaborator.
    Captured(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationForm {
    pub document: String,
    pub capture: Capture,
}

impl VerificationForm {
    pub fn is_ready(&self) -> bool {
        !self.document.is_empty() && matches!(self.capture, Capture::Captured(_))
    }
}

pub struct VerificationController {
    api: Arc<ApiClient>,
    notifications: NotificationCenter,
    form: Mutex<VerificationForm>,
    busy: AtomicBool,
    mounted: AtomicBool,
}

impl VerificationController {
    pub fn new(api: Arc<ApiClient>, notifications: NotificationCenter) -> Self {
        Self {
            api,
            notifications,
            form: Mutex::new(VerificationForm::default()),
            busy: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    fn form_mut(&self) -> MutexGuard<'_, VerificationForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form(&self) -> VerificationForm {
        self.form_mut().clone()
    }

    /// Replace the document input. Edits containing anything but ASCII digits,
    /// or longer than [`MAX_DOCUMENT_LEN`], are rejected and leave it unchanged.
    pub fn set_document(&self, value: &str) -> bool {
        if value.len() > MAX_DOCUMENT_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        self.form_mut().document = value.to_string();
        true
    }

    pub fn capture(&self, image: impl Into<String>) {
        self.form_mut().capture = Capture::Captured(image.into());
    }

    /// Drop the captured image so a new one can be taken.
    pub fn retake(&self) {
        self.form_mut().capture = Capture::Empty;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.form_mut().is_ready()
    }

    fn ensure_mounted(&self) -> Result<(), ConsoleError> {
        if self.mounted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ConsoleError::Unmounted)
        }
    }

    /// Send the check; the verdict is also raised as a notification.
    ///
    /// Only one check runs at a time. A verdict that settles after
    /// [`unmount`](Self::unmount) is dropped without a notification.
    pub async fn submit(&self) -> Result<VerificationResult, ConsoleError> {
        self.ensure_mounted()?;
        let request = {
            let form = self.form_mut();
            let Capture::Captured(photo) = &form.capture else {
                return Err(ConsoleError::Invalid("a photo must be captured first".to_string()));
            };
            let cc = form
                .document
                .parse::<i64>()
                .map_err(|_| ConsoleError::Invalid("a document number is required".to_string()))?;
            VerificationRequest {
                cc,
                photo: photo.clone(),
            }
        };
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(ConsoleError::Busy);
        }

        let result = self.api.verify_worker(&request).await;
        self.busy.store(false, Ordering::SeqCst);
        self.ensure_mounted()?;

        match result {
            Ok(result) => {
                tracing::info!(cc = request.cc, matched = result.matched, "verification settled");
                let notification = if result.matched {
                    Notification::success("Verified", result.message.clone())
                } else {
                    Notification::error("Not verified", result.message.clone())
                };
                self.notifications.show(notification);
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(cc = request.cc, error = %err, "verification failed");
                self.notifications.show(Notification::error("Error", err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Stop a pending check from raising notifications.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn controller() -> VerificationController {
        // never contacted by these tests
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        VerificationController::new(
            Arc::new(api),
            NotificationCenter::new(Duration::from_secs(3), Duration::from_millis(300)),
        )
    }

    #[test]
    fn document_accepts_digits_only_up_to_fifteen() {
        let c = controller();
        assert!(c.set_document("1020304050"));
        assert!(!c.set_document("1020a"));
        assert!(!c.set_document("1234567890123456"));
        assert!(c.set_document("123456789012345"));
        assert_eq!(c.form().document, "123456789012345");
        assert!(c.set_document(""));
    }

    #[test]
    fn submit_needs_document_and_capture() {
        let c = controller();
        assert!(!c.can_submit());
        c.set_document("42");
        assert!(!c.can_submit());
        c.capture("data:image/jpeg;base64,AAAA");
        assert!(c.can_submit());
        c.retake();
        assert_eq!(c.form().capture, Capture::Empty);
        assert!(!c.can_submit());
    }

    /// Accepts connections and never answers, so every check stays pending
    /// until the client timeout.
    async fn silent_api() -> (Arc<ApiClient>, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let api = ApiClient::new(url, Duration::from_millis(300)).unwrap();
        (Arc::new(api), handle)
    }

    fn ready(c: &VerificationController) {
        c.set_document("1020");
        c.capture("data:image/jpeg;base64,AAAA");
    }

    #[tokio::test]
    async fn second_submit_is_blocked_while_pending() {
        let (api, server) = silent_api().await;
        let notifications = NotificationCenter::new(Duration::from_secs(3), Duration::from_millis(300));
        let c = Arc::new(VerificationController::new(api, notifications.clone()));
        ready(&c);

        let pending = tokio::spawn({
            let c = c.clone();
            async move { c.submit().await }
        });
        while !c.is_busy() {
            tokio::task::yield_now().await;
        }

        assert!(!c.can_submit());
        assert_eq!(c.submit().await, Err(ConsoleError::Busy));

        assert!(matches!(pending.await.unwrap(), Err(ConsoleError::Api(_))));
        assert!(!c.is_busy());
        assert!(c.can_submit());
        server.abort();
    }

    #[tokio::test]
    async fn verdict_after_unmount_raises_nothing() {
        let (api, server) = silent_api().await;
        let notifications = NotificationCenter::new(Duration::from_secs(3), Duration::from_millis(300));
        let c = Arc::new(VerificationController::new(api, notifications.clone()));
        ready(&c);

        let pending = tokio::spawn({
            let c = c.clone();
            async move { c.submit().await }
        });
        while !c.is_busy() {
            tokio::task::yield_now().await;
        }
        c.unmount();

        assert_eq!(pending.await.unwrap(), Err(ConsoleError::Unmounted));
        assert!(notifications.current().is_none());
        assert_eq!(c.submit().await, Err(ConsoleError::Unmounted));
        server.abort();
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_locally() {
        let c = controller();
        c.set_document("42");
        assert!(matches!(c.submit().await, Err(ConsoleError::Invalid(_))));

        c.set_document("");
        c.capture("data:image/jpeg;base64,AAAA");
        assert!(matches!(c.submit().await, Err(ConsoleError::Invalid(_))));
    }
}
