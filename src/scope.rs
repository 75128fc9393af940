//! View-scoped async values
//!
//! A `ScopedValue` belongs to whatever is displaying it. Refreshing it starts a
//! task whose result replaces the value; dropping it aborts the task, so a
//! result that arrives after teardown is never applied.

use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct ScopedValue<T> {
    value: Arc<RwLock<T>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T> ScopedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            in_flight: None,
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Whether a refresh is still running
    pub fn is_loading(&self) -> bool {
        self.in_flight
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Replace the value with the output of `fut`, superseding any earlier refresh
    pub fn refresh<F>(&mut self, fut: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.cancel();
        let slot = Arc::clone(&self.value);
        self.in_flight = Some(tokio::spawn(async move {
            let result = fut.await;
            *slot.write() = result;
        }));
    }

    /// Abort the in-flight refresh, keeping the current value
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Wait for the in-flight refresh and return the resulting value
    pub async fn settled(&mut self) -> T {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!("Scoped refresh task failed: {}", e);
                }
            }
        }
        self.get()
    }
}

impl<T> Drop for ScopedValue<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_refresh_applies_result() {
        let mut value = ScopedValue::new(0u32);
        value.refresh(async { 42 });
        assert_eq!(value.settled().await, 42);
        assert!(!value.is_loading());
    }

    #[tokio::test]
    async fn test_newer_refresh_supersedes_older() {
        let mut value = ScopedValue::new("initial".to_string());
        value.refresh(async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "stale".to_string()
        });
        value.refresh(async { "fresh".to_string() });

        assert_eq!(value.settled().await, "fresh");
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(value.get(), "fresh");
    }

    #[tokio::test]
    async fn test_drop_aborts_in_flight_refresh() {
        let mut value = ScopedValue::new(0u32);
        let observer = Arc::clone(&value.value);
        value.refresh(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            7
        });
        assert!(value.is_loading());

        drop(value);
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*observer.read(), 0);
    }

    #[tokio::test]
    async fn test_cancel_keeps_current_value() {
        let mut value = ScopedValue::new(5u32);
        value.refresh(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            9
        });
        value.cancel();
        assert_eq!(value.settled().await, 5);
    }
}
