use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::view::{Action, Element, Node};

pub type AlertId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible period followed by the fade-out period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTiming {
    pub visible: Duration,
    pub fade: Duration,
}

impl Default for AlertTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_secs(5),
            fade: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    /// Set once the visible period is over; the banner renders transparent.
    pub fading: bool,
    armed: bool,
}

impl AlertBanner {
    pub fn to_node(&self) -> Node {
        let mut banner = Element::new("div")
            .class("alert")
            .class(format!("alert-{}", self.severity));
        if self.fading {
            banner = banner.attr("style", "opacity: 0");
        }
        banner
            .text(self.message.clone())
            .child(
                Element::new("button")
                    .class("close-alert")
                    .on_click(Action::CloseAlert(self.id))
                    .text("×"),
            )
            .into()
    }
}

#[derive(Debug, Default)]
struct AlertState {
    next_id: AlertId,
    banners: VecDeque<AlertBanner>,
}

/// The page's alert container. Newest banner first.
///
/// Cloning shares the container. Each shown banner gets a timer task that
/// fades and then detaches it; closing by hand first makes the timer a no-op.
#[derive(Debug, Clone, Default)]
pub struct AlertStack {
    state: Arc<Mutex<AlertState>>,
    timing: AlertTiming,
}

impl AlertStack {
    pub fn new(timing: AlertTiming) -> Self {
        Self {
            state: Arc::default(),
            timing,
        }
    }

    pub fn timing(&self) -> AlertTiming {
        self.timing
    }

    /// Inserts a banner at the top and starts its dismiss timer.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> AlertId {
        let message = message.into();
        match severity {
            Severity::Error | Severity::Warning => {
                warn!(%severity, message = %message, "alert shown");
            }
            Severity::Success | Severity::Info => {
                info!(%severity, message = %message, "alert shown");
            }
        }
        let id = self.insert(message, severity);
        self.arm(id);
        id
    }

    /// Inserts a banner that was already on the page before any script ran
    /// (server-rendered flash messages). Its timer starts on [`Self::arm_existing`].
    pub fn preload(&self, message: impl Into<String>, severity: Severity) -> AlertId {
        self.insert(message.into(), severity)
    }

    /// Starts dismiss timers for every banner that does not have one yet.
    pub fn arm_existing(&self) {
        let pending: Vec<AlertId> = self
            .lock()
            .banners
            .iter()
            .filter(|b| !b.armed)
            .map(|b| b.id)
            .collect();
        for id in pending {
            self.arm(id);
        }
    }

    /// Detaches a banner. Returns `false` when it was already gone.
    pub fn close(&self, id: AlertId) -> bool {
        let mut state = self.lock();
        let before = state.banners.len();
        state.banners.retain(|b| b.id != id);
        before != state.banners.len()
    }

    pub fn is_attached(&self, id: AlertId) -> bool {
        self.lock().banners.iter().any(|b| b.id == id)
    }

    pub fn banners(&self) -> Vec<AlertBanner> {
        self.lock().banners.iter().cloned().collect()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.lock()
            .banners
            .iter()
            .map(|b| (b.severity, b.message.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().banners.is_empty()
    }

    pub fn render(&self) -> Node {
        self.lock()
            .banners
            .iter()
            .fold(Element::new("div").class("alerts"), |container, banner| {
                container.child(banner.to_node())
            })
            .into()
    }

    fn insert(&self, message: String, severity: Severity) -> AlertId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.banners.push_front(AlertBanner {
            id,
            message,
            severity,
            fading: false,
            armed: false,
        });
        id
    }

    fn begin_fade(&self, id: AlertId) -> bool {
        let mut state = self.lock();
        match state.banners.iter_mut().find(|b| b.id == id) {
            Some(banner) => {
                banner.fading = true;
                true
            }
            None => false,
        }
    }

    fn arm(&self, id: AlertId) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(alert_id = id, "no async runtime; alert stays until closed");
            return;
        };
        {
            let mut state = self.lock();
            let Some(banner) = state.banners.iter_mut().find(|b| b.id == id) else {
                return;
            };
            banner.armed = true;
        }

        let stack = self.clone();
        runtime.spawn(async move {
            tokio::time::sleep(stack.timing.visible).await;
            if !stack.begin_fade(id) {
                return;
            }
            tokio::time::sleep(stack.timing.fade).await;
            if stack.close(id) {
                debug!(alert_id = id, "alert auto-dismissed");
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, AlertState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_alert_is_on_top() {
        let alerts = AlertStack::default();
        alerts.show("first", Severity::Info);
        alerts.show("second", Severity::Error);

        assert_eq!(
            alerts.messages(),
            vec![
                (Severity::Error, "second".to_string()),
                (Severity::Info, "first".to_string())
            ]
        );
    }

    #[test]
    fn close_is_idempotent() {
        let alerts = AlertStack::default();
        let id = alerts.show("bye", Severity::Success);

        assert!(alerts.close(id));
        assert!(!alerts.close(id));
        assert!(alerts.is_empty());
    }

    #[test]
    fn banner_renders_with_severity_class_and_close_button() {
        let alerts = AlertStack::default();
        let id = alerts.show("Saved <ok>", Severity::Success);

        let html = alerts.render().to_html();
        assert!(html.contains("class=\"alert alert-success\""));
        assert!(html.contains("Saved &lt;ok&gt;"));
        assert_eq!(alerts.render().actions(), vec![&Action::CloseAlert(id)]);
    }

    #[tokio::test(start_paused = true)]
    async fn shown_alert_fades_then_detaches() {
        let alerts = AlertStack::default();
        let id = alerts.show("temporary", Severity::Info);

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(!alerts.banners()[0].fading);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(alerts.banners()[0].fading);
        assert!(alerts.is_attached(id));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!alerts.is_attached(id));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_close_beats_timer() {
        let alerts = AlertStack::default();
        let id = alerts.show("closing", Severity::Warning);
        let other = alerts.show("staying", Severity::Info);

        assert!(alerts.close(id));
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(alerts.is_attached(other));
        assert!(!alerts.is_attached(id));
    }

    #[tokio::test(start_paused = true)]
    async fn preloaded_alerts_wait_for_arming() {
        let alerts = AlertStack::new(AlertTiming {
            visible: Duration::from_millis(100),
            fade: Duration::from_millis(10),
        });
        assert_eq!(alerts.timing().fade, Duration::from_millis(10));
        assert_eq!(AlertStack::default().timing(), AlertTiming::default());
        let flash = alerts.preload("Welcome back", Severity::Success);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(alerts.is_attached(flash));

        alerts.arm_existing();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!alerts.is_attached(flash));
    }
}
