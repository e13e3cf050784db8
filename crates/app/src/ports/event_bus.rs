//! Event bus port — tells front-ends that something visible changed.

use kh_domain::console::LogLine;
use kh_domain::status::StatusView;
use kh_domain::view::PanelView;

/// Something a front-end should reflect on screen.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A line was appended to the console log.
    Line(LogLine),
    /// The status fields were re-rendered.
    Status(StatusView),
    /// The log/map toggle changed.
    View(PanelView),
}

/// Publishes [`ClientEvent`]s to interested subscribers.
///
/// Publishing never blocks and never fails; events nobody listens to are
/// dropped.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ClientEvent);
}

impl<T: EventPublisher> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: ClientEvent) {
        (**self).publish(event);
    }
}
