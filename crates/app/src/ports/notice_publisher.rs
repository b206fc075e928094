//! Notice port: one-way delivery of operation notices to the user.

use std::future::Future;

use homedash_domain::notice::Notice;

/// Delivers notices to whoever is listening.
///
/// Delivery is fire-and-forget: implementations must not fail the caller and
/// must not feed anything back into device state.
pub trait NoticePublisher {
    /// Hand a notice over for delivery.
    fn publish(&self, notice: Notice) -> impl Future<Output = ()> + Send;
}

impl<T: NoticePublisher + Send + Sync> NoticePublisher for std::sync::Arc<T> {
    fn publish(&self, notice: Notice) -> impl Future<Output = ()> + Send {
        (**self).publish(notice)
    }
}
