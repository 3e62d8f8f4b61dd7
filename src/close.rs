use tokio::sync::mpsc::Sender;

/// Releases a sending side so the receiving actor can run to completion.
#[trait_variant::make(Send)]
pub trait AsyncClose {
    async fn close(self);
}

impl<T: Send> AsyncClose for Sender<T> {
    #[inline]
    async fn close(self) {
        drop(self);
    }
}
