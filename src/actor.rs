use crate::Inbox;

/// A task that consumes every message of its inbox and then yields an output.
///
/// The actor owns whatever state it declares inside [`Actor::run`]; nothing
/// outside the task can reach it except through the inbox.
#[trait_variant::make(Send)]
pub trait Actor: Sized + 'static {
    type Message: Send + 'static;
    type Output: Send + 'static;

    async fn run(self, inbox: impl Inbox<Item = Self::Message>) -> Self::Output;
}
