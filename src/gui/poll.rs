use std::time::Duration;

use iced::Subscription;

/// The one polling timer every dashboard shares: a fixed interval mapped
/// onto that screen's refresh message. On-demand refreshes (post-decision,
/// post-search) go through the same message, so the render path never
/// cares what triggered a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poll {
    every: Duration,
}

impl Poll {
    pub fn new(every: Duration) -> Self {
        Self { every }
    }

    pub fn subscription<M>(&self, tick: M) -> Subscription<M>
    where
        M: Clone + Send + 'static,
    {
        iced::time::every(self.every).map(move |_instant| tick.clone())
    }
}
