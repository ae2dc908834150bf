use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Acquire a repeating timer that delivers `Msg::CounterTick` every `interval`.
    StartTimer {
        counter_id: crate::CounterId,
        interval: Duration,
    },
    /// Release the timer acquired by the matching `StartTimer`.
    CancelTimer { counter_id: crate::CounterId },
}
