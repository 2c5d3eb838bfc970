//! Status register events and their dispatch order.

use crate::registers::Status;

/// A condition reported by the `STATUS` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// SEU error detected in the user registers.
    ErrUserRegs,
    /// Device entered or left the awake state.
    Awake,
    /// Inactivity detected.
    Inactivity,
    /// Activity detected.
    Activity,
    /// FIFO overrun; the driver drains the FIFO before reporting it.
    FifoOverrun,
    /// FIFO watermark reached.
    FifoWatermark,
    /// At least one FIFO entry available.
    FifoReady,
    /// New sample in the data registers.
    DataReady,
}

impl StatusEvent {
    /// Dispatch order used by [`irq_handler`](crate::Adxl362::irq_handler), MSB first.
    pub const DISPATCH_ORDER: [StatusEvent; 8] = [
        Self::ErrUserRegs,
        Self::Awake,
        Self::Inactivity,
        Self::Activity,
        Self::FifoOverrun,
        Self::FifoWatermark,
        Self::FifoReady,
        Self::DataReady,
    ];

    /// Returns the `STATUS` bit that reports this event.
    pub const fn mask(self) -> u8 {
        match self {
            Self::ErrUserRegs => 1 << 7,
            Self::Awake => 1 << 6,
            Self::Inactivity => 1 << 5,
            Self::Activity => 1 << 4,
            Self::FifoOverrun => 1 << 3,
            Self::FifoWatermark => 1 << 2,
            Self::FifoReady => 1 << 1,
            Self::DataReady => 1 << 0,
        }
    }

    /// Returns whether `status` asserts this event.
    pub fn is_set(self, status: Status) -> bool {
        match self {
            Self::ErrUserRegs => status.err_user_regs(),
            Self::Awake => status.awake(),
            Self::Inactivity => status.inactivity(),
            Self::Activity => status.activity(),
            Self::FifoOverrun => status.fifo_overrun(),
            Self::FifoWatermark => status.fifo_watermark(),
            Self::FifoReady => status.fifo_ready(),
            Self::DataReady => status.data_ready(),
        }
    }
}

/// Iterates over the events asserted in `status`, in dispatch order.
pub fn asserted(status: Status) -> impl Iterator<Item = StatusEvent> {
    StatusEvent::DISPATCH_ORDER
        .into_iter()
        .filter(move |event| event.is_set(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_agree_with_register_view() {
        for event in StatusEvent::DISPATCH_ORDER {
            assert!(event.is_set(Status::from(event.mask())));
            assert!(!event.is_set(Status::from(!event.mask())));
        }
    }

    #[test]
    fn asserted_events_come_out_msb_first() {
        let status = Status::from(StatusEvent::Activity.mask() | StatusEvent::DataReady.mask());
        let mut events = asserted(status);
        assert_eq!(events.next(), Some(StatusEvent::Activity));
        assert_eq!(events.next(), Some(StatusEvent::DataReady));
        assert_eq!(events.next(), None);
    }

    #[test]
    fn clear_status_yields_nothing() {
        assert_eq!(asserted(Status::from(0)).count(), 0);
    }
}
