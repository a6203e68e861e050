use crate::device::DeviceId;
use thiserror::Error;

/// Reasons a stage operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// The two devices do not belong to the same stage
    #[error("devices {from} and {to} are not on the same stage")]
    StageMismatch { from: DeviceId, to: DeviceId },
    /// The device is not attached to this stage
    #[error("device {0} is not attached to this stage")]
    UnknownDevice(DeviceId),
    /// The device was built without drag support
    #[error("device {0} is not draggable")]
    DragDisabled(DeviceId),
    /// Another stage-wide drag session has not been released yet
    #[error("device {active} is already being dragged")]
    DragInProgress { active: DeviceId },
}
