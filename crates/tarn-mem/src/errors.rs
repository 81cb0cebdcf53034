#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CapacityError {
    FixedCapacity {
        capacity: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    CapacityOverflow,
}

impl core::fmt::Display for CapacityError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FixedCapacity { capacity } => {
                write!(f, "exceeded fixed capacity of {}", capacity)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::CapacityOverflow => {
                write!(f, "capacity overflow")
            },
        }
    }
}

impl core::error::Error for CapacityError {}
