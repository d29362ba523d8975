/// A wrapper for the dense index of a state in a compiled model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Get the underlying index without exposing the inner field.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    /// Allow for explicit conversion from usize to StateId
    fn from(value: usize) -> Self {
        StateId(value)
    }
}

/// Position of an action inside its state's action list.
/// The list order is the enumeration order used for tie-breaking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(usize);

impl ActionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}

/// Handle of a successor distribution shared between actions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DistributionId(usize);

impl DistributionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for DistributionId {
    fn from(value: usize) -> Self {
        DistributionId(value)
    }
}
