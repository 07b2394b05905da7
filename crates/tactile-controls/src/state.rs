//! Control presentation states
//!
//! A control shows exactly one [`ControlState`] at a time. Per-state values are
//! kept in a [`StateMap`], so switching state means reading a different slot and
//! never assembling a look from pieces of two states.

use std::ops::{Index, IndexMut};

/// Visual state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    /// Enabled, not touched, not selected
    #[default]
    Normal = 0,
    /// A touch is down on the control
    Highlighted,
    /// Toggled on by the host
    Selected,
    /// Not accepting input
    Disabled,
}

impl ControlState {
    /// Number of states
    pub const COUNT: usize = 4;

    /// Every state, in index order
    pub const ALL: [ControlState; Self::COUNT] = [
        ControlState::Normal,
        ControlState::Highlighted,
        ControlState::Selected,
        ControlState::Disabled,
    ];

    /// Resolve the flag combination into the single state to display
    ///
    /// Disabled wins over everything, then Highlighted, then Selected.
    pub fn resolve(enabled: bool, selected: bool, highlighted: bool) -> Self {
        if !enabled {
            ControlState::Disabled
        } else if highlighted {
            ControlState::Highlighted
        } else if selected {
            ControlState::Selected
        } else {
            ControlState::Normal
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One value per [`ControlState`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateMap<T> {
    values: [T; ControlState::COUNT],
}

impl<T> StateMap<T> {
    /// Build from explicit per-state values
    pub fn new(normal: T, highlighted: T, selected: T, disabled: T) -> Self {
        Self {
            values: [normal, highlighted, selected, disabled],
        }
    }

    /// Build by calling `f` once per state
    pub fn from_fn(mut f: impl FnMut(ControlState) -> T) -> Self {
        Self {
            values: ControlState::ALL.map(&mut f),
        }
    }

    pub fn get(&self, state: ControlState) -> &T {
        &self.values[state.index()]
    }

    pub fn get_mut(&mut self, state: ControlState) -> &mut T {
        &mut self.values[state.index()]
    }

    /// Replace the value for `state`, returning the old one
    pub fn set(&mut self, state: ControlState, value: T) -> T {
        std::mem::replace(&mut self.values[state.index()], value)
    }

    /// Iterate `(state, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (ControlState, &T)> {
        ControlState::ALL.into_iter().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ControlState, &mut T)> {
        ControlState::ALL.into_iter().zip(self.values.iter_mut())
    }

    pub fn map<U>(&self, mut f: impl FnMut(ControlState, &T) -> U) -> StateMap<U> {
        StateMap::from_fn(|state| f(state, self.get(state)))
    }
}

impl<T: Clone> StateMap<T> {
    /// Same value for every state
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<ControlState> for StateMap<T> {
    type Output = T;

    fn index(&self, state: ControlState) -> &T {
        self.get(state)
    }
}

impl<T> IndexMut<ControlState> for StateMap<T> {
    fn index_mut(&mut self, state: ControlState) -> &mut T {
        self.get_mut(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_priority() {
        assert_eq!(ControlState::resolve(true, false, false), ControlState::Normal);
        assert_eq!(ControlState::resolve(true, true, false), ControlState::Selected);
        assert_eq!(ControlState::resolve(true, true, true), ControlState::Highlighted);
        assert_eq!(ControlState::resolve(true, false, true), ControlState::Highlighted);
    }

    #[test]
    fn test_disabled_overrides_every_flag() {
        for selected in [false, true] {
            for highlighted in [false, true] {
                assert_eq!(
                    ControlState::resolve(false, selected, highlighted),
                    ControlState::Disabled
                );
            }
        }
    }

    #[test]
    fn test_state_map_indexing() {
        let mut map = StateMap::new("n", "h", "s", "d");
        assert_eq!(map[ControlState::Selected], "s");

        let old = map.set(ControlState::Selected, "S");
        assert_eq!(old, "s");
        map[ControlState::Disabled] = "D";

        let collected: Vec<_> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected, vec!["n", "h", "S", "D"]);
    }

    #[test]
    fn test_state_map_from_fn_and_map() {
        let map = StateMap::from_fn(|state| state.index() * 10);
        assert_eq!(map[ControlState::Disabled], 30);

        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[ControlState::Highlighted], 20);
    }
}
