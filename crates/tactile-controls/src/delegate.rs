use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::targets::ActionError;
use crate::Control;

/// Collaborator told about confirmed value changes
///
/// Raw touch events never reach the delegate; it hears about activations only.
pub trait ControlDelegate {
    fn control_value_changed(&self, control: &Control);
}

/// Weak slot holding at most one delegate
#[derive(Default)]
pub(crate) struct DelegateSlot {
    delegate: Option<Weak<dyn ControlDelegate>>,
}

impl DelegateSlot {
    pub(crate) fn set<D: ControlDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<dyn ControlDelegate> = Rc::downgrade(delegate) as Weak<dyn ControlDelegate>;
        self.delegate = Some(weak);
    }

    pub(crate) fn clear(&mut self) {
        self.delegate = None;
    }

    /// Upgrade the delegate, forgetting it if it has been dropped
    pub(crate) fn upgrade(&mut self) -> Option<Rc<dyn ControlDelegate>> {
        let upgraded = self.delegate.as_ref().and_then(Weak::upgrade);
        if upgraded.is_none() {
            self.delegate = None;
        }
        upgraded
    }

    pub(crate) fn is_set(&self) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }
}

/// Call the delegate, containing a panic the same way actions are contained
pub(crate) fn notify(delegate: &dyn ControlDelegate, control: &Control) -> Result<(), ActionError> {
    panic::catch_unwind(AssertUnwindSafe(|| delegate.control_value_changed(control)))
        .map_err(ActionError::from_panic)
}
