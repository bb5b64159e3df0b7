use core::mem::MaybeUninit;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum State {
    Uninit = 0,
    Initializing = 1,
    Init = 2,
}

/// Layout note: store `value` first; keep `state` in tail padding.
pub(super) struct Inner<T> {
    pub(super) value: MaybeUninit<T>,
    pub(super) state: State,
}
