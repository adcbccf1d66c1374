//! Owned vs. controlled chart view state.
//!
//! A chart's range selection and trendline toggle can either be owned by the
//! engine (a setter mutates internal state) or controlled by the caller (the
//! caller supplies the current value and a change callback, and the setter
//! only invokes the callback). The two modes are distinct constructors, not
//! a silent branch on whether a callback happens to be present; switching
//! modes mid-lifecycle is not supported.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::TimeRange;

/// Change callback for controlled state.
pub type OnChange<T> = Arc<dyn Fn(T) + Send + Sync>;

enum Binding<T: Copy> {
    Owned(RwLock<T>),
    Controlled { value: T, on_change: OnChange<T> },
}

impl<T: Copy> Binding<T> {
    fn get(&self) -> T {
        match self {
            Binding::Owned(cell) => *cell.read(),
            Binding::Controlled { value, .. } => *value,
        }
    }

    fn set(&self, next: T) {
        match self {
            Binding::Owned(cell) => *cell.write() = next,
            // controlled state is never mutated here; the owner hears about
            // the request and re-renders with the new value
            Binding::Controlled { on_change, .. } => on_change(next),
        }
    }
}

/// Range selection and trendline visibility for one chart instance.
pub struct ChartControls {
    range: Binding<TimeRange>,
    trendline: Binding<bool>,
}

impl ChartControls {
    /// Uncontrolled mode: the controls own their state, starting at
    /// `initial` with the trendline visible.
    pub fn with_owned_range(initial: TimeRange) -> Self {
        Self {
            range: Binding::Owned(RwLock::new(initial)),
            trendline: Binding::Owned(RwLock::new(true)),
        }
    }

    /// Controlled mode: the caller holds the range and is notified of change
    /// requests through `on_change`.
    pub fn with_controlled_range(value: TimeRange, on_change: OnChange<TimeRange>) -> Self {
        Self {
            range: Binding::Controlled { value, on_change },
            trendline: Binding::Owned(RwLock::new(true)),
        }
    }

    /// Hand trendline visibility to the caller as well.
    pub fn with_controlled_trendline(mut self, value: bool, on_change: OnChange<bool>) -> Self {
        self.trendline = Binding::Controlled { value, on_change };
        self
    }

    pub fn selected_range(&self) -> TimeRange {
        self.range.get()
    }

    pub fn set_selected_range(&self, range: TimeRange) {
        self.range.set(range);
    }

    pub fn show_trendline(&self) -> bool {
        self.trendline.get()
    }

    pub fn set_show_trendline(&self, show: bool) {
        self.trendline.set(show);
    }
}
