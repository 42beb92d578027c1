use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

/// Details of a panic that was caught while running one item.
/// Passed to the hook installed with [`crate::BoundedRunner::on_panic`].
#[derive(Debug, Clone, Copy)]
pub struct PanicReport<'a> {
    /// Position of the item in the input.
    pub index: usize,
    pub payload: &'a str,
    pub backtrace: &'a str,
}

impl fmt::Display for PanicReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {} panicked: {}", self.index, self.payload)
    }
}

pub(crate) type PanicHook = dyn Fn(&PanicReport<'_>) + Send + Sync;

/// Where recovered panics are reported. Without a hook they go to the `log` facade.
#[derive(Clone, Default)]
pub(crate) enum FaultReporter {
    #[default]
    Log,
    Hook(Arc<PanicHook>),
}

impl FaultReporter {
    pub fn report(&self, report: &PanicReport<'_>) {
        match self {
            FaultReporter::Log => {
                log::error!("{report}\n{}", report.backtrace);
            }
            FaultReporter::Hook(hook) => {
                if catch_unwind(AssertUnwindSafe(|| hook(report))).is_err() {
                    log::error!("panic hook panicked while reporting: {report}");
                }
            }
        }
    }
}

impl fmt::Debug for FaultReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultReporter::Log => f.write_str("Log"),
            FaultReporter::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}
