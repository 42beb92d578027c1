mod task_queue;
pub(crate) use task_queue::{TaskQueue, Work};

mod result_slots;
pub(crate) use result_slots::ResultSlots;

mod panic_guard;
pub(crate) use panic_guard::catch_task;

mod progress;
pub(crate) use progress::ProgressObserver;

mod dispatch;
pub(crate) use dispatch::dispatch;
