pub mod worker_invoker;

pub use worker_invoker::{WorkerInvoker, WorkerOutput};
