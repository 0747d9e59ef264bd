pub mod worker_client;

pub use worker_client::{ProcessWorkerClient, ProtocolError, WorkerClient};
