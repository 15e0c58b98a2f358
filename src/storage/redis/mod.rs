//! Redis connectivity for the durable bulk job queue

mod pool;

pub use pool::RedisPool;
