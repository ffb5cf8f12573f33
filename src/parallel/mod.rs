pub mod batch;
pub mod pool;

pub use batch::{recommend_for_intents, IntentRecommendations};
pub use pool::WorkerPool;
