//! Adapters implementing the application ports.

mod allow_list;
mod process_env;
mod reqwest_client;
mod system_clock;

pub use allow_list::AllowListHttpClient;
pub use process_env::ProcessEnv;
pub use reqwest_client::{DEFAULT_TIMEOUT, ReqwestHttpClient};
pub use system_clock::SystemClock;
