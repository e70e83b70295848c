//! Port adapters.

mod navigator;
mod notifier;
mod reqwest_client;
mod system_clock;

pub use navigator::WatchNavigator;
pub use notifier::{ChannelNotifier, TracingNotifier};
pub use reqwest_client::ReqwestHttpClient;
pub use system_clock::SystemClock;
