mod mock_chat_client;
mod openai_compat_client;

pub use mock_chat_client::*;
pub use openai_compat_client::*;
