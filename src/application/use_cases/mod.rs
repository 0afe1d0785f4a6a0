mod converse;

pub use converse::ConversationService;
