//! Application layer - Use cases and orchestration

pub mod editor_session;
pub mod entry_store;
pub mod events;
pub mod init;
pub mod manage_config;
pub mod vault;

pub use editor_session::{EditorSession, ImageOutcome};
pub use entry_store::EntryStore;
pub use events::{ChangeEvent, ChangeNotifier};
pub use manage_config::ConfigService;
pub use vault::Vault;
