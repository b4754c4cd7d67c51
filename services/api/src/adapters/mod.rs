pub mod backup;
pub mod db;
pub mod demo;
pub mod gemini_llm;
pub mod openai_llm;

pub use backup::JsonBackupAdapter;
pub use db::DbAdapter;
pub use demo::DemoContentAdapter;
pub use gemini_llm::GeminiContentAdapter;
pub use openai_llm::OpenAiContentAdapter;
