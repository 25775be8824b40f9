//! Shared constants used across the application

/// Chat endpoint of a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";

pub const DEFAULT_MODEL: &str = "llama3.1";

/// Transcript file, resolved relative to the working directory.
pub const DEFAULT_TRANSCRIPT_FILE: &str = "chat.json";

pub const USER_INPUT_SEPARATOR: &str = "----------- User input -----------";

pub const MODEL_OUTPUT_SEPARATOR: &str = "----------- Model output -----------";

/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "PALAVER_LOG";
