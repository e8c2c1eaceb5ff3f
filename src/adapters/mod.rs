// Adapters - External system implementations

pub mod console;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod recording;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use console::StdoutConsole;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use recording::{BufferConsole, MemoryFs, RecordingExecutor};
pub use toml_config::TomlConfigAdapter;
