/// 工具模块 - 提供日志与文本辅助函数
pub mod logging;
pub mod text;

pub use logging::LoggingConfig;
pub use text::summarize;
