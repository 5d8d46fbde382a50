use core::error::Error;
use core::fmt::{self, Display, Formatter};

use tracing::Level;

/// ログの出力形式。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum LogFormat {
    /// 1行ずつの人間向け表示。
    Compact,
    /// 1行1オブジェクトの JSON。
    Json,
}

/// グローバルなサブスクライバを設定できなかった。
#[derive(Debug)]
pub struct LogInitError(Box<dyn Error + Send + Sync + 'static>);

impl Display for LogInitError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

impl Error for LogInitError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.0)
    }
}

/// `tracing` のサブスクライバを標準エラー出力向けに設定する。
///
/// # Errors
///
/// すでにグローバルなサブスクライバが設定されている場合、`LogInitError` を返す。
///
#[inline]
pub fn init(format: LogFormat, level: Level) -> Result<(), LogInitError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(LogInitError)
}
