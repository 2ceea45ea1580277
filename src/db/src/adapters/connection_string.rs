// 接続文字列ビルダー
//
// DatabaseConfig と接続先データベース名から接続文字列を生成する。

use crate::core::config::DatabaseConfig;
use urlencoding::encode;

/// マスク済みパスワードの表記
pub const MASKED_PASSWORD: &str = "***";

/// 接続文字列を生成
///
/// ユーザー名とパスワードはパーセントエンコードされます。
/// これにより、`@`, `:`, `/`, `#`, `?` などの特殊文字を含むパスワードでも
/// 正しく接続文字列が構築されます。
pub fn build_connection_string(config: &DatabaseConfig, database: &str) -> String {
    build(config, database, config.password.as_deref().map(|p| encode(p).into_owned()))
}

/// パスワードをマスクした接続文字列を生成
///
/// 状態表示やログ出力に使用します。
pub fn build_masked_connection_string(config: &DatabaseConfig, database: &str) -> String {
    let masked = config
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|_| MASKED_PASSWORD.to_string());
    build(config, database, masked)
}

fn build(config: &DatabaseConfig, database: &str, password: Option<String>) -> String {
    let user = config.user.as_deref().unwrap_or("postgres");
    let encoded_user = encode(user);
    let auth = match password {
        Some(password) if !password.is_empty() => format!("{}:{}", encoded_user, password),
        _ => encoded_user.to_string(),
    };

    let mut url = format!(
        "postgresql://{}@{}:{}/{}",
        auth,
        config.host,
        config.resolved_port(),
        database
    );
    if let Some(ssl_mode) = &config.ssl_mode {
        url.push_str(&format!("?sslmode={}", ssl_mode));
    }
    url
}
