// 命名ポリシー
//
// アプリケーション名と関連パス、対象データベース名の単一ソースを提供します。

use uuid::Uuid;

/// 現行アプリケーション名
pub const APP_NAME: &str = "schemata";

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".schemata.yaml";

/// 既定の状態ディレクトリ
pub const STATE_DIR: &str = ".schemata";

/// バイナリ名
pub const BINARY_NAME: &str = "schemata";

/// 対象データベース名のプレフィックス
pub const DATABASE_NAME_PREFIX: &str = "schema_";

/// 対象データベース名の最大長（PostgreSQLの識別子上限）
pub const MAX_DATABASE_NAME_LENGTH: usize = 63;

/// 命名プロファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingProfile {
    pub app_name: String,
    pub config_path: String,
    pub state_dir: String,
    pub binary_name: String,
}

/// 命名ポリシー
pub trait NamingPolicy {
    fn current() -> NamingProfile;
}

/// 既定の命名ポリシー
pub struct DefaultNamingPolicy;

impl NamingPolicy for DefaultNamingPolicy {
    fn current() -> NamingProfile {
        NamingProfile {
            app_name: APP_NAME.to_string(),
            config_path: CONFIG_FILE.to_string(),
            state_dir: STATE_DIR.to_string(),
            binary_name: BINARY_NAME.to_string(),
        }
    }
}

/// 新しい対象データベース名を生成
///
/// `schema_` にハイフンをアンダースコアへ置換したUUID v4を連結します。
pub fn generate_database_name() -> String {
    database_name_for(Uuid::new_v4())
}

/// 指定したUUIDから対象データベース名を組み立てる
pub fn database_name_for(id: Uuid) -> String {
    format!(
        "{}{}",
        DATABASE_NAME_PREFIX,
        id.to_string().replace('-', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_naming_profile() {
        let profile = DefaultNamingPolicy::current();

        assert_eq!(profile.app_name, "schemata");
        assert_eq!(profile.config_path, ".schemata.yaml");
        assert_eq!(profile.state_dir, ".schemata");
        assert_eq!(profile.binary_name, "schemata");
    }

    #[test]
    fn test_database_name_for_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            database_name_for(id),
            "schema_550e8400_e29b_41d4_a716_446655440000"
        );
    }

    #[test]
    fn test_generated_database_names_are_unique_and_bounded() {
        let first = generate_database_name();
        let second = generate_database_name();

        assert_ne!(first, second);
        assert!(first.starts_with(DATABASE_NAME_PREFIX));
        assert!(!first.contains('-'));
        assert!(first.len() <= MAX_DATABASE_NAME_LENGTH);
    }
}
