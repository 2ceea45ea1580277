// スキーマ記述ドメインモデル
//
// ユーザーが JSON で記述するテーブル・カラム・外部キーの構造を表現する型システム。
// SchemaData, Table, Column, ForeignKey, DataType, ReferentialAction などを提供します。

use serde::{Deserialize, Serialize};
use std::fmt;

/// スキーマ記述
///
/// 1つの対象データベースに対応する構造の記述全体。
/// テーブルの宣言順は保持されるが、DDLの実行順は常に「テーブル → 外部キー」となる。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaData {
    /// テーブル定義のリスト（宣言順）
    #[serde(default)]
    pub tables: Vec<Table>,

    /// 外部キー定義のリスト（全テーブル作成後に評価）
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// 記述のバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// エクスポート日時（RFC3339文字列）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl SchemaData {
    /// 空のスキーマ記述を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// テーブルを追加
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// 外部キーを追加
    pub fn add_foreign_key(&mut self, foreign_key: ForeignKey) {
        self.foreign_keys.push(foreign_key);
    }

    /// テーブル数を取得
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// 全テーブルのカラム総数を取得
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// IDでテーブルを取得
    pub fn get_table_by_id(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }
}

/// テーブル定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// 不変の識別子（SQL名とは別）
    pub id: String,

    /// SQLテーブル名（上位層でサニタイズ済みの前提）
    pub name: String,

    /// カラム定義のリスト（宣言順）
    #[serde(default)]
    pub columns: Vec<Column>,

    /// UI上の配置（DDLには影響しない）
    #[serde(default)]
    pub position: Position,

    /// インデックス定義（保存のみ、DDLには出力しない）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
}

impl Table {
    /// 新しいテーブルを作成
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            columns: Vec::new(),
            position: Position::default(),
            indexes: Vec::new(),
        }
    }

    /// カラムを追加
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// プライマリキーのカラム名をテーブル内の順序で取得
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// プライマリキーが定義されているか
    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.primary_key)
    }

    /// IDでカラムを取得
    pub fn get_column_by_id(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }
}

/// UI上のテーブル配置
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// インデックス定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// カラム定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// 不変の識別子
    pub id: String,

    /// SQLカラム名
    pub name: String,

    /// データ型名（未知の値も保持し、検証で報告する）
    pub data_type: String,

    /// 可変長文字列の最大長
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i32>,

    /// 固定小数点数の全体桁数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,

    /// 固定小数点数の小数点以下桁数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,

    /// NULL許可フラグ
    #[serde(default)]
    pub nullable: bool,

    /// プライマリキーフラグ
    #[serde(default)]
    pub primary_key: bool,

    /// 自動増分フラグ（INT/BIGINTでのみ意味を持つ）
    #[serde(default)]
    pub auto_increment: bool,

    /// UNIQUE制約フラグ
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,

    /// デフォルト値
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Column {
    /// 新しいカラムを作成
    pub fn new(id: String, name: String, data_type: String, nullable: bool) -> Self {
        Self {
            id,
            name,
            data_type,
            length: None,
            precision: None,
            scale: None,
            nullable,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default_value: None,
        }
    }

    /// データ型を解釈する（未対応の型名はNone）
    pub fn parsed_data_type(&self) -> Option<DataType> {
        DataType::parse(&self.data_type)
    }

    /// 明示的なデフォルト値を取得
    ///
    /// 空文字列はDEFAULT句を出力しない値として扱います（暗黙のデフォルトも抑止されます）。
    pub fn explicit_default(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref().filter(|v| !v.is_empty_text())
    }
}

/// カラムのデフォルト値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// 真偽値
    Bool(bool),
    /// 数値（入力の表記をそのまま保持）
    Number(serde_json::Number),
    /// 文字列
    Text(String),
}

impl DefaultValue {
    /// 空文字列かどうか
    pub fn is_empty_text(&self) -> bool {
        matches!(self, DefaultValue::Text(s) if s.is_empty())
    }
}

/// サポートされるデータ型
///
/// ここに含まれない型名は検証エラーとなります。
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    INT,
    BIGINT,
    VARCHAR,
    TEXT,
    BOOLEAN,
    TIMESTAMP,
    DATE,
    TIME,
    DECIMAL,
    FLOAT,
    DOUBLE,
    JSON,
    UUID,
}

impl DataType {
    /// 全データ型（宣言順）
    pub const ALL: [DataType; 13] = [
        DataType::INT,
        DataType::BIGINT,
        DataType::VARCHAR,
        DataType::TEXT,
        DataType::BOOLEAN,
        DataType::TIMESTAMP,
        DataType::DATE,
        DataType::TIME,
        DataType::DECIMAL,
        DataType::FLOAT,
        DataType::DOUBLE,
        DataType::JSON,
        DataType::UUID,
    ];

    /// 型名から解釈（大文字小文字は区別する）
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// 型名を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::INT => "INT",
            DataType::BIGINT => "BIGINT",
            DataType::VARCHAR => "VARCHAR",
            DataType::TEXT => "TEXT",
            DataType::BOOLEAN => "BOOLEAN",
            DataType::TIMESTAMP => "TIMESTAMP",
            DataType::DATE => "DATE",
            DataType::TIME => "TIME",
            DataType::DECIMAL => "DECIMAL",
            DataType::FLOAT => "FLOAT",
            DataType::DOUBLE => "DOUBLE",
            DataType::JSON => "JSON",
            DataType::UUID => "UUID",
        }
    }

    /// 自動増分に対応する整数型か
    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::INT | DataType::BIGINT)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部キーの参照アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferentialAction {
    Cascade,
    #[default]
    Restrict,
    SetNull,
    NoAction,
}

impl ReferentialAction {
    /// 文字列から解釈（未知の値はNone）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CASCADE" => Some(ReferentialAction::Cascade),
            "RESTRICT" => Some(ReferentialAction::Restrict),
            "SET NULL" => Some(ReferentialAction::SetNull),
            "NO ACTION" => Some(ReferentialAction::NoAction),
            _ => None,
        }
    }

    /// 未指定・不正値をRESTRICTに寄せて解決
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// SQL表記を取得
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// 外部キー定義
///
/// テーブル・カラムは名前ではなくIDで参照します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub id: String,

    /// 制約名（未指定時は fk_<参照元テーブル>_<参照元カラム>）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub source_table_id: String,
    pub source_column_id: String,
    pub target_table_id: String,
    pub target_column_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

impl ForeignKey {
    /// ON DELETE アクションを解決
    pub fn on_delete_action(&self) -> ReferentialAction {
        ReferentialAction::resolve(self.on_delete.as_deref())
    }

    /// ON UPDATE アクションを解決
    pub fn on_update_action(&self) -> ReferentialAction {
        ReferentialAction::resolve(self.on_update.as_deref())
    }

    /// 明示的な制約名を取得（空文字列は未指定扱い）
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}
