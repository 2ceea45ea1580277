// 型マッピングサービス
//
// スキーマ記述のデータ型名と数値パラメータから、
// SQL型式と暗黙のデフォルト式を導出します。

mod postgres_mapper;

pub use postgres_mapper::PostgresTypeMapper;

use crate::core::schema::{Column, DataType};
use tracing::warn;

/// 型パラメータ
///
/// カラム定義から取り出した長さ・精度・スケール。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeParams {
    /// 文字列型の最大長
    pub length: Option<i32>,
    /// 数値型の精度
    pub precision: Option<i32>,
    /// 数値型の小数点以下桁数
    pub scale: Option<i32>,
}

impl TypeParams {
    /// カラム定義から型パラメータを取得
    pub fn from_column(column: &Column) -> Self {
        Self {
            length: column.length,
            precision: column.precision,
            scale: column.scale,
        }
    }
}

/// 型マッピング結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// SQL型式（例: "VARCHAR(255)", "SERIAL"）
    pub sql_type: String,
    /// 明示的なデフォルト値がない場合に使う式
    pub implicit_default: Option<&'static str>,
}

/// 方言固有の型マッピング
///
/// 各データベース方言固有の型変換ロジックを提供するトレイト。
pub trait TypeMapper: Send + Sync {
    /// DataTypeからSQL型文字列へ変換
    ///
    /// # Arguments
    /// * `data_type` - 変換対象のデータ型
    /// * `params` - 長さ・精度・スケール
    /// * `auto_increment` - 自動増分フラグ（整数型以外では無視される）
    ///
    /// # Returns
    /// SQL型文字列
    fn format_sql_type(&self, data_type: DataType, params: &TypeParams, auto_increment: bool)
        -> String;

    /// データ型に付随する暗黙のデフォルト式
    fn implicit_default(&self, data_type: DataType) -> Option<&'static str>;

    /// デフォルト型（未知のデータ型のフォールバック）
    fn default_type(&self) -> &'static str {
        "TEXT"
    }

    /// カラム定義をマッピング
    ///
    /// 未知のデータ型は検証漏れとして警告を出し、デフォルト型にフォールバックします。
    fn map_column(&self, column: &Column) -> MappedType {
        match column.parsed_data_type() {
            Some(data_type) => MappedType {
                sql_type: self.format_sql_type(
                    data_type,
                    &TypeParams::from_column(column),
                    column.auto_increment,
                ),
                implicit_default: self.implicit_default(data_type),
            },
            None => {
                warn!(
                    column = %column.name,
                    data_type = %column.data_type,
                    fallback = self.default_type(),
                    "Unknown data type reached the type mapper"
                );
                MappedType {
                    sql_type: self.default_type().to_string(),
                    implicit_default: None,
                }
            }
        }
    }
}
