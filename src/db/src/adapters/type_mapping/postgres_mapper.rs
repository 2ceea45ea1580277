// PostgreSQL用型マッパー

use super::{TypeMapper, TypeParams};
use crate::core::schema::DataType;

/// VARCHARの既定長
const DEFAULT_VARCHAR_LENGTH: i32 = 255;

/// DECIMALの既定精度
const DEFAULT_DECIMAL_PRECISION: i32 = 10;

/// DECIMALの既定スケール
const DEFAULT_DECIMAL_SCALE: i32 = 2;

/// PostgreSQL用型マッパー
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresTypeMapper;

impl TypeMapper for PostgresTypeMapper {
    fn format_sql_type(
        &self,
        data_type: DataType,
        params: &TypeParams,
        auto_increment: bool,
    ) -> String {
        match data_type {
            DataType::INT => {
                if auto_increment {
                    "SERIAL".to_string()
                } else {
                    "INTEGER".to_string()
                }
            }
            DataType::BIGINT => {
                if auto_increment {
                    "BIGSERIAL".to_string()
                } else {
                    "BIGINT".to_string()
                }
            }
            DataType::VARCHAR => {
                // 未指定または0以下は既定長
                let length = params
                    .length
                    .filter(|l| *l > 0)
                    .unwrap_or(DEFAULT_VARCHAR_LENGTH);
                format!("VARCHAR({})", length)
            }
            DataType::TEXT => "TEXT".to_string(),
            DataType::BOOLEAN => "BOOLEAN".to_string(),
            DataType::TIMESTAMP => "TIMESTAMP WITH TIME ZONE".to_string(),
            DataType::DATE => "DATE".to_string(),
            DataType::TIME => "TIME".to_string(),
            DataType::DECIMAL => format!(
                "DECIMAL({},{})",
                params.precision.unwrap_or(DEFAULT_DECIMAL_PRECISION),
                params.scale.unwrap_or(DEFAULT_DECIMAL_SCALE)
            ),
            DataType::FLOAT => "REAL".to_string(),
            DataType::DOUBLE => "DOUBLE PRECISION".to_string(),
            DataType::JSON => "JSONB".to_string(),
            DataType::UUID => "UUID".to_string(),
        }
    }

    fn implicit_default(&self, data_type: DataType) -> Option<&'static str> {
        match data_type {
            DataType::TIMESTAMP => Some("CURRENT_TIMESTAMP"),
            DataType::UUID => Some("gen_random_uuid()"),
            _ => None,
        }
    }
}
