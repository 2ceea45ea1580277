// スキーマレコードストア
//
// スキーマのメタデータをスキーマIDをキーに保存する。
// インメモリ実装と、状態ディレクトリにレコードごとのJSONファイルを置く実装を提供する。

use crate::core::error::StoreError;
use crate::core::schema_record::SchemaRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// レコードファイルを置くサブディレクトリ
const SCHEMAS_DIR: &str = "schemas";

/// スキーマレコードリポジトリ
///
/// 名前は所有者ごとに一意です。
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// レコードを保存（名前の重複はエラー）
    async fn create(&self, record: &SchemaRecord) -> Result<(), StoreError>;

    /// IDと所有者でレコードを取得
    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid)
        -> Result<SchemaRecord, StoreError>;

    /// 名前と所有者でレコードを検索
    async fn get_by_name_and_owner(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Option<SchemaRecord>, StoreError>;

    /// 所有者のレコード一覧（更新日時の降順）
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SchemaRecord>, StoreError>;

    /// レコードを上書き
    async fn update(&self, record: &SchemaRecord) -> Result<(), StoreError>;

    /// IDと所有者でレコードを削除
    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError>;
}

/// 更新日時の降順に並べる
fn sort_by_updated_desc(records: &mut [SchemaRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// 他レコードとの名前重複を確認
fn ensure_unique_name<'a>(
    mut existing: impl Iterator<Item = &'a SchemaRecord>,
    record: &SchemaRecord,
) -> Result<(), StoreError> {
    let conflict = existing.any(|r| {
        r.id != record.id && r.owner_id == record.owner_id && r.name == record.name
    });
    if conflict {
        return Err(StoreError::DuplicateName {
            name: record.name.clone(),
        });
    }
    Ok(())
}

/// インメモリのスキーマレコードリポジトリ
#[derive(Debug, Default)]
pub struct InMemorySchemaRepository {
    records: RwLock<HashMap<Uuid, SchemaRecord>>,
}

impl InMemorySchemaRepository {
    /// 新しいInMemorySchemaRepositoryを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchemaRepository for InMemorySchemaRepository {
    async fn create(&self, record: &SchemaRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        ensure_unique_name(records.values(), record)?;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<SchemaRecord, StoreError> {
        let records = self.records.read().await;
        records
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn get_by_name_and_owner(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Option<SchemaRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.owner_id == owner_id && r.name == name)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SchemaRecord>, StoreError> {
        let records = self.records.read().await;
        let mut owned: Vec<SchemaRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        sort_by_updated_desc(&mut owned);
        Ok(owned)
    }

    async fn update(&self, record: &SchemaRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.get(&record.id) {
            Some(existing) if existing.owner_id == record.owner_id => {}
            _ => {
                return Err(StoreError::NotFound {
                    id: record.id.to_string(),
                })
            }
        }
        ensure_unique_name(records.values(), record)?;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(existing) if existing.owner_id == owner_id => {
                records.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }
}

/// ファイルベースのスキーマレコードリポジトリ
///
/// `<state_dir>/schemas/<id>.json` にレコードを整形JSONで保存します。
/// プロセス内の書き込みはロックで直列化されます。
#[derive(Debug)]
pub struct FileSchemaRepository {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl FileSchemaRepository {
    /// 状態ディレクトリを指定して作成
    pub fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.join(SCHEMAS_DIR),
            lock: RwLock::new(()),
        }
    }

    /// レコードの保存ディレクトリ
    pub fn records_dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn io_error(path: &Path, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            cause: e.to_string(),
        }
    }

    async fn read_record(&self, path: &Path) -> Result<SchemaRecord, StoreError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Self::io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Serialization {
            cause: format!("{}: {}", path.display(), e),
        })
    }

    async fn read_all(&self) -> Result<Vec<SchemaRecord>, StoreError> {
        let mut records = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(Self::io_error(&self.dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::io_error(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                records.push(self.read_record(&path).await?);
            }
        }

        Ok(records)
    }

    async fn write_record(&self, record: &SchemaRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::io_error(&self.dir, e))?;

        let content =
            serde_json::to_string_pretty(record).map_err(|e| StoreError::Serialization {
                cause: e.to_string(),
            })?;
        let path = self.record_path(record.id);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| Self::io_error(&path, e))
    }

    async fn load_owned(&self, id: Uuid, owner_id: Uuid) -> Result<SchemaRecord, StoreError> {
        let path = self.record_path(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        let record = self.read_record(&path).await?;
        if record.owner_id != owner_id {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(record)
    }
}

#[async_trait]
impl SchemaRepository for FileSchemaRepository {
    async fn create(&self, record: &SchemaRecord) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        let existing = self.read_all().await?;
        ensure_unique_name(existing.iter(), record)?;
        self.write_record(record).await
    }

    async fn get_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<SchemaRecord, StoreError> {
        let _guard = self.lock.read().await;
        self.load_owned(id, owner_id).await
    }

    async fn get_by_name_and_owner(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Option<SchemaRecord>, StoreError> {
        let _guard = self.lock.read().await;
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .find(|r| r.owner_id == owner_id && r.name == name))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SchemaRecord>, StoreError> {
        let _guard = self.lock.read().await;
        let mut owned: Vec<SchemaRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .collect();
        sort_by_updated_desc(&mut owned);
        Ok(owned)
    }

    async fn update(&self, record: &SchemaRecord) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        self.load_owned(record.id, record.owner_id).await?;
        let existing = self.read_all().await?;
        ensure_unique_name(existing.iter(), record)?;
        self.write_record(record).await
    }

    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        self.load_owned(id, owner_id).await?;
        let path = self.record_path(id);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| Self::io_error(&path, e))
    }
}
