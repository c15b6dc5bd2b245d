//! Persistence reconciler for report data.
//!
//! [`ReportStore`] owns the authoritative in-memory record and manifest
//! collections and mirrors them into a [`KeyValueStore`] handle injected at
//! construction. The durable layout is four logical keys:
//!
//! ```text
//! report-data           - full record collection
//! upload-manifest       - one entry per successful ingestion
//! deleted-record-ids    - append-only soft-delete ledger
//! deleted-manifest-ids  - append-only soft-delete ledger
//! ```
//!
//! Deletion is logical: an id enters its ledger (persisted immediately) and
//! the matching item is spliced out of the in-memory collection, so the
//! collections written by `save` are already compacted. The ledgers only
//! grow; applying them on load is a pure set-difference over whatever the
//! durable collections contain. Every mutating operation persists
//! synchronously before returning; write volume is human-upload-rate, so
//! there is no batching or write-behind.

use crate::data::keys::UnixMillis;
use crate::data::records::{ReportRecord, UploadManifestEntry};
use crate::data::seed;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info};
use std::collections::HashSet;

/// Durable key holding the serialized record collection.
pub const KEY_REPORT_DATA: &str = "report-data";
/// Durable key holding the serialized manifest collection.
pub const KEY_UPLOAD_MANIFEST: &str = "upload-manifest";
/// Durable key holding the deleted-record-id ledger.
pub const KEY_DELETED_RECORD_IDS: &str = "deleted-record-ids";
/// Durable key holding the deleted-manifest-id ledger.
pub const KEY_DELETED_MANIFEST_IDS: &str = "deleted-manifest-ids";

/// The authoritative report collection, reconciled against durable storage.
pub struct ReportStore<S: KeyValueStore> {
    store: S,
    records: Vec<ReportRecord>,
    manifest: Vec<UploadManifestEntry>,
    deleted_record_ids: HashSet<String>,
    deleted_manifest_ids: HashSet<String>,
}

impl<S: KeyValueStore> ReportStore<S> {
    /// Loads persisted state from `store`, seeding the demo dataset if the
    /// durable collections don't exist yet.
    ///
    /// Idempotent and tolerant of a completely empty store. Soft-deleted
    /// ids are excluded from the in-memory collections here and never
    /// resurface.
    pub async fn load(store: S) -> Result<Self, StorageError> {
        let persisted_records: Option<Vec<ReportRecord>> = store.get(KEY_REPORT_DATA).await?;
        let persisted_manifest: Option<Vec<UploadManifestEntry>> =
            store.get(KEY_UPLOAD_MANIFEST).await?;
        let deleted_record_ids: HashSet<String> = store
            .get(KEY_DELETED_RECORD_IDS)
            .await?
            .unwrap_or_default();
        let deleted_manifest_ids: HashSet<String> = store
            .get(KEY_DELETED_MANIFEST_IDS)
            .await?
            .unwrap_or_default();

        let (records, manifest) = match (persisted_records, persisted_manifest) {
            (None, None) => {
                info!("no persisted report collections, seeding demo dataset");
                let today = UnixMillis::now().to_naive_date();
                let (records, manifest) = seed::demo_dataset(today);
                store.put(KEY_REPORT_DATA, &records).await?;
                store.put(KEY_UPLOAD_MANIFEST, &manifest).await?;
                (records, manifest)
            }
            (records, manifest) => (
                records.unwrap_or_default(),
                manifest.unwrap_or_default(),
            ),
        };

        let visible_records: Vec<ReportRecord> = records
            .into_iter()
            .filter(|record| !deleted_record_ids.contains(record.id()))
            .collect();
        let visible_manifest: Vec<UploadManifestEntry> = manifest
            .into_iter()
            .filter(|entry| !deleted_manifest_ids.contains(&entry.id))
            .collect();

        debug!(
            "loaded {} records, {} manifest entries ({} + {} ids tombstoned)",
            visible_records.len(),
            visible_manifest.len(),
            deleted_record_ids.len(),
            deleted_manifest_ids.len()
        );

        Ok(Self {
            store,
            records: visible_records,
            manifest: visible_manifest,
            deleted_record_ids,
            deleted_manifest_ids,
        })
    }

    /// The visible record collection, in insertion order.
    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    /// The visible manifest collection, in ingestion order.
    pub fn manifest(&self) -> &[UploadManifestEntry] {
        &self.manifest
    }

    /// Appends freshly normalized records and their manifest entry, then
    /// persists. Returns the number of records inserted.
    pub async fn ingest(
        &mut self,
        records: Vec<ReportRecord>,
        entry: UploadManifestEntry,
    ) -> Result<usize, StorageError> {
        let inserted = records.len();
        self.records.extend(records);
        self.manifest.push(entry);
        self.save().await?;
        info!("ingested {} records ({} total)", inserted, self.records.len());
        Ok(inserted)
    }

    /// Soft-deletes a single record.
    pub async fn delete_record(&mut self, id: &str) -> Result<(), StorageError> {
        self.delete_records([id.to_string()]).await
    }

    /// Soft-deletes a batch of records.
    ///
    /// Ids enter the ledger (persisted first), then matching records are
    /// spliced out of memory and the collections saved. Deleting an id that
    /// is already tombstoned or never existed is a no-op.
    pub async fn delete_records<I>(&mut self, ids: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = String>,
    {
        self.deleted_record_ids.extend(ids);
        self.store
            .put(KEY_DELETED_RECORD_IDS, &self.deleted_record_ids)
            .await?;
        self.records
            .retain(|record| !self.deleted_record_ids.contains(record.id()));
        self.save().await
    }

    /// Soft-deletes a manifest entry.
    pub async fn delete_manifest_entry(&mut self, id: &str) -> Result<(), StorageError> {
        self.deleted_manifest_ids.insert(id.to_string());
        self.store
            .put(KEY_DELETED_MANIFEST_IDS, &self.deleted_manifest_ids)
            .await?;
        self.manifest
            .retain(|entry| !self.deleted_manifest_ids.contains(&entry.id));
        self.save().await
    }

    /// Clears all durable state, reseeds the demo dataset, and resets
    /// in-memory state to match.
    pub async fn reset(&mut self) -> Result<(), StorageError> {
        info!("resetting store to demo dataset");
        self.store.clear().await?;

        let today = UnixMillis::now().to_naive_date();
        let (records, manifest) = seed::demo_dataset(today);
        self.deleted_record_ids.clear();
        self.deleted_manifest_ids.clear();

        self.store.put(KEY_REPORT_DATA, &records).await?;
        self.store.put(KEY_UPLOAD_MANIFEST, &manifest).await?;
        self.store
            .put(KEY_DELETED_RECORD_IDS, &self.deleted_record_ids)
            .await?;
        self.store
            .put(KEY_DELETED_MANIFEST_IDS, &self.deleted_manifest_ids)
            .await?;

        self.records = records;
        self.manifest = manifest;
        Ok(())
    }

    /// Writes the in-memory collections back to durable storage.
    async fn save(&self) -> Result<(), StorageError> {
        self.store.put(KEY_REPORT_DATA, &self.records).await?;
        self.store.put(KEY_UPLOAD_MANIFEST, &self.manifest).await?;
        Ok(())
    }
}
