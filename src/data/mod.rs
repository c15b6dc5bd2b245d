//! Data modules: typed records, the site registry, and durable reconciliation.
//!
//! ## Static Data
//! - `sites`: monitored site definitions
//! - `seed`: deterministic demo dataset for empty stores
//!
//! ## Report Store
//!
//! Records are created only by the ingestion pipeline, never updated in
//! place, and soft-deleted through append-only id ledgers. The reconciler
//! mirrors its in-memory collections into a key-value store handle.
//!
//! ### Key Types
//! - `ReportType`: Which of the four report shapes a row maps to
//! - `ReportRecord`: Tagged union over the four record shapes
//! - `UploadManifestEntry`: One entry per successful ingestion
//! - `IngestStamp`: Timestamp + sequence identifying one ingestion
//!
//! ### Storage Hierarchy
//! ```text
//! KeyValueStore "spellcheck-workbench/reports"
//! ├── report-data          - full record collection
//! ├── upload-manifest      - ingestion manifest entries
//! ├── deleted-record-ids   - soft-delete ledger (records)
//! └── deleted-manifest-ids - soft-delete ledger (manifest)
//! ```

pub mod filter;
pub mod keys;
pub mod records;
pub mod seed;
pub mod sites;
pub mod store;

// Re-export static site data
pub use sites::{all_sites_sorted, get_site, Site, SITES};

// Re-export record and store types
pub use filter::*;
pub use keys::*;
pub use records::*;
pub use store::*;
