// Import module: reads simulation output into canonical per-site batches
// This module normalizes the canonical and legacy file schemas and orders frames by timestamp

// ======================== MODULE DECLARATIONS ========================
pub mod canonical;
pub mod filename_order;
pub mod importer;
pub mod legacy;
pub mod site_record;


// ======================== RECORDS ========================
pub use site_record::{
    SiteBatch,  // struct - one timestep: dims, records, schema, source path, timestamp
    SiteRecord, // struct - coords, q5, site_type, order of one lattice site
};

// ======================== READERS ========================
pub use canonical::{
    parse_canonical,   // fn(text: &str, path: &Path) -> Result<SiteBatch> - 10-column rows, dims from last row
    read_canonical,    // fn(path: &Path) -> Result<SiteBatch>
    CANONICAL_COLUMNS, // const - 10
};

pub use legacy::{
    dims_from_filename,    // fn(path: &Path) -> Result<LatticeDims> - `<Lx>x<Ly>x<Lz>` filename token
    infer_stride,          // fn(dims: LatticeDims, rows: usize) -> usize - round(cbrt(volume / rows))
    is_legacy_site_file,   // fn(path: &Path) -> bool - name contains `Qtensor`
    legacy_partner,        // fn(site_file: &Path) -> PathBuf - matching `Qmatrix` file
    parse_legacy,          // fn(site_text, tensor_text, site_file) -> Result<SiteBatch>
    read_legacy_pair,      // fn(site_file: &Path) -> Result<SiteBatch>
};

pub use importer::import_batches; // fn(paths: &[P]) -> Result<Vec<SiteBatch>> - schema detection + fallback

// ======================== FRAME ORDERING ========================
pub use filename_order::{
    expand_patterns,   // fn(patterns: &[S]) -> Result<Vec<PathBuf>> - glob each pattern
    is_domain_tag,     // fn(token: &str) -> bool - `x#y#z#` subdomain tags
    sort_by_timestamp, // fn(paths: &[P]) -> Vec<PathBuf> - ascending timestamp, input order on failure
    timestamp_of,      // fn(path: &Path) -> Option<u64>
};
