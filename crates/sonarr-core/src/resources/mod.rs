// ── Plain resources ──
//
// Server entities with a fixed wire shape (no `fields` bag). Each state
// struct is its own `ManagedResource`.

pub mod config;
pub mod host;
pub mod library;
pub mod profile;

pub use config::{IndexerConfig, MediaManagement, Naming, QualityDefinition, QualityDefinitions};
pub use host::{Authentication, Backup, Host, Logging, Proxy, Ssl, Update};
pub use library::{RemotePathMapping, RootFolder, Tag, UnmappedFolder};
pub use profile::{
    CustomFormat, FormatItem, QualityGroup, QualityProfile, QualityRef, ReleaseProfile,
};

/// Keep `baseline` when the server's path differs only in surrounding
/// slashes or whitespace.
pub(crate) fn keep_path_spelling(baseline: &str, fresh: &mut String) {
    let trim = |s: &str| s.trim().trim_end_matches('/').to_owned();
    if *fresh != baseline && trim(fresh) == trim(baseline) {
        baseline.clone_into(fresh);
    }
}
