// ── Provider families ──
//
// One module per server plugin category: the family marker, its field
// union, the desired-state record shared by every implementation, and the
// concrete implementations the provider exposes as dedicated resources.

pub mod custom_format_condition;
pub mod download_client;
pub mod import_list;
pub mod indexer;
pub mod metadata;
pub mod notification;
