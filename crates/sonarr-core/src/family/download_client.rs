// Download clients: `downloadclient`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::DownloadClientHeader;

use crate::field::Scope;
use crate::generic::{
    FamilyItem, GenericItem, GenericSettings, Identity, ProviderFamily, Settings, UnionBag,
};
use crate::{concrete_settings, field_bag};

/// uTorrent is the one client whose server-side settings spell it `intialState`.
const UTORRENT: &[&str] = &["UTorrent"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadClients;

impl ProviderFamily for DownloadClients {
    type Header = DownloadClientHeader;
    type Fields = DownloadClientFields;

    const ENDPOINT: &'static str = endpoint::DOWNLOAD_CLIENT;
    const TYPE_NAME: &'static str = "download_client";
    const PLURAL: &'static str = "download_clients";
    const TAGGED: bool = true;
    const SENSITIVE: &'static [&'static str] = &["password", "apiKey", "secretToken"];
    const ALIASES: &'static [(&'static str, &'static str)] = &[("intial_state", "initial_state")];
}

field_bag! {
    /// Union of every download client's fields.
    pub struct DownloadClientFields {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        rpc_path: String = "rpcPath",
        username: String = "username",
        password: String = "password",
        api_key: String = "apiKey",
        secret_token: String = "secretToken",
        tv_category: String = "tvCategory",
        tv_imported_category: String = "tvImportedCategory",
        tv_directory: String = "tvDirectory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        initial_state: i64 = "initialState" => Scope::Except(UTORRENT),
        sequential_order: bool = "sequentialOrder",
        first_and_last: bool = "firstAndLast",
        content_layout: i64 = "contentLayout",
        add_paused: bool = "addPaused",
        add_stopped: bool = "addStopped",
        start_on_add: bool = "startOnAdd",
        save_magnet_files: bool = "saveMagnetFiles",
        magnet_file_extension: String = "magnetFileExtension",
        watch_folder: String = "watchFolder",
        nzb_folder: String = "nzbFolder",
        torrent_folder: String = "torrentFolder",
        strm_folder: String = "strmFolder",
        directory: String = "directory",
        destination: String = "destination",
        additional_tags: Vec<i64> = "additionalTags",
        field_tags: Vec<String> = "fieldTags",
        post_import_tags: Vec<String> = "postImportTags",
    }
    aliases {
        initial_state: i64 = "intialState" => Scope::Only(UTORRENT),
    }
}

impl UnionBag for DownloadClientFields {
    type Family = DownloadClients;
}

// ── Desired state ────────────────────────────────────────────────────

/// One download client as the user declares it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClient<S> {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub remove_completed_downloads: bool,
    #[serde(default)]
    pub remove_failed_downloads: bool,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
    #[serde(flatten)]
    pub settings: S,
}

impl<S: Settings<Family = DownloadClients>> FamilyItem for DownloadClient<S> {
    type Family = DownloadClients;

    const TYPE_NAME: &'static str = S::TYPE_NAME;
    const SENSITIVE: &'static [&'static str] = S::SENSITIVE;
    const NORMALIZED: &'static [&'static str] = S::NORMALIZED;
    const ALIASES: &'static [(&'static str, &'static str)] = S::ALIASES;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn to_generic(&self) -> GenericItem<DownloadClients> {
        let identity = self.settings.identity();
        GenericItem {
            id: self.id,
            name: self.name.clone(),
            fields: self.settings.to_union(&identity.implementation),
            tags: self.tags.clone(),
            header: DownloadClientHeader {
                enable: self.enable,
                priority: self.priority,
                protocol: identity.discriminator.unwrap_or_default(),
                remove_completed_downloads: self.remove_completed_downloads,
                remove_failed_downloads: self.remove_failed_downloads,
            },
            implementation: identity.implementation,
            config_contract: identity.config_contract,
        }
    }

    fn from_generic(item: &GenericItem<DownloadClients>) -> Self {
        let identity = Identity::of(item, &item.header.protocol);
        Self {
            id: item.id,
            name: item.name.clone(),
            enable: item.header.enable,
            priority: item.header.priority,
            remove_completed_downloads: item.header.remove_completed_downloads,
            remove_failed_downloads: item.header.remove_failed_downloads,
            tags: item.tags.clone(),
            settings: S::from_union(&identity, &item.fields),
        }
    }
}

// ── Implementations ──────────────────────────────────────────────────

pub type GenericDownloadClient = DownloadClient<GenericSettings<DownloadClientFields>>;

field_bag! {
    pub struct QBittorrentSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        username: String = "username",
        password: String = "password",
        tv_category: String = "tvCategory",
        tv_imported_category: String = "tvImportedCategory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        initial_state: i64 = "initialState",
        sequential_order: bool = "sequentialOrder",
        first_and_last: bool = "firstAndLast",
        content_layout: i64 = "contentLayout",
    }
}

concrete_settings! {
    QBittorrentSettings for DownloadClients {
        type_name: "download_client_qbittorrent",
        implementation: "QBittorrent",
        config_contract: "QBittorrentSettings",
        discriminator: Some("torrent"),
        sensitive: ["password"],
        normalized: ["urlBase"],
    }
}

pub type QBittorrentDownloadClient = DownloadClient<QBittorrentSettings>;

field_bag! {
    pub struct SabnzbdSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        api_key: String = "apiKey",
        username: String = "username",
        password: String = "password",
        tv_category: String = "tvCategory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
    }
}

concrete_settings! {
    SabnzbdSettings for DownloadClients {
        type_name: "download_client_sabnzbd",
        implementation: "Sabnzbd",
        config_contract: "SabnzbdSettings",
        discriminator: Some("usenet"),
        sensitive: ["apiKey", "password"],
        normalized: ["urlBase"],
    }
}

pub type SabnzbdDownloadClient = DownloadClient<SabnzbdSettings>;

field_bag! {
    pub struct TransmissionSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        username: String = "username",
        password: String = "password",
        tv_category: String = "tvCategory",
        tv_directory: String = "tvDirectory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        add_paused: bool = "addPaused",
    }
}

concrete_settings! {
    TransmissionSettings for DownloadClients {
        type_name: "download_client_transmission",
        implementation: "Transmission",
        config_contract: "TransmissionSettings",
        discriminator: Some("torrent"),
        sensitive: ["password"],
        normalized: ["urlBase"],
    }
}

pub type TransmissionDownloadClient = DownloadClient<TransmissionSettings>;

field_bag! {
    pub struct DelugeSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        password: String = "password",
        tv_category: String = "tvCategory",
        tv_imported_category: String = "tvImportedCategory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        add_paused: bool = "addPaused",
    }
}

concrete_settings! {
    DelugeSettings for DownloadClients {
        type_name: "download_client_deluge",
        implementation: "Deluge",
        config_contract: "DelugeSettings",
        discriminator: Some("torrent"),
        sensitive: ["password"],
        normalized: ["urlBase"],
    }
}

pub type DelugeDownloadClient = DownloadClient<DelugeSettings>;

field_bag! {
    pub struct NzbgetSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        username: String = "username",
        password: String = "password",
        tv_category: String = "tvCategory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        add_paused: bool = "addPaused",
    }
}

concrete_settings! {
    NzbgetSettings for DownloadClients {
        type_name: "download_client_nzbget",
        implementation: "Nzbget",
        config_contract: "NzbgetSettings",
        discriminator: Some("usenet"),
        sensitive: ["password"],
        normalized: ["urlBase"],
    }
}

pub type NzbgetDownloadClient = DownloadClient<NzbgetSettings>;

field_bag! {
    pub struct UTorrentSettings {
        host: String = "host",
        port: i64 = "port",
        use_ssl: bool = "useSsl",
        url_base: String = "urlBase",
        username: String = "username",
        password: String = "password",
        tv_category: String = "tvCategory",
        tv_imported_category: String = "tvImportedCategory",
        recent_tv_priority: i64 = "recentTvPriority",
        older_tv_priority: i64 = "olderTvPriority",
        initial_state: i64 = "intialState",
    }
}

concrete_settings! {
    UTorrentSettings for DownloadClients {
        type_name: "download_client_utorrent",
        implementation: "UTorrent",
        config_contract: "UTorrentSettings",
        discriminator: Some("torrent"),
        sensitive: ["password"],
        normalized: ["urlBase"],
        aliases: [("intial_state", "initial_state")],
    }
}

pub type UTorrentDownloadClient = DownloadClient<UTorrentSettings>;
