// Notifications: `notification`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::NotificationHeader;

use crate::generic::{
    FamilyItem, GenericItem, GenericSettings, Identity, ProviderFamily, Settings, UnionBag,
};
use crate::{concrete_settings, field_bag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications;

impl ProviderFamily for Notifications {
    type Header = NotificationHeader;
    type Fields = NotificationFields;

    const ENDPOINT: &'static str = endpoint::NOTIFICATION;
    const TYPE_NAME: &'static str = "notification";
    const PLURAL: &'static str = "notifications";
    const TAGGED: bool = true;
    const SENSITIVE: &'static [&'static str] = &[
        "password",
        "apiKey",
        "token",
        "botToken",
        "accessToken",
        "webHookUrl",
    ];
}

field_bag! {
    pub struct NotificationFields {
        url: String = "url",
        method: i64 = "method",
        web_hook_url: String = "webHookUrl",
        avatar: String = "avatar",
        author: String = "author",
        grab_fields: Vec<i64> = "grabFields",
        import_fields: Vec<i64> = "importFields",
        manual_interaction_fields: Vec<i64> = "manualInteractionFields",
        server: String = "server",
        port: i64 = "port",
        use_encryption: i64 = "useEncryption",
        from: String = "from",
        to: Vec<String> = "to",
        cc: Vec<String> = "cc",
        bcc: Vec<String> = "bcc",
        username: String = "username",
        password: String = "password",
        api_key: String = "apiKey",
        token: String = "token",
        bot_token: String = "botToken",
        access_token: String = "accessToken",
        chat_id: String = "chatId",
        topic_id: i64 = "topicId",
        send_silently: bool = "sendSilently",
        priority: i64 = "priority",
        device_ids: Vec<String> = "deviceIds",
        channel: String = "channel",
        icon: String = "icon",
        path: String = "path",
        arguments: String = "arguments",
        host: String = "host",
        use_ssl: bool = "useSsl",
        notify: bool = "notify",
        update_library: bool = "updateLibrary",
        clean_library: bool = "cleanLibrary",
        always_update: bool = "alwaysUpdate",
        display_time: i64 = "displayTime",
    }
}

impl UnionBag for NotificationFields {
    type Family = Notifications;
}

// ── Desired state ────────────────────────────────────────────────────

/// The trigger set is always sent in full as the user declared it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification<S> {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub on_grab: bool,
    #[serde(default)]
    pub on_download: bool,
    #[serde(default)]
    pub on_upgrade: bool,
    #[serde(default)]
    pub on_import_complete: bool,
    #[serde(default)]
    pub on_rename: bool,
    #[serde(default)]
    pub on_series_add: bool,
    #[serde(default)]
    pub on_series_delete: bool,
    #[serde(default)]
    pub on_episode_file_delete: bool,
    #[serde(default)]
    pub on_episode_file_delete_for_upgrade: bool,
    #[serde(default)]
    pub on_health_issue: bool,
    #[serde(default)]
    pub on_health_restored: bool,
    #[serde(default)]
    pub on_application_update: bool,
    #[serde(default)]
    pub on_manual_interaction_required: bool,
    #[serde(default)]
    pub include_health_warnings: bool,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
    #[serde(flatten)]
    pub settings: S,
}

impl<S: Settings<Family = Notifications>> FamilyItem for Notification<S> {
    type Family = Notifications;

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

    fn to_generic(&self) -> GenericItem<Notifications> {
        let identity = self.settings.identity();
        GenericItem {
            id: self.id,
            name: self.name.clone(),
            fields: self.settings.to_union(&identity.implementation),
            tags: self.tags.clone(),
            header: NotificationHeader {
                on_grab: self.on_grab,
                on_download: self.on_download,
                on_upgrade: self.on_upgrade,
                on_import_complete: self.on_import_complete,
                on_rename: self.on_rename,
                on_series_add: self.on_series_add,
                on_series_delete: self.on_series_delete,
                on_episode_file_delete: self.on_episode_file_delete,
                on_episode_file_delete_for_upgrade: self.on_episode_file_delete_for_upgrade,
                on_health_issue: self.on_health_issue,
                on_health_restored: self.on_health_restored,
                on_application_update: self.on_application_update,
                on_manual_interaction_required: self.on_manual_interaction_required,
                include_health_warnings: self.include_health_warnings,
            },
            implementation: identity.implementation,
            config_contract: identity.config_contract,
        }
    }

    fn from_generic(item: &GenericItem<Notifications>) -> Self {
        let identity = Identity::of(item, "");
        let h = &item.header;
        Self {
            id: item.id,
            name: item.name.clone(),
            on_grab: h.on_grab,
            on_download: h.on_download,
            on_upgrade: h.on_upgrade,
            on_import_complete: h.on_import_complete,
            on_rename: h.on_rename,
            on_series_add: h.on_series_add,
            on_series_delete: h.on_series_delete,
            on_episode_file_delete: h.on_episode_file_delete,
            on_episode_file_delete_for_upgrade: h.on_episode_file_delete_for_upgrade,
            on_health_issue: h.on_health_issue,
            on_health_restored: h.on_health_restored,
            on_application_update: h.on_application_update,
            on_manual_interaction_required: h.on_manual_interaction_required,
            include_health_warnings: h.include_health_warnings,
            tags: item.tags.clone(),
            settings: S::from_union(&identity, &item.fields),
        }
    }
}

// ── Implementations ──────────────────────────────────────────────────

pub type GenericNotification = Notification<GenericSettings<NotificationFields>>;

field_bag! {
    pub struct DiscordSettings {
        web_hook_url: String = "webHookUrl",
        username: String = "username",
        avatar: String = "avatar",
        author: String = "author",
        grab_fields: Vec<i64> = "grabFields",
        import_fields: Vec<i64> = "importFields",
        manual_interaction_fields: Vec<i64> = "manualInteractionFields",
    }
}

concrete_settings! {
    DiscordSettings for Notifications {
        type_name: "notification_discord",
        implementation: "Discord",
        config_contract: "DiscordSettings",
        discriminator: None,
        sensitive: ["webHookUrl"],
    }
}

pub type DiscordNotification = Notification<DiscordSettings>;

field_bag! {
    pub struct WebhookSettings {
        url: String = "url",
        method: i64 = "method",
        username: String = "username",
        password: String = "password",
    }
}

concrete_settings! {
    WebhookSettings for Notifications {
        type_name: "notification_webhook",
        implementation: "Webhook",
        config_contract: "WebhookSettings",
        discriminator: None,
        sensitive: ["password"],
    }
}

pub type WebhookNotification = Notification<WebhookSettings>;

field_bag! {
    pub struct EmailSettings {
        server: String = "server",
        port: i64 = "port",
        use_encryption: i64 = "useEncryption",
        username: String = "username",
        password: String = "password",
        from: String = "from",
        to: Vec<String> = "to",
        cc: Vec<String> = "cc",
        bcc: Vec<String> = "bcc",
    }
}

concrete_settings! {
    EmailSettings for Notifications {
        type_name: "notification_email",
        implementation: "Email",
        config_contract: "EmailSettings",
        discriminator: None,
        sensitive: ["password"],
    }
}

pub type EmailNotification = Notification<EmailSettings>;
