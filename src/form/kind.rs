use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Account,
    Property,
    KeyEvent,
    Container,
    Workspace,
    Tag,
    Trigger,
    Variable,
}

pub const ALL_ENTITY_KINDS: [EntityKind; 8] = [
    EntityKind::Account,
    EntityKind::Property,
    EntityKind::KeyEvent,
    EntityKind::Container,
    EntityKind::Workspace,
    EntityKind::Tag,
    EntityKind::Trigger,
    EntityKind::Variable,
];

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Property => "property",
            EntityKind::KeyEvent => "key_event",
            EntityKind::Container => "container",
            EntityKind::Workspace => "workspace",
            EntityKind::Tag => "tag",
            EntityKind::Trigger => "trigger",
            EntityKind::Variable => "variable",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        ALL_ENTITY_KINDS
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                "entity kind must be one of: account, property, key_event, container, workspace, tag, trigger, variable"
                    .to_string()
            })
    }

    /// Human label used in notifications, e.g. "Duplicate key event found".
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Property => "property",
            EntityKind::KeyEvent => "key event",
            EntityKind::Container => "container",
            EntityKind::Workspace => "workspace",
            EntityKind::Tag => "tag",
            EntityKind::Trigger => "trigger",
            EntityKind::Variable => "variable",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Account => "accounts",
            EntityKind::Property => "properties",
            EntityKind::KeyEvent => "key events",
            EntityKind::Container => "containers",
            EntityKind::Workspace => "workspaces",
            EntityKind::Tag => "tags",
            EntityKind::Trigger => "triggers",
            EntityKind::Variable => "variables",
        }
    }

    /// Feature name the subscription backend meters this entity under.
    pub fn feature_name(self) -> &'static str {
        match self {
            EntityKind::Account => "GA4Accounts",
            EntityKind::Property => "GA4Properties",
            EntityKind::KeyEvent => "GA4ConversionEvents",
            EntityKind::Container => "GTMContainer",
            EntityKind::Workspace => "GTMWorkspaces",
            EntityKind::Tag => "GTMTags",
            EntityKind::Trigger => "GTMTriggers",
            EntityKind::Variable => "GTMVariables",
        }
    }

    pub fn api_path(self) -> &'static str {
        match self {
            EntityKind::Account => "ga/accounts",
            EntityKind::Property => "ga/properties",
            EntityKind::KeyEvent => "ga/key-events",
            EntityKind::Container => "gtm/containers",
            EntityKind::Workspace => "gtm/workspaces",
            EntityKind::Tag => "gtm/tags",
            EntityKind::Trigger => "gtm/triggers",
            EntityKind::Variable => "gtm/variables",
        }
    }

    pub fn default_listing_route(self) -> &'static str {
        match self {
            EntityKind::Account => "/dashboard/ga/accounts",
            EntityKind::Property => "/dashboard/ga/properties",
            EntityKind::KeyEvent => "/dashboard/ga/conversions",
            EntityKind::Container => "/dashboard/gtm/containers",
            EntityKind::Workspace => "/dashboard/gtm/workspaces",
            EntityKind::Tag | EntityKind::Trigger | EntityKind::Variable => {
                "/dashboard/gtm/configurations"
            }
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EntityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "entity kind", Self::parse)
    }
}
