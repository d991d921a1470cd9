//! The built-in pet catalog.
//!
//! Every pet belongs to one of five volumes. A pet's item key, namespace and
//! permission node are all derived from its id and volume by [`derive_meta`].

use super::{DefaultPetKeys, PetKeyData};
use crate::keys::{KeyError, NamespacedKey};
use once_cell::sync::Lazy;
use std::fmt;

pub const PERMISSION_PREFIX: &str = "mcpets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Volume {
    Vol1,
    Vol2,
    Vol3,
    Vol4,
    Vol5,
}

impl Volume {
    pub const ALL: [Volume; 5] = [
        Volume::Vol1,
        Volume::Vol2,
        Volume::Vol3,
        Volume::Vol4,
        Volume::Vol5,
    ];

    pub fn number(self) -> u8 {
        match self {
            Volume::Vol1 => 1,
            Volume::Vol2 => 2,
            Volume::Vol3 => 3,
            Volume::Vol4 => 4,
            Volume::Vol5 => 5,
        }
    }

    pub fn namespace(self) -> String {
        format!("am_fantasypets_vol{}", self.number())
    }

    /// Volume 5 icons dropped the `pet_` infix.
    fn item_key(self, id: &str) -> String {
        match self {
            Volume::Vol5 => format!("am_icon_{id}"),
            _ => format!("am_icon_pet_{id}"),
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vol.{}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetMeta {
    pub item_key: NamespacedKey,
    pub permission: String,
}

pub fn derive_meta(volume: Volume, id: &str) -> Result<PetMeta, KeyError> {
    let item_key = NamespacedKey::new(volume.namespace(), volume.item_key(id))?;
    Ok(PetMeta {
        item_key,
        permission: format!("{PERMISSION_PREFIX}.am_pet_{id}"),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultPetNode {
    // Vol.1
    Kitsune,
    Owlbear,
    Shadowbeak,
    // Vol.2
    Diggler,
    Faeli,
    Sniffler,
    // Vol.3
    Leafling,
    Quacku,
    Rodeer,
    // Vol.4
    Otterly,
    Emberna,
    Hamtera,
    // Vol.5
    Beepu,
    Gemling,
    Skel,
}

static META_TABLE: Lazy<Vec<PetMeta>> = Lazy::new(|| {
    DefaultPetNode::ALL
        .iter()
        .map(|node| {
            derive_meta(node.volume(), node.id()).expect("built-in pet ids are valid key paths")
        })
        .collect()
});

impl DefaultPetNode {
    /// Catalog order: Vol.1 through Vol.5.
    pub const ALL: [DefaultPetNode; 15] = [
        DefaultPetNode::Kitsune,
        DefaultPetNode::Owlbear,
        DefaultPetNode::Shadowbeak,
        DefaultPetNode::Diggler,
        DefaultPetNode::Faeli,
        DefaultPetNode::Sniffler,
        DefaultPetNode::Leafling,
        DefaultPetNode::Quacku,
        DefaultPetNode::Rodeer,
        DefaultPetNode::Otterly,
        DefaultPetNode::Emberna,
        DefaultPetNode::Hamtera,
        DefaultPetNode::Beepu,
        DefaultPetNode::Gemling,
        DefaultPetNode::Skel,
    ];

    pub fn id(self) -> &'static str {
        use DefaultPetNode::*;
        match self {
            Kitsune => "kitsune",
            Owlbear => "owlbear",
            Shadowbeak => "shadowbeak",
            Diggler => "diggler",
            Faeli => "faeli",
            Sniffler => "sniffler",
            Leafling => "leafling",
            Quacku => "quacku",
            Rodeer => "rodeer",
            Otterly => "otterly",
            Emberna => "emberna",
            Hamtera => "hamtera",
            Beepu => "beepu",
            Gemling => "gemling",
            Skel => "skel",
        }
    }

    pub fn volume(self) -> Volume {
        use DefaultPetNode::*;
        match self {
            Kitsune | Owlbear | Shadowbeak => Volume::Vol1,
            Diggler | Faeli | Sniffler => Volume::Vol2,
            Leafling | Quacku | Rodeer => Volume::Vol3,
            Otterly | Emberna | Hamtera => Volume::Vol4,
            Beepu | Gemling | Skel => Volume::Vol5,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn meta(self) -> &'static PetMeta {
        &META_TABLE[self.index()]
    }

    pub fn namespaced(self) -> &'static NamespacedKey {
        &self.meta().item_key
    }

    pub fn has_permission_node(self, node: &str) -> bool {
        self.meta().permission.eq_ignore_ascii_case(node)
    }

    pub fn from_permission(permission: &str) -> Option<DefaultPetNode> {
        Self::ALL
            .into_iter()
            .find(|node| node.has_permission_node(permission))
    }

    pub fn from_item_key(item_key: &NamespacedKey) -> Option<DefaultPetNode> {
        Self::ALL
            .into_iter()
            .find(|node| node.namespaced() == item_key)
    }

    pub fn to_pet_key(self) -> PetKeyData {
        let meta = self.meta();
        PetKeyData {
            key: meta.item_key.key().to_string(),
            namespace: meta.item_key.namespace().to_string(),
            permission: meta.permission.clone(),
        }
    }
}

impl fmt::Display for DefaultPetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.volume())
    }
}

/// Supplies the catalog as the registry's built-in pet keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogPetKeys;

impl DefaultPetKeys for CatalogPetKeys {
    fn default_pet_keys(&self) -> Vec<PetKeyData> {
        DefaultPetNode::ALL
            .into_iter()
            .map(DefaultPetNode::to_pet_key)
            .collect()
    }
}
