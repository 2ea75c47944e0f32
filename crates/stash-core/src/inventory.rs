//! Computer inventory built on the shared descriptor pool
//!
//! Many machines share a make, model and processor; those three fields become
//! one pooled [`Descriptor`] while each machine keeps its own tag and memory
//! size.

use crate::collection::{Collection, Record};
use crate::shared_pool::{Constructor, SharedValuePool};
use stash_types::{Descriptor, DescriptorKey};

/// Builds descriptors from their keys
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorFactory;

impl Constructor<DescriptorKey> for DescriptorFactory {
    type Value = Descriptor;

    fn construct(&self, key: &DescriptorKey) -> Descriptor {
        Descriptor::from_key(key)
    }
}

/// Pool of shared computer descriptors
pub type DescriptorPool = SharedValuePool<DescriptorKey, DescriptorFactory>;

/// One computer: a shared descriptor plus its memory size
pub type Computer = Record<Descriptor, String>;

/// Collection of computers drawing descriptors from a [`DescriptorPool`]
pub type ComputerCollection<'p> = Collection<'p, DescriptorKey, DescriptorFactory, String>;

/// A line of inventory input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    pub tag: &'static str,
    pub make: &'static str,
    pub model: &'static str,
    pub processor: &'static str,
    pub memory: &'static str,
}

impl InventoryItem {
    /// The descriptor key for this item
    pub fn key(&self) -> DescriptorKey {
        DescriptorKey::new(self.make, self.model, self.processor)
    }
}

const fn item(
    make: &'static str,
    model: &'static str,
    processor: &'static str,
    memory: &'static str,
    tag: &'static str,
) -> InventoryItem {
    InventoryItem { tag, make, model, processor, memory }
}

/// Seven machines sharing two descriptors
pub const REFERENCE_INVENTORY: [InventoryItem; 7] = [
    item("Dell", "Studio XPS", "Intel", "5G", "Y755P"),
    item("Dell", "Studio XPS", "Intel", "6G", "X997T"),
    item("Dell", "Studio XPS", "Intel", "2G", "U8U80"),
    item("Dell", "Studio XPS", "Intel", "2G", "NT777"),
    item("Dell", "Studio XPS", "Intel", "2G", "0J88A"),
    item("HP", "Envy", "Intel", "4G", "CNU883701"),
    item("HP", "Envy", "Intel", "2G", "TXU003283"),
];

/// Add every item to `collection`
pub fn load_inventory(collection: &mut ComputerCollection<'_>, items: &[InventoryItem]) {
    for item in items {
        collection.add(item.tag, item.key(), item.memory.to_string());
    }
}
